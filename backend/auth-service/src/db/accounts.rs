/// Cross-record account operations.
///
/// Signup writes a credential and a profile; deletion removes both. Each
/// pair runs inside a single transaction so the two records exist together
/// or not at all.
use crate::db::{credentials, profiles};
use crate::error::Result;
use crate::models::Credential;
use sqlx::PgPool;
use uuid::Uuid;

/// Create credential + minimal profile for a new account
pub async fn create_account(
    pool: &PgPool,
    id: Uuid,
    email: &str,
    password_hash: &str,
    first_name: &str,
    last_name: &str,
) -> Result<Credential> {
    let mut tx = pool.begin().await?;

    let credential = credentials::create(&mut tx, id, email, password_hash).await?;
    profiles::create(&mut tx, id, email, first_name, last_name).await?;

    tx.commit().await?;

    Ok(credential)
}

/// Remove credential + profile for an account; `UserNotFound` if either
/// record is already gone, in which case neither is removed.
pub async fn delete_account(pool: &PgPool, id: Uuid) -> Result<()> {
    let mut tx = pool.begin().await?;

    credentials::delete_by_id(&mut tx, id).await?;
    profiles::delete(&mut tx, id).await?;

    tx.commit().await?;

    Ok(())
}
