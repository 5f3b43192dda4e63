/// Credential store operations
///
/// The only mutation paths are creation, password change, and deletion;
/// email is immutable post-creation.
use crate::error::{AuthError, Result};
use crate::models::Credential;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

/// Insert a credential row. A unique violation on `email` surfaces as
/// `DuplicateKey` via the normalized `sqlx::Error` conversion.
pub async fn create(
    tx: &mut Transaction<'_, Postgres>,
    id: Uuid,
    email: &str,
    password_hash: &str,
) -> Result<Credential> {
    let credential = sqlx::query_as::<_, Credential>(
        r#"
        INSERT INTO credentials (id, email, password_hash, created_at, updated_at)
        VALUES ($1, $2, $3, CURRENT_TIMESTAMP, CURRENT_TIMESTAMP)
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(email)
    .bind(password_hash)
    .fetch_one(tx.as_mut())
    .await?;

    Ok(credential)
}

/// Find a credential by email
pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Credential>> {
    let credential =
        sqlx::query_as::<_, Credential>("SELECT * FROM credentials WHERE email = $1")
            .bind(email)
            .fetch_optional(pool)
            .await?;

    Ok(credential)
}

/// Replace the password hash and refresh the modification timestamp
pub async fn update_password_hash(pool: &PgPool, email: &str, new_hash: &str) -> Result<()> {
    let result = sqlx::query(
        r#"
        UPDATE credentials
        SET password_hash = $2, updated_at = CURRENT_TIMESTAMP
        WHERE email = $1
        "#,
    )
    .bind(email)
    .bind(new_hash)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(AuthError::UserNotFound);
    }

    Ok(())
}

/// Delete a credential by account id
pub async fn delete_by_id(tx: &mut Transaction<'_, Postgres>, id: Uuid) -> Result<()> {
    let result = sqlx::query("DELETE FROM credentials WHERE id = $1")
        .bind(id)
        .execute(tx.as_mut())
        .await?;

    if result.rows_affected() == 0 {
        return Err(AuthError::UserNotFound);
    }

    Ok(())
}
