/// Profile record operations (owned by user management)
use crate::error::{AuthError, Result};
use crate::models::{UpdateProfileFields, UserProfile};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

/// Insert the minimal profile record created on signup
pub async fn create(
    tx: &mut Transaction<'_, Postgres>,
    id: Uuid,
    email: &str,
    first_name: &str,
    last_name: &str,
) -> Result<UserProfile> {
    let profile = sqlx::query_as::<_, UserProfile>(
        r#"
        INSERT INTO profiles (id, email, first_name, last_name, bio, avatar_url, created_at, updated_at)
        VALUES ($1, $2, $3, $4, '', '', CURRENT_TIMESTAMP, CURRENT_TIMESTAMP)
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(email)
    .bind(first_name)
    .bind(last_name)
    .fetch_one(tx.as_mut())
    .await?;

    Ok(profile)
}

/// Find a profile by account id
pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<UserProfile>> {
    let profile = sqlx::query_as::<_, UserProfile>("SELECT * FROM profiles WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(profile)
}

/// Overwrite the updateable profile fields and refresh the timestamp
pub async fn update(pool: &PgPool, id: Uuid, fields: &UpdateProfileFields) -> Result<UserProfile> {
    let profile = sqlx::query_as::<_, UserProfile>(
        r#"
        UPDATE profiles
        SET
            first_name = $2,
            last_name = $3,
            bio = $4,
            avatar_url = $5,
            updated_at = CURRENT_TIMESTAMP
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(&fields.first_name)
    .bind(&fields.last_name)
    .bind(&fields.bio)
    .bind(&fields.avatar_url)
    .fetch_optional(pool)
    .await?
    .ok_or(AuthError::UserNotFound)?;

    Ok(profile)
}

/// Delete a profile by account id
pub async fn delete(tx: &mut Transaction<'_, Postgres>, id: Uuid) -> Result<()> {
    let result = sqlx::query("DELETE FROM profiles WHERE id = $1")
        .bind(id)
        .execute(tx.as_mut())
        .await?;

    if result.rows_affected() == 0 {
        return Err(AuthError::UserNotFound);
    }

    Ok(())
}
