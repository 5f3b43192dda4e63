/// Profile reads and updates for the user-management surface
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::db;
use crate::error::{AuthError, Result};
use crate::models::{UpdateProfileFields, UserProfile};

#[derive(Clone)]
pub struct UserService {
    db: PgPool,
}

impl UserService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn get_profile(&self, user_id: Uuid) -> Result<UserProfile> {
        db::profiles::find_by_id(&self.db, user_id)
            .await?
            .ok_or(AuthError::UserNotFound)
    }

    /// Overwrite the updateable profile fields; email stays immutable.
    pub async fn update_profile(
        &self,
        user_id: Uuid,
        fields: UpdateProfileFields,
    ) -> Result<UserProfile> {
        if fields.first_name.is_empty() || fields.last_name.is_empty() {
            return Err(AuthError::Validation(
                "required fields cannot be empty".into(),
            ));
        }

        let profile = db::profiles::update(&self.db, user_id, &fields).await?;
        info!(user_id = %user_id, "profile updated");
        Ok(profile)
    }
}
