use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Account credential - the single source of truth for "does this account
/// exist and does this password match".
///
/// `id` is assigned at creation and never reused; `email` is immutable after
/// creation and unique across live rows. Only the password hash (and the
/// modification timestamp with it) ever changes.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Credential {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
