use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Profile record owned by user management; shares the credential's id.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(rename = "userId")]
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub bio: String,
    pub avatar_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Profile update input; email is not updateable via this API.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileFields {
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub avatar_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_serializes_with_camel_case_keys() {
        let profile = UserProfile {
            id: Uuid::new_v4(),
            email: "a@x.com".into(),
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            bio: String::new(),
            avatar_url: String::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let value = serde_json::to_value(&profile).unwrap();
        assert!(value.get("userId").is_some());
        assert!(value.get("firstName").is_some());
        assert!(value.get("avatarUrl").is_some());
        assert!(value.get("first_name").is_none());
    }

    #[test]
    fn update_fields_tolerate_missing_optionals() {
        let fields: UpdateProfileFields =
            serde_json::from_str(r#"{"firstName":"Ada","lastName":"Lovelace"}"#).unwrap();
        assert_eq!(fields.first_name, "Ada");
        assert_eq!(fields.bio, "");
        assert_eq!(fields.avatar_url, "");
    }
}
