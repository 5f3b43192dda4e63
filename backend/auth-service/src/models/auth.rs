use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request and response shapes for the auth API

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Logout accepts whichever tokens the caller still holds; empty strings are
/// skipped, but at least one token must be present.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogoutRequest {
    #[serde(default)]
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResetInitRequest {
    pub email: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetVerifyRequest {
    pub email: String,
    pub otp: String,
    pub new_password: String,
}

/// A freshly issued access + refresh pair as it appears on the wire.
#[derive(Debug, Serialize)]
pub struct AuthTokens {
    pub access: String,
    pub refresh: String,
}

/// Payload returned by signup and login.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionPayload {
    pub user_id: Uuid,
    pub tokens: AuthTokens,
}

/// Payload returned by refresh.
#[derive(Debug, Serialize)]
pub struct TokenPayload {
    pub tokens: AuthTokens,
}
