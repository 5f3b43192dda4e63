use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AuthError>;

/// Closed error taxonomy for the service.
///
/// Store- and crypto-level failures are normalized into these variants at the
/// `From` boundary so callers match structurally and never inspect
/// engine-specific error values.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid input: {0}")]
    Validation(String),

    #[error("invalid email provided")]
    InvalidEmail,

    #[error("invalid password provided")]
    InvalidCredentials,

    #[error("no such user found")]
    UserNotFound,

    #[error("duplicate key")]
    DuplicateKey,

    #[error("failed to parse or validate token")]
    InvalidToken,

    #[error("blacklisted token used")]
    TokenRevoked,

    #[error("password reset already initiated for this email")]
    ResetAlreadyInitiated,

    #[error("invalid input - otp mismatch")]
    OtpMismatch,

    #[error("not found - invalid input or expired key")]
    OtpNotFound,

    #[error("database error: {0}")]
    Database(String),

    #[error("cache error: {0}")]
    Cache(String),

    #[error("token signing error: {0}")]
    Jwt(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl AuthError {
    pub fn status(&self) -> StatusCode {
        match self {
            AuthError::Validation(_)
            | AuthError::InvalidEmail
            | AuthError::InvalidToken
            | AuthError::OtpMismatch => StatusCode::BAD_REQUEST,
            AuthError::InvalidCredentials | AuthError::TokenRevoked => StatusCode::UNAUTHORIZED,
            AuthError::UserNotFound | AuthError::OtpNotFound => StatusCode::NOT_FOUND,
            AuthError::DuplicateKey => StatusCode::CONFLICT,
            AuthError::ResetAlreadyInitiated => StatusCode::FORBIDDEN,
            AuthError::Database(_)
            | AuthError::Cache(_)
            | AuthError::Jwt(_)
            | AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message handed to the client; internal detail never leaves the process.
    pub fn public_message(&self) -> String {
        match self {
            AuthError::Database(_)
            | AuthError::Cache(_)
            | AuthError::Jwt(_)
            | AuthError::Internal(_) => "internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "request failed");
        }
        let body = Json(json!({
            "message": self.public_message(),
            "payload": null,
        }));
        (status, body).into_response()
    }
}

// Conversions from external error types

impl From<sqlx::Error> for AuthError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => AuthError::UserNotFound,
            sqlx::Error::Database(db) if db.is_unique_violation() => AuthError::DuplicateKey,
            _ => {
                tracing::error!("database error: {}", err);
                AuthError::Database(err.to_string())
            }
        }
    }
}

impl From<redis::RedisError> for AuthError {
    fn from(err: redis::RedisError) -> Self {
        tracing::error!("cache error: {}", err);
        AuthError::Cache(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping_matches_taxonomy() {
        assert_eq!(
            AuthError::Validation("x".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AuthError::InvalidEmail.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AuthError::InvalidCredentials.status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(AuthError::TokenRevoked.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AuthError::UserNotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(AuthError::OtpNotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(AuthError::DuplicateKey.status(), StatusCode::CONFLICT);
        assert_eq!(
            AuthError::ResetAlreadyInitiated.status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(AuthError::InvalidToken.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AuthError::Database("boom".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn internal_detail_is_not_leaked() {
        let err = AuthError::Database("connection refused to 10.0.0.5".into());
        assert_eq!(err.public_message(), "internal server error");
        let err = AuthError::Cache("redis://secret-host timed out".into());
        assert_eq!(err.public_message(), "internal server error");
    }

    #[test]
    fn client_errors_keep_their_message() {
        assert_eq!(
            AuthError::OtpMismatch.public_message(),
            "invalid input - otp mismatch"
        );
        assert_eq!(AuthError::UserNotFound.public_message(), "no such user found");
    }
}
