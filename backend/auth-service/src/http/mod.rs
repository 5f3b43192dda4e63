/// HTTP surface for the auth service.
///
/// Thin axum handlers over the service layer: every handler parses the body,
/// calls one service method, and wraps the outcome in the
/// `{message, payload}` envelope. Protected routes pull the account id out of
/// the bearer token via the `UserId` extractor, which consults the
/// revocation blacklist before validating the token.
mod auth;
mod users;

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::response::IntoResponse;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::error::AuthError;
use crate::services::{AuthService, UserService};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub auth: AuthService,
    pub users: UserService,
}

/// Envelope for every response body
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub message: String,
    pub payload: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(message: &str, payload: T) -> Self {
        Self {
            message: message.to_string(),
            payload: Some(payload),
        }
    }
}

impl ApiResponse<()> {
    pub fn message_only(message: &str) -> Self {
        Self {
            message: message.to_string(),
            payload: None,
        }
    }
}

/// Account id extracted from a bearer access token, revocation included
pub struct UserId(pub Uuid);

#[async_trait]
impl FromRequestParts<AppState> for UserId {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("Authorization")
            .and_then(|h| h.to_str().ok())
            .ok_or(AuthError::InvalidToken)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(AuthError::InvalidToken)?;

        let user_id = state.auth.authenticate(token).await?;
        Ok(UserId(user_id))
    }
}

/// Build the router with all API endpoints
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        // auth routes
        .route("/api/v1/auth/signup", post(auth::signup))
        .route("/api/v1/auth/login", post(auth::login))
        .route("/api/v1/auth/logout", post(auth::logout))
        .route("/api/v1/auth/refresh", post(auth::refresh))
        .route("/api/v1/auth/reset/init", post(auth::reset_init))
        .route("/api/v1/auth/reset/verify", post(auth::reset_verify))
        .route("/api/v1/auth/delete", delete(auth::delete_account))
        // user routes
        .route("/api/v1/user", get(users::get_profile).put(users::update_profile))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn index() -> impl IntoResponse {
    Json(ApiResponse::message_only("API is functional"))
}
