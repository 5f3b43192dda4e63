/// Authentication handlers
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::error::Result;
use crate::http::{ApiResponse, AppState, UserId};
use crate::models::{
    LoginRequest, LogoutRequest, RefreshRequest, ResetInitRequest, ResetVerifyRequest,
    SignupRequest, TokenPayload,
};

pub async fn signup(
    State(state): State<AppState>,
    Json(input): Json<SignupRequest>,
) -> Result<impl IntoResponse> {
    let payload = state.auth.signup(input).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new("successful signup completed", payload)),
    ))
}

pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> Result<impl IntoResponse> {
    let payload = state.auth.login(input).await?;
    Ok(Json(ApiResponse::new("successfully logged in user", payload)))
}

pub async fn logout(
    State(state): State<AppState>,
    Json(input): Json<LogoutRequest>,
) -> Result<impl IntoResponse> {
    state.auth.logout(input).await?;
    Ok(Json(ApiResponse::message_only("successfully logged out")))
}

pub async fn refresh(
    State(state): State<AppState>,
    Json(input): Json<RefreshRequest>,
) -> Result<impl IntoResponse> {
    let tokens = state.auth.refresh(input).await?;
    Ok(Json(ApiResponse::new(
        "successfully refreshed tokens",
        TokenPayload { tokens },
    )))
}

pub async fn reset_init(
    State(state): State<AppState>,
    Json(input): Json<ResetInitRequest>,
) -> Result<impl IntoResponse> {
    state.auth.reset_init(input).await?;
    Ok(Json(ApiResponse::message_only(
        "a verification code was sent to your email; reset your password within the next 2 minutes",
    )))
}

pub async fn reset_verify(
    State(state): State<AppState>,
    Json(input): Json<ResetVerifyRequest>,
) -> Result<impl IntoResponse> {
    state.auth.reset_verify(input).await?;
    Ok(Json(ApiResponse::message_only("password successfully reset")))
}

pub async fn delete_account(
    State(state): State<AppState>,
    UserId(user_id): UserId,
) -> Result<impl IntoResponse> {
    state.auth.delete_account(user_id).await?;
    Ok(Json(ApiResponse::message_only("successfully deleted user")))
}
