/// User profile handlers
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use crate::error::Result;
use crate::http::{ApiResponse, AppState, UserId};
use crate::models::{UpdateProfileFields, UserProfile};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfilePayload {
    pub user_info: UserProfile,
}

pub async fn get_profile(
    State(state): State<AppState>,
    UserId(user_id): UserId,
) -> Result<impl IntoResponse> {
    let profile = state.users.get_profile(user_id).await?;
    Ok(Json(ApiResponse::new(
        "successfully retrieved user",
        ProfilePayload { user_info: profile },
    )))
}

pub async fn update_profile(
    State(state): State<AppState>,
    UserId(user_id): UserId,
    Json(fields): Json<UpdateProfileFields>,
) -> Result<impl IntoResponse> {
    let profile = state.users.update_profile(user_id, fields).await?;
    Ok(Json(ApiResponse::new(
        "successfully updated user",
        ProfilePayload { user_info: profile },
    )))
}
