// handlers/public/auth/register.rs - POST /api/register handler

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Deserialize;
use serde_json::json;

use crate::api::extract::ApiJson;
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
}

/// POST /api/register - create an account
///
/// A username that is already taken fails like any other creation error (500).
pub async fn register_post(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let id = state.users.register(&payload.username, &payload.password).await?;

    Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
}
