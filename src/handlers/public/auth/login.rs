// handlers/public/auth/login.rs - POST /api/login handler

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Deserialize;
use serde_json::json;

use crate::api::extract::ApiJson;
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// POST /api/login - exchange credentials for a bearer token
///
/// Unknown usernames and wrong passwords both answer 401 "Invalid credentials".
pub async fn login_post(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let token = state.users.login(&payload.username, &payload.password).await?;

    Ok((StatusCode::OK, Json(json!({ "token": token }))))
}
