use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use serde::Deserialize;
use serde_json::json;

use crate::api::extract::{require_id, ApiQuery};
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PlanQuery {
    pub id: Option<String>,
}

/// POST /api/plans - create an empty plan owned by the caller
pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<impl IntoResponse, ApiError> {
    let id = state.plans.create_plan(user.user_id).await?;
    Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
}

/// GET /api/plans/list - every plan the caller owns
pub async fn list(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<impl IntoResponse, ApiError> {
    let plans = state.plans.list_plans(user.user_id).await?;
    Ok(Json(plans))
}

/// GET /api/plans/get?id= - one plan; 404 covers both missing and foreign plans
pub async fn get(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ApiQuery(query): ApiQuery<PlanQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let plan_id = require_id(query.id.as_deref())?;
    let plan = state.plans.get_plan(user.user_id, plan_id).await?;
    Ok(Json(plan))
}

/// DELETE /api/plans/delete?id= - remove a plan and its details
pub async fn delete(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ApiQuery(query): ApiQuery<PlanQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let plan_id = require_id(query.id.as_deref())?;
    state.plans.delete_plan(user.user_id, plan_id).await?;
    Ok(StatusCode::OK)
}
