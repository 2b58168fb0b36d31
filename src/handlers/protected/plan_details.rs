use axum::{extract::State, http::StatusCode, response::IntoResponse, Extension, Json};
use serde::Deserialize;

use crate::api::extract::{require_id, ApiJson, ApiQuery};
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PlanDetailQuery {
    pub plan_id: Option<String>,
    #[serde(rename = "move")]
    pub move_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PlanDetailRequest {
    #[serde(rename = "move")]
    pub move_name: String,
    pub num_of_reps: i32,
}

/// Unwrap the body, but report a plan the caller does not own ahead of a
/// malformed body.
async fn owned_plan_body(
    state: &AppState,
    user: &AuthUser,
    plan_id: i64,
    body: Result<ApiJson<PlanDetailRequest>, ApiError>,
) -> Result<PlanDetailRequest, ApiError> {
    match body {
        Ok(ApiJson(detail)) => Ok(detail),
        Err(rejection) => {
            state.plan_details.require_owned_plan(user.user_id, plan_id).await?;
            Err(rejection)
        }
    }
}

/// POST /api/plan-details/add?plan_id= - append an exercise to the plan
pub async fn add(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ApiQuery(query): ApiQuery<PlanDetailQuery>,
    body: Result<ApiJson<PlanDetailRequest>, ApiError>,
) -> Result<impl IntoResponse, ApiError> {
    let plan_id = require_id(query.plan_id.as_deref())?;
    let detail = owned_plan_body(&state, &user, plan_id, body).await?;
    state
        .plan_details
        .add_detail(user.user_id, plan_id, &detail.move_name, detail.num_of_reps)
        .await?;
    Ok(StatusCode::CREATED)
}

/// GET /api/plan-details/get?plan_id= - exercises of the plan in insertion order
pub async fn get(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ApiQuery(query): ApiQuery<PlanDetailQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let plan_id = require_id(query.plan_id.as_deref())?;
    let details = state.plan_details.list_details(user.user_id, plan_id).await?;
    Ok(Json(details))
}

/// PUT /api/plan-details/update?plan_id= - change the rep count of an existing move
pub async fn update(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ApiQuery(query): ApiQuery<PlanDetailQuery>,
    body: Result<ApiJson<PlanDetailRequest>, ApiError>,
) -> Result<impl IntoResponse, ApiError> {
    let plan_id = require_id(query.plan_id.as_deref())?;
    let detail = owned_plan_body(&state, &user, plan_id, body).await?;
    state
        .plan_details
        .update_detail(user.user_id, plan_id, &detail.move_name, detail.num_of_reps)
        .await?;
    Ok(StatusCode::OK)
}

/// DELETE /api/plan-details/delete?plan_id=&move=
pub async fn delete(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ApiQuery(query): ApiQuery<PlanDetailQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let plan_id = require_id(query.plan_id.as_deref())?;
    let move_name = query
        .move_name
        .as_deref()
        .filter(|m| !m.is_empty())
        .ok_or_else(|| ApiError::bad_request("Move parameter is required"))?;

    state
        .plan_details
        .delete_detail(user.user_id, plan_id, move_name)
        .await?;
    Ok(StatusCode::OK)
}
