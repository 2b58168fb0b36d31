use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::error::ApiError;
use crate::state::AppState;

/// GET / - service banner
pub async fn root() -> impl IntoResponse {
    Json(json!({
        "name": "Gym Planner API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "public": "/api/register, /api/login, /health",
            "auth": "/api/auth/whoami, /api/logout (protected)",
            "plans": "/api/plans, /api/plans/{list,get,delete} (protected)",
            "plan_details": "/api/plan-details/{add,get,update,delete} (protected)",
        }
    }))
}

/// GET /health - liveness plus a store round-trip
pub async fn health(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let now = chrono::Utc::now();

    match state.store.health_check().await {
        Ok(()) => Ok((
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "database": "ok",
                "timestamp": now,
            })),
        )),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            Err(ApiError::service_unavailable("database unavailable"))
        }
    }
}
