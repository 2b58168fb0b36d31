use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};
use serde::Serialize;

use crate::auth::Claims;
use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated user context extracted from JWT
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AuthUser {
    pub user_id: i64,
    pub username: String,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.user_id,
            username: claims.username,
        }
    }
}

/// JWT authentication middleware that validates tokens and extracts user context
pub async fn jwt_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer_token(request.headers())?;

    let claims = state.jwt.validate(token).map_err(|e| {
        tracing::warn!("Rejected bearer token: {}", e);
        ApiError::unauthorized("Invalid token")
    })?;

    request.extensions_mut().insert(AuthUser::from(claims));

    Ok(next.run(request).await)
}

/// Extract the token from `Authorization: Bearer <token>`. The header must be
/// exactly two single-space separated parts.
fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, ApiError> {
    let auth_header = headers
        .get(AUTHORIZATION)
        .ok_or_else(|| ApiError::unauthorized("Authorization header is required"))?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| ApiError::unauthorized("Invalid authorization header format"))?;

    let parts: Vec<&str> = auth_str.split(' ').collect();
    match parts.as_slice() {
        ["Bearer", token] => Ok(*token),
        _ => Err(ApiError::unauthorized("Invalid authorization header format")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{Request as HttpRequest, StatusCode},
        middleware::from_fn_with_state,
        routing::get,
        Extension, Json, Router,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::testing::test_state;

    fn app(state: AppState) -> Router {
        Router::new()
            .route("/whoami", get(|Extension(user): Extension<AuthUser>| async move { Json(user) }))
            .route_layer(from_fn_with_state(state.clone(), jwt_auth_middleware))
            .with_state(state)
    }

    async fn call(state: AppState, auth: Option<&str>) -> (StatusCode, Value) {
        let mut builder = HttpRequest::builder().uri("/whoami");
        if let Some(value) = auth {
            builder = builder.header(AUTHORIZATION, value);
        }
        let response = app(state)
            .oneshot(builder.body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn missing_header_is_rejected() {
        let (status, body) = call(test_state(), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, json!({ "error": "Authorization header is required" }));
    }

    #[tokio::test]
    async fn malformed_header_is_rejected() {
        for header in ["Token abc", "Bearer", "bearer abc", "Bearer a b", "Bearer  abc"] {
            let (status, body) = call(test_state(), Some(header)).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED, "header {:?}", header);
            assert_eq!(body, json!({ "error": "Invalid authorization header format" }));
        }
    }

    #[tokio::test]
    async fn invalid_token_is_rejected() {
        for header in ["Bearer not-a-token", "Bearer "] {
            let (status, body) = call(test_state(), Some(header)).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED);
            assert_eq!(body, json!({ "error": "Invalid token" }));
        }
    }

    #[tokio::test]
    async fn valid_token_injects_user() {
        let state = test_state();
        let token = state.jwt.issue(9, "dana").unwrap();

        let (status, body) = call(state, Some(&format!("Bearer {}", token))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "user_id": 9, "username": "dana" }));
    }
}
