use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// JSON body extractor. The body is parsed whatever the `Content-Type`, and any
/// failure is the API's own 400 body instead of axum's plain-text one.
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|rejection| {
            tracing::debug!("Unreadable request body: {}", rejection.body_text());
            ApiError::bad_request("Invalid request body")
        })?;

        serde_json::from_slice(&bytes).map(ApiJson).map_err(|e| {
            tracing::debug!("Rejected request body: {}", e);
            ApiError::bad_request("Invalid request body")
        })
    }
}

/// `Query<T>` with a JSON 400 on rejection
pub struct ApiQuery<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Query::<T>::from_request_parts(parts, state).await {
            Ok(Query(value)) => Ok(ApiQuery(value)),
            Err(rejection) => {
                tracing::debug!("Rejected query string: {}", rejection.body_text());
                Err(ApiError::bad_request("Invalid query parameters"))
            }
        }
    }
}

/// Parse a required numeric id from a query parameter
pub fn require_id(raw: Option<&str>) -> Result<i64, ApiError> {
    let raw = raw
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ApiError::bad_request("Plan ID is required"))?;

    raw.parse()
        .map_err(|_| ApiError::bad_request("Invalid plan ID"))
}
