use axum::{http::StatusCode, response::IntoResponse, Extension, Json};

use crate::middleware::AuthUser;

/// GET /api/auth/whoami - identity carried by the caller's token
pub async fn whoami(Extension(user): Extension<AuthUser>) -> impl IntoResponse {
    Json(user)
}

/// POST /api/logout
///
/// Tokens are self-contained, so there is nothing to revoke server side;
/// the client discards its token.
pub async fn logout(Extension(user): Extension<AuthUser>) -> impl IntoResponse {
    tracing::info!("User {} logged out", user.username);
    StatusCode::OK
}
