use std::sync::Arc;
use tracing::{info, warn};

use crate::auth::password::{hash_password, verify_password};
use crate::auth::JwtManager;
use crate::database::UserStore;

use super::error::ServiceError;

/// Registration and credential checks
pub struct UserService {
    store: Arc<dyn UserStore>,
    jwt: Arc<JwtManager>,
    bcrypt_cost: u32,
}

impl UserService {
    pub fn new(store: Arc<dyn UserStore>, jwt: Arc<JwtManager>, bcrypt_cost: u32) -> Self {
        Self { store, jwt, bcrypt_cost }
    }

    /// Create an account and return its id. A taken username is reported
    /// like any other creation failure.
    pub async fn register(&self, username: &str, password: &str) -> Result<i64, ServiceError> {
        require_credentials(username, password)?;

        // bcrypt is CPU bound; keep it off the async workers
        let plain = password.to_string();
        let cost = self.bcrypt_cost;
        let password_hash = tokio::task::spawn_blocking(move || hash_password(&plain, cost))
            .await
            .map_err(|e| e.to_string())
            .and_then(|hashed| hashed.map_err(|e| e.to_string()))
            .map_err(|e| {
                tracing::error!("Password hashing failed: {}", e);
                ServiceError::Internal("Error processing password")
            })?;

        let id = self
            .store
            .create_user(username, &password_hash)
            .await
            .map_err(|source| ServiceError::Store {
                context: "Error creating user",
                source,
            })?;

        info!("Registered user {} ({})", username, id);
        Ok(id)
    }

    /// Check credentials and issue a bearer token. Unknown users and wrong
    /// passwords fail identically.
    pub async fn login(&self, username: &str, password: &str) -> Result<String, ServiceError> {
        require_credentials(username, password)?;

        let user = self
            .store
            .find_user_by_username(username)
            .await
            .map_err(ServiceError::store("Database error"))?;

        let Some(user) = user else {
            warn!("Login rejected for unknown user {}", username);
            return Err(ServiceError::InvalidCredentials);
        };

        // An unreadable stored hash counts as a mismatch
        let plain = password.to_string();
        let stored = user.password_hash.clone();
        let matches = tokio::task::spawn_blocking(move || verify_password(&plain, &stored))
            .await
            .map_err(|e| {
                tracing::error!("Password verification task failed: {}", e);
                ServiceError::Internal("Error processing password")
            })?
            .unwrap_or(false);

        if !matches {
            warn!("Login rejected for user {}: wrong password", username);
            return Err(ServiceError::InvalidCredentials);
        }

        let token = self.jwt.issue(user.id, &user.username).map_err(|e| {
            tracing::error!("Token generation failed: {}", e);
            ServiceError::Internal("Error generating token")
        })?;

        info!("User {} logged in", user.username);
        Ok(token)
    }
}

fn require_credentials(username: &str, password: &str) -> Result<(), ServiceError> {
    if username.trim().is_empty() || password.is_empty() {
        return Err(ServiceError::Validation("Invalid request body".to_string()));
    }
    Ok(())
}
