use crate::config::{AppConfig, SecurityConfig};
use crate::database::MemoryStore;
use crate::state::AppState;

/// Security settings with a fixed secret and the cheapest bcrypt cost
pub fn test_security() -> SecurityConfig {
    SecurityConfig {
        jwt_secret: "test-secret".to_string(),
        jwt_expiry_hours: 1,
        bcrypt_cost: 4,
        enable_cors: false,
    }
}

pub fn test_config() -> AppConfig {
    AppConfig::from_lookup(|key| match key {
        "JWT_SECRET" => Some("test-secret".to_string()),
        "SECURITY_BCRYPT_COST" => Some("4".to_string()),
        _ => None,
    })
    .expect("test config")
}

/// Application state over a fresh in-memory store
pub fn test_state() -> AppState {
    AppState::new(test_config(), MemoryStore::new()).expect("test state")
}
