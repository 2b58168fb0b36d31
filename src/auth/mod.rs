pub mod password;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::SecurityConfig;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: i64,
    pub username: String,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn new(
        user_id: i64,
        username: impl Into<String>,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<Self, JwtError> {
        let exp = now
            .checked_add_signed(ttl)
            .ok_or_else(|| JwtError::TokenGeneration("token expiry out of range".to_string()))?;

        Ok(Self {
            user_id,
            username: username.into(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
        })
    }
}

#[derive(Debug)]
pub enum JwtError {
    TokenGeneration(String),
    InvalidSecret,
    InvalidExpiry(u64),
    Invalid,
    Expired,
}

impl std::fmt::Display for JwtError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JwtError::TokenGeneration(msg) => write!(f, "JWT generation error: {}", msg),
            JwtError::InvalidSecret => write!(f, "Invalid JWT secret"),
            JwtError::InvalidExpiry(hours) => write!(f, "Invalid JWT expiry: {} hours", hours),
            JwtError::Invalid => write!(f, "Invalid JWT token"),
            JwtError::Expired => write!(f, "Expired JWT token"),
        }
    }
}

impl std::error::Error for JwtError {}

/// Issues and validates HS256 bearer tokens with a process-wide secret
pub struct JwtManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl JwtManager {
    pub fn new(security: &SecurityConfig) -> Result<Self, JwtError> {
        if security.jwt_secret.is_empty() {
            return Err(JwtError::InvalidSecret);
        }

        let ttl = i64::try_from(security.jwt_expiry_hours)
            .ok()
            .and_then(Duration::try_hours)
            .ok_or(JwtError::InvalidExpiry(security.jwt_expiry_hours))?;

        let secret = security.jwt_secret.as_bytes();
        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation: Validation::default(),
            ttl,
        })
    }

    pub fn issue(&self, user_id: i64, username: &str) -> Result<String, JwtError> {
        self.sign(&Claims::new(user_id, username, Utc::now(), self.ttl)?)
    }

    pub fn validate(&self, token: &str) -> Result<Claims, JwtError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::Expired,
                _ => JwtError::Invalid,
            })
    }

    fn sign(&self, claims: &Claims) -> Result<String, JwtError> {
        encode(&Header::default(), claims, &self.encoding_key)
            .map_err(|e| JwtError::TokenGeneration(e.to_string()))
    }
}
