use thiserror::Error;

use crate::database::DatabaseError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    /// Failure outside the store; the message is safe to show clients
    #[error("{0}")]
    Internal(&'static str),

    #[error("{context}: {source}")]
    Store {
        context: &'static str,
        #[source]
        source: DatabaseError,
    },
}

impl ServiceError {
    /// Map a store error, keeping not-found and conflict outcomes and
    /// wrapping everything else under a client-safe `context` message.
    pub fn store(context: &'static str) -> impl FnOnce(DatabaseError) -> ServiceError {
        move |err| match err {
            DatabaseError::NotFound(msg) => ServiceError::NotFound(msg),
            DatabaseError::Conflict(msg) => ServiceError::Conflict(msg),
            source => ServiceError::Store { context, source },
        }
    }
}
