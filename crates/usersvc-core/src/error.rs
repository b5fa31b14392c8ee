//! Shared error type across user service crates.

use thiserror::Error;

use crate::store::StoreError;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Malformed or missing input, rejected before any store call.
    Validation,
    /// Target record absent, or its existence precondition failed.
    NotFound,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in JSON responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::Validation => "VALIDATION_ERROR",
            ClientCode::NotFound => "NOT_FOUND",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, UserSvcError>;

/// Unified error type used by core and gateway.
#[derive(Debug, Error)]
pub enum UserSvcError {
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("User not found")]
    NotFound,
    /// Raw store failure text, surfaced to clients unchanged.
    #[error("{0}")]
    Store(String),
    #[error("config: {0}")]
    Config(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl UserSvcError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            UserSvcError::Validation(_) => ClientCode::Validation,
            UserSvcError::NotFound => ClientCode::NotFound,
            UserSvcError::Store(_) | UserSvcError::Config(_) | UserSvcError::Internal(_) => {
                ClientCode::Internal
            }
        }
    }
}

/// Failed existence preconditions read as "not found"; a record that never
/// existed and one removed concurrently are indistinguishable here.
impl From<StoreError> for UserSvcError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::PreconditionFailed => UserSvcError::NotFound,
            StoreError::Backend(msg) => UserSvcError::Store(msg),
        }
    }
}
