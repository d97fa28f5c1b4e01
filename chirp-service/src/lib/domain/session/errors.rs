use thiserror::Error;

use crate::domain::user::errors::UserError;

/// Top-level error for login, refresh, and revoke operations.
#[derive(Debug, Clone, Error)]
pub enum SessionError {
    /// Unknown email or wrong password; callers present both identically.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Refresh token not found")]
    RefreshTokenNotFound,

    #[error("Refresh token is expired")]
    RefreshTokenExpired,

    #[error("Refresh token was previously revoked")]
    RefreshTokenRevoked,

    #[error("User not found: {0}")]
    UserNotFound(String),

    // Infrastructure errors
    #[error("Token signing failed: {0}")]
    SigningFailed(String),

    #[error("Entropy source failure: {0}")]
    EntropyFailure(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Store deadline exceeded: {0}")]
    Timeout(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<UserError> for SessionError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(id) => SessionError::UserNotFound(id),
            UserError::DatabaseError(msg) => SessionError::DatabaseError(msg),
            other => SessionError::Unknown(other.to_string()),
        }
    }
}
