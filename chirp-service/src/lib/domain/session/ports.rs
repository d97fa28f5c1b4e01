use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;

use crate::domain::session::errors::SessionError;
use crate::domain::session::models::AuthenticatedSession;
use crate::domain::session::models::RefreshTokenRecord;
use crate::domain::user::models::EmailAddress;

/// Port for session lifecycle operations.
#[async_trait]
pub trait SessionServicePort: Send + Sync + 'static {
    /// Authenticate a user and open a session.
    ///
    /// Verifies the password against the stored hash, issues a short-lived
    /// access token and a long-lived refresh token, and persists the
    /// refresh-token record.
    ///
    /// # Arguments
    /// * `email` - Account email
    /// * `password` - Plaintext password from the request body
    /// * `expires_in_seconds` - Optional requested access-token lifetime;
    ///   clamped to the one-hour bound
    ///
    /// # Returns
    /// AuthenticatedSession with user profile and both tokens
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password
    /// * `SigningFailed` / `EntropyFailure` - Token issuance failed
    /// * `DatabaseError` - Database operation failed
    async fn login(
        &self,
        email: &EmailAddress,
        password: String,
        expires_in_seconds: Option<u64>,
    ) -> Result<AuthenticatedSession, SessionError>;

    /// Exchange an active refresh token for a new access token.
    ///
    /// The refresh token itself is not rotated; it stays valid until its
    /// fixed expiry or explicit revocation.
    ///
    /// # Arguments
    /// * `refresh_token` - Opaque refresh-token value from the bearer header
    ///
    /// # Returns
    /// Newly issued access token for the associated user
    ///
    /// # Errors
    /// * `RefreshTokenNotFound` - No record for this value
    /// * `RefreshTokenExpired` / `RefreshTokenRevoked` - Record not active
    /// * `UserNotFound` - Associated user no longer exists
    /// * `SigningFailed` - Token issuance failed
    /// * `DatabaseError` / `Timeout` - Store failed or stalled
    async fn refresh(&self, refresh_token: &str) -> Result<String, SessionError>;

    /// Revoke a refresh token.
    ///
    /// Marks the record revoked; revocation is terminal. A token already
    /// past its expiry is reported as an error even though the revocation
    /// timestamp is still recorded.
    ///
    /// # Arguments
    /// * `refresh_token` - Opaque refresh-token value from the bearer header
    ///
    /// # Returns
    /// Unit on success
    ///
    /// # Errors
    /// * `RefreshTokenNotFound` - No record for this value
    /// * `RefreshTokenExpired` - Record already past its expiry
    /// * `DatabaseError` / `Timeout` - Store failed or stalled
    async fn revoke(&self, refresh_token: &str) -> Result<(), SessionError>;
}

/// Persistence operations for refresh-token records.
///
/// Concurrent refresh and revoke calls on the same token are serialized by
/// the store's own transactional guarantees; `set_revoked` must be a single
/// atomic update.
#[async_trait]
pub trait RefreshTokenRepository: Send + Sync + 'static {
    /// Persist a new refresh-token record.
    ///
    /// # Arguments
    /// * `record` - Record to create (`revoked_at` unset)
    ///
    /// # Returns
    /// Created record
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, record: RefreshTokenRecord) -> Result<RefreshTokenRecord, SessionError>;

    /// Retrieve a record by token value.
    ///
    /// # Arguments
    /// * `token` - Opaque token value
    ///
    /// # Returns
    /// Optional record (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find(&self, token: &str) -> Result<Option<RefreshTokenRecord>, SessionError>;

    /// Set a record's revocation timestamp and return the updated record.
    ///
    /// # Arguments
    /// * `token` - Opaque token value
    /// * `revoked_at` - Revocation timestamp
    ///
    /// # Returns
    /// Updated record, or None if no record matches the value
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn set_revoked(
        &self,
        token: &str,
        revoked_at: DateTime<Utc>,
    ) -> Result<Option<RefreshTokenRecord>, SessionError>;
}
