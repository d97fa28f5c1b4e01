use chrono::Duration;
use uuid::Uuid;

use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::refresh;
use crate::refresh::RefreshTokenError;

/// Credential façade combining password hashing and token issuance.
///
/// Holds the only copy of the signing secret (inside the JWT handler) and
/// exposes the operations services need. Read-only after construction, so a
/// single instance is shared across request tasks without locking.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for access-token signing
    ///
    /// # Returns
    /// Configured Authenticator instance
    pub fn new(jwt_secret: &[u8]) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            jwt_handler: JwtHandler::new(jwt_secret),
        }
    }

    /// Hash a password for storage.
    ///
    /// # Arguments
    /// * `password` - Plaintext password
    ///
    /// # Returns
    /// Hashed password string
    ///
    /// # Errors
    /// * `HashingFailed` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify a password against a stored hash.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    ///
    /// # Errors
    /// * `Mismatch` - Password does not match
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> Result<(), PasswordError> {
        self.password_hasher.verify(password, stored_hash)
    }

    /// Issue a signed access token for a user.
    ///
    /// # Arguments
    /// * `user_id` - User the token asserts identity for
    /// * `ttl` - Token lifetime
    ///
    /// # Errors
    /// * `SigningFailed` - Token signing failed
    pub fn issue_access_token(&self, user_id: Uuid, ttl: Duration) -> Result<String, JwtError> {
        self.jwt_handler.issue(user_id, ttl)
    }

    /// Validate an access token and return the user identity it asserts.
    ///
    /// # Arguments
    /// * `token` - Token string
    ///
    /// # Errors
    /// * `Expired` / `InvalidSignature` / `Malformed` - Token rejected
    pub fn validate_access_token(&self, token: &str) -> Result<Uuid, JwtError> {
        self.jwt_handler.validate(token)
    }

    /// Generate an opaque refresh-token value.
    ///
    /// # Errors
    /// * `EntropySourceFailure` - The random source failed
    pub fn generate_refresh_token(&self) -> Result<String, RefreshTokenError> {
        refresh::generate()
    }
}
