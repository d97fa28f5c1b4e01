use chrono::Duration;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use uuid::Uuid;

use super::claims::Claims;
use super::claims::ISSUER;
use super::errors::JwtError;

/// Access-token handler for issuing and validating signed tokens.
///
/// Uses HS256 (HMAC with SHA-256) over a symmetric secret. Validation is
/// stateless: a token is checked against the signature and its embedded
/// expiry only, with no store lookup. Individual access tokens therefore
/// cannot be revoked before expiry; revocation authority lives on the
/// refresh token instead, and access-token lifetimes stay short.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl JwtHandler {
    /// Create a new handler with a signing secret.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens (should be stored securely)
    ///
    /// # Returns
    /// JwtHandler instance configured with HS256 algorithm
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
        }
    }

    /// Issue a signed token asserting the given user identity.
    ///
    /// Claims carry the service issuer, the user id as subject, and
    /// issued-at/expiry timestamps derived from `ttl`.
    ///
    /// # Arguments
    /// * `user_id` - User the token asserts identity for
    /// * `ttl` - Token lifetime (callers clamp via [`super::clamp_ttl`])
    ///
    /// # Returns
    /// Signed token string (header.payload.signature)
    ///
    /// # Errors
    /// * `SigningFailed` - Underlying signing operation failed
    pub fn issue(&self, user_id: Uuid, ttl: Duration) -> Result<String, JwtError> {
        let header = Header::new(self.algorithm);
        let claims = Claims::for_user(user_id, ttl);

        encode(&header, &claims, &self.encoding_key)
            .map_err(|e| JwtError::SigningFailed(e.to_string()))
    }

    /// Validate a token and return the user identity it asserts.
    ///
    /// Expiry is checked by the verifier itself (zero leeway, `exp`
    /// required), not recomputed from the decoded claims.
    ///
    /// # Arguments
    /// * `token` - Token string to validate
    ///
    /// # Returns
    /// User id parsed from the subject claim
    ///
    /// # Errors
    /// * `Expired` - Token expiry has passed
    /// * `InvalidSignature` - Signature does not match the secret
    /// * `Malformed` - Claims cannot be parsed or subject is not a UUID
    pub fn validate(&self, token: &str) -> Result<Uuid, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;
        validation.set_issuer(&[ISSUER]);

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::Expired,
                ErrorKind::InvalidSignature => JwtError::InvalidSignature,
                _ => JwtError::Malformed(e.to_string()),
            })?;

        Uuid::parse_str(&token_data.claims.sub).map_err(|e| JwtError::Malformed(e.to_string()))
    }
}
