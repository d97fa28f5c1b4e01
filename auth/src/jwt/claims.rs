use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// Issuer embedded in every token this service signs.
pub const ISSUER: &str = "chirp-service";

/// Default access-token lifetime in seconds.
pub const DEFAULT_TTL_SECS: u64 = 3600;

/// Upper bound on a caller-requested access-token lifetime in seconds.
pub const MAX_TTL_SECS: u64 = 3600;

/// Access-token claim set.
///
/// Fixed RFC 7519 subset: issuer, subject (user id in string form),
/// issued-at and expiration as Unix timestamps.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Issuer
    pub iss: String,

    /// Subject (user identifier)
    pub sub: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Create claims for a user with the given lifetime.
    ///
    /// # Arguments
    /// * `user_id` - User the token asserts identity for
    /// * `ttl` - Token lifetime; added to the current time for `exp`
    ///
    /// # Returns
    /// Claims with iss, sub, iat, and exp set
    pub fn for_user(user_id: Uuid, ttl: Duration) -> Self {
        let now = Utc::now();

        Self {
            iss: ISSUER.to_string(),
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        }
    }
}

/// Clamp a caller-requested token lifetime to the allowed range.
///
/// A requested value in `(0, MAX_TTL_SECS]` is honored; zero, absent, or
/// over-bound requests fall back to the default lifetime.
pub fn clamp_ttl(requested_secs: Option<u64>) -> Duration {
    match requested_secs {
        Some(secs) if secs > 0 && secs <= MAX_TTL_SECS => Duration::seconds(secs as i64),
        _ => Duration::seconds(DEFAULT_TTL_SECS as i64),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_user() {
        let user_id = Uuid::new_v4();
        let claims = Claims::for_user(user_id, Duration::seconds(60));

        assert_eq!(claims.iss, ISSUER);
        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.exp - claims.iat, 60);
    }

    #[test]
    fn test_clamp_ttl_default() {
        assert_eq!(clamp_ttl(None), Duration::seconds(3600));
    }

    #[test]
    fn test_clamp_ttl_zero_falls_back() {
        assert_eq!(clamp_ttl(Some(0)), Duration::seconds(3600));
    }

    #[test]
    fn test_clamp_ttl_over_bound_falls_back() {
        assert_eq!(clamp_ttl(Some(3601)), Duration::seconds(3600));
        assert_eq!(clamp_ttl(Some(u64::MAX)), Duration::seconds(3600));
    }

    #[test]
    fn test_clamp_ttl_in_range_is_honored() {
        assert_eq!(clamp_ttl(Some(1)), Duration::seconds(1));
        assert_eq!(clamp_ttl(Some(1800)), Duration::seconds(1800));
        assert_eq!(clamp_ttl(Some(3600)), Duration::seconds(3600));
    }
}
