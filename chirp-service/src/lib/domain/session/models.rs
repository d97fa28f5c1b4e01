use chrono::DateTime;
use chrono::Utc;

use crate::domain::user::models::User;
use crate::domain::user::models::UserId;

/// Persisted refresh-token record.
///
/// The token value is opaque (64 lowercase hex characters); all validity
/// state lives here. The record is mutated exactly once, to set
/// `revoked_at` - both revocation and natural expiry are terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshTokenRecord {
    pub token: String,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub revoked_at: Option<DateTime<Utc>>,
}

impl RefreshTokenRecord {
    /// Whether the record's expiry has passed at `now`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Whether the record has been explicitly revoked.
    pub fn is_revoked(&self) -> bool {
        self.revoked_at.is_some()
    }
}

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct AuthenticatedSession {
    pub user: User,
    /// Short-lived signed access token
    pub access_token: String,
    /// Long-lived opaque refresh token, persisted with its expiry
    pub refresh_token: String,
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn record(expires_at: DateTime<Utc>, revoked_at: Option<DateTime<Utc>>) -> RefreshTokenRecord {
        RefreshTokenRecord {
            token: "a".repeat(64),
            user_id: UserId::new(),
            created_at: Utc::now(),
            expires_at,
            revoked_at,
        }
    }

    #[test]
    fn test_active_record() {
        let now = Utc::now();
        let record = record(now + Duration::days(60), None);

        assert!(!record.is_expired(now));
        assert!(!record.is_revoked());
    }

    #[test]
    fn test_expired_at_boundary() {
        let now = Utc::now();
        let record = record(now, None);

        // Valid strictly before expiry, invalid at and after it
        assert!(record.is_expired(now));
        assert!(!record.is_expired(now - Duration::seconds(1)));
    }

    #[test]
    fn test_revoked_record() {
        let now = Utc::now();
        let record = record(now + Duration::days(60), Some(now));

        assert!(record.is_revoked());
    }
}
