use std::sync::Arc;
use std::time::Duration as StdDuration;

use async_trait::async_trait;
use auth::jwt;
use auth::Authenticator;
use auth::PasswordError;
use chrono::Duration;
use chrono::Utc;
use tokio::time::timeout;

use crate::domain::session::errors::SessionError;
use crate::domain::session::models::AuthenticatedSession;
use crate::domain::session::models::RefreshTokenRecord;
use crate::domain::session::ports::RefreshTokenRepository;
use crate::domain::session::ports::SessionServicePort;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::ports::UserRepository;

/// Refresh-token lifetime from issuance.
const REFRESH_TOKEN_TTL_DAYS: i64 = 60;

/// Deadline on refresh/revoke store calls so a stalled store cannot hang
/// the caller.
const STORE_DEADLINE: StdDuration = StdDuration::from_secs(5);

/// Domain service implementation for session lifecycle.
///
/// Composes the auth library (password verification, access-token issuance,
/// refresh-token generation) over the user and refresh-token stores. Holds
/// no per-session state itself; a refresh token's Active/Expired/Revoked
/// state lives entirely in its persisted record.
pub struct SessionService<UR, RR>
where
    UR: UserRepository,
    RR: RefreshTokenRepository,
{
    users: Arc<UR>,
    refresh_tokens: Arc<RR>,
    authenticator: Arc<Authenticator>,
}

impl<UR, RR> SessionService<UR, RR>
where
    UR: UserRepository,
    RR: RefreshTokenRepository,
{
    /// Create a new session service with injected dependencies.
    ///
    /// # Arguments
    /// * `users` - User persistence implementation
    /// * `refresh_tokens` - Refresh-token persistence implementation
    /// * `authenticator` - Credential façade carrying the signing secret
    ///
    /// # Returns
    /// Configured session service instance
    pub fn new(users: Arc<UR>, refresh_tokens: Arc<RR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            users,
            refresh_tokens,
            authenticator,
        }
    }

    // Argon2 verification is CPU-bound; run it on the blocking pool so
    // login bursts cannot starve unrelated request tasks.
    async fn verify_password(&self, password: String, stored_hash: String) -> Result<(), SessionError> {
        let authenticator = Arc::clone(&self.authenticator);
        tokio::task::spawn_blocking(move || authenticator.verify_password(&password, &stored_hash))
            .await
            .map_err(|e| SessionError::Unknown(e.to_string()))?
            .map_err(|e| match e {
                PasswordError::Mismatch => SessionError::InvalidCredentials,
                PasswordError::HashingFailed(msg) => SessionError::Unknown(msg),
            })
    }
}

#[async_trait]
impl<UR, RR> SessionServicePort for SessionService<UR, RR>
where
    UR: UserRepository,
    RR: RefreshTokenRepository,
{
    async fn login(
        &self,
        email: &EmailAddress,
        password: String,
        expires_in_seconds: Option<u64>,
    ) -> Result<AuthenticatedSession, SessionError> {
        let user = self
            .users
            .find_by_email(email.as_str())
            .await?
            .ok_or(SessionError::InvalidCredentials)?;

        self.verify_password(password, user.password_hash.clone())
            .await?;

        let access_token = self
            .authenticator
            .issue_access_token(user.id.0, jwt::clamp_ttl(expires_in_seconds))
            .map_err(|e| SessionError::SigningFailed(e.to_string()))?;

        let refresh_token = self
            .authenticator
            .generate_refresh_token()
            .map_err(|e| SessionError::EntropyFailure(e.to_string()))?;

        let now = Utc::now();
        let record = RefreshTokenRecord {
            token: refresh_token.clone(),
            user_id: user.id,
            created_at: now,
            expires_at: now + Duration::days(REFRESH_TOKEN_TTL_DAYS),
            revoked_at: None,
        };
        self.refresh_tokens.create(record).await?;

        tracing::info!(user_id = %user.id, "User logged in");

        Ok(AuthenticatedSession {
            user,
            access_token,
            refresh_token,
        })
    }

    async fn refresh(&self, refresh_token: &str) -> Result<String, SessionError> {
        let record = timeout(STORE_DEADLINE, self.refresh_tokens.find(refresh_token))
            .await
            .map_err(|_| SessionError::Timeout("refresh token lookup".to_string()))??
            .ok_or(SessionError::RefreshTokenNotFound)?;

        if record.is_expired(Utc::now()) {
            return Err(SessionError::RefreshTokenExpired);
        }
        if record.is_revoked() {
            return Err(SessionError::RefreshTokenRevoked);
        }

        let user = self
            .users
            .find_by_id(&record.user_id)
            .await?
            .ok_or(SessionError::UserNotFound(record.user_id.to_string()))?;

        // The refresh token is not rotated; only a new access token is cut.
        self.authenticator
            .issue_access_token(user.id.0, jwt::clamp_ttl(None))
            .map_err(|e| SessionError::SigningFailed(e.to_string()))
    }

    async fn revoke(&self, refresh_token: &str) -> Result<(), SessionError> {
        let revoked_at = Utc::now();

        let record = timeout(
            STORE_DEADLINE,
            self.refresh_tokens.set_revoked(refresh_token, revoked_at),
        )
        .await
        .map_err(|_| SessionError::Timeout("refresh token revocation".to_string()))??
        .ok_or(SessionError::RefreshTokenNotFound)?;

        // The revocation timestamp is recorded first; a token already past
        // its expiry still reports an error to the caller.
        if record.is_expired(revoked_at) {
            return Err(SessionError::RefreshTokenExpired);
        }

        tracing::info!(user_id = %record.user_id, "Refresh token revoked");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::DateTime;
    use mockall::mock;
    use mockall::predicate::*;

    use super::*;
    use crate::domain::user::errors::UserError;
    use crate::domain::user::models::User;
    use crate::domain::user::models::UserId;

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    mock! {
        pub TestUserRepository {}

        #[async_trait]
        impl UserRepository for TestUserRepository {
            async fn create(&self, user: User) -> Result<User, UserError>;
            async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;
            async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError>;
            async fn update(&self, user: User) -> Result<User, UserError>;
        }
    }

    mock! {
        pub TestRefreshTokenRepository {}

        #[async_trait]
        impl RefreshTokenRepository for TestRefreshTokenRepository {
            async fn create(&self, record: RefreshTokenRecord) -> Result<RefreshTokenRecord, SessionError>;
            async fn find(&self, token: &str) -> Result<Option<RefreshTokenRecord>, SessionError>;
            async fn set_revoked(
                &self,
                token: &str,
                revoked_at: DateTime<Utc>,
            ) -> Result<Option<RefreshTokenRecord>, SessionError>;
        }
    }

    fn user_with_password(password: &str) -> User {
        let now = Utc::now();
        User {
            id: UserId::new(),
            email: EmailAddress::new("test@example.com".to_string()).unwrap(),
            password_hash: auth::PasswordHasher::new().hash(password).unwrap(),
            is_premium: false,
            created_at: now,
            updated_at: now,
        }
    }

    fn active_record(user_id: UserId) -> RefreshTokenRecord {
        let now = Utc::now();
        RefreshTokenRecord {
            token: "b".repeat(64),
            user_id,
            created_at: now,
            expires_at: now + Duration::days(REFRESH_TOKEN_TTL_DAYS),
            revoked_at: None,
        }
    }

    fn service(
        users: MockTestUserRepository,
        refresh_tokens: MockTestRefreshTokenRepository,
    ) -> SessionService<MockTestUserRepository, MockTestRefreshTokenRepository> {
        SessionService::new(
            Arc::new(users),
            Arc::new(refresh_tokens),
            Arc::new(Authenticator::new(SECRET)),
        )
    }

    #[tokio::test]
    async fn test_login_success() {
        let mut users = MockTestUserRepository::new();
        let mut refresh_tokens = MockTestRefreshTokenRepository::new();

        let user = user_with_password("password123");
        let user_id = user.id;
        users
            .expect_find_by_email()
            .withf(|email| email == "test@example.com")
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        refresh_tokens
            .expect_create()
            .withf(move |record| {
                record.user_id == user_id
                    && record.token.len() == 64
                    && record.revoked_at.is_none()
                    && record.expires_at - record.created_at == Duration::days(60)
            })
            .times(1)
            .returning(|record| Ok(record));

        let service = service(users, refresh_tokens);
        let authenticator = Authenticator::new(SECRET);

        let email = EmailAddress::new("test@example.com".to_string()).unwrap();
        let session = service
            .login(&email, "password123".to_string(), None)
            .await
            .unwrap();

        // The access token asserts the authenticated user's identity
        let subject = authenticator
            .validate_access_token(&session.access_token)
            .unwrap();
        assert_eq!(subject, user_id.0);
        assert_eq!(session.refresh_token.len(), 64);
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let mut users = MockTestUserRepository::new();
        let mut refresh_tokens = MockTestRefreshTokenRepository::new();

        let user = user_with_password("password123");
        users
            .expect_find_by_email()
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));
        refresh_tokens.expect_create().times(0);

        let service = service(users, refresh_tokens);

        let email = EmailAddress::new("test@example.com".to_string()).unwrap();
        let result = service.login(&email, "wrong_password".to_string(), None).await;
        assert!(matches!(
            result.unwrap_err(),
            SessionError::InvalidCredentials
        ));
    }

    #[tokio::test]
    async fn test_login_unknown_email() {
        let mut users = MockTestUserRepository::new();
        let refresh_tokens = MockTestRefreshTokenRepository::new();

        users
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));

        let service = service(users, refresh_tokens);

        let email = EmailAddress::new("nobody@example.com".to_string()).unwrap();
        let result = service.login(&email, "password123".to_string(), None).await;
        assert!(matches!(
            result.unwrap_err(),
            SessionError::InvalidCredentials
        ));
    }

    #[tokio::test]
    async fn test_refresh_success() {
        let mut users = MockTestUserRepository::new();
        let mut refresh_tokens = MockTestRefreshTokenRepository::new();

        let user = user_with_password("password123");
        let user_id = user.id;
        let record = active_record(user_id);
        let token_value = record.token.clone();

        refresh_tokens
            .expect_find()
            .withf({
                let token_value = token_value.clone();
                move |token| token == token_value
            })
            .times(1)
            .returning(move |_| Ok(Some(record.clone())));
        users
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let service = service(users, refresh_tokens);
        let authenticator = Authenticator::new(SECRET);

        let access_token = service.refresh(&token_value).await.unwrap();
        let subject = authenticator.validate_access_token(&access_token).unwrap();
        assert_eq!(subject, user_id.0);
    }

    #[tokio::test]
    async fn test_refresh_unknown_token() {
        let users = MockTestUserRepository::new();
        let mut refresh_tokens = MockTestRefreshTokenRepository::new();

        refresh_tokens.expect_find().times(1).returning(|_| Ok(None));

        let service = service(users, refresh_tokens);

        let result = service.refresh("missing").await;
        assert!(matches!(
            result.unwrap_err(),
            SessionError::RefreshTokenNotFound
        ));
    }

    #[tokio::test]
    async fn test_refresh_expired_token() {
        let users = MockTestUserRepository::new();
        let mut refresh_tokens = MockTestRefreshTokenRepository::new();

        let mut record = active_record(UserId::new());
        record.expires_at = Utc::now() - Duration::seconds(1);
        let token_value = record.token.clone();

        refresh_tokens
            .expect_find()
            .times(1)
            .returning(move |_| Ok(Some(record.clone())));

        let service = service(users, refresh_tokens);

        let result = service.refresh(&token_value).await;
        assert!(matches!(
            result.unwrap_err(),
            SessionError::RefreshTokenExpired
        ));
    }

    #[tokio::test]
    async fn test_refresh_revoked_token() {
        let users = MockTestUserRepository::new();
        let mut refresh_tokens = MockTestRefreshTokenRepository::new();

        let mut record = active_record(UserId::new());
        record.revoked_at = Some(Utc::now());
        let token_value = record.token.clone();

        refresh_tokens
            .expect_find()
            .times(1)
            .returning(move |_| Ok(Some(record.clone())));

        let service = service(users, refresh_tokens);

        let result = service.refresh(&token_value).await;
        assert!(matches!(
            result.unwrap_err(),
            SessionError::RefreshTokenRevoked
        ));
    }

    #[tokio::test]
    async fn test_revoke_success() {
        let users = MockTestUserRepository::new();
        let mut refresh_tokens = MockTestRefreshTokenRepository::new();

        let record = active_record(UserId::new());
        let token_value = record.token.clone();

        refresh_tokens
            .expect_set_revoked()
            .withf({
                let token_value = token_value.clone();
                move |token, _| token == token_value
            })
            .times(1)
            .returning(move |_, revoked_at| {
                let mut updated = record.clone();
                updated.revoked_at = Some(revoked_at);
                Ok(Some(updated))
            });

        let service = service(users, refresh_tokens);

        assert!(service.revoke(&token_value).await.is_ok());
    }

    #[tokio::test]
    async fn test_revoke_unknown_token() {
        let users = MockTestUserRepository::new();
        let mut refresh_tokens = MockTestRefreshTokenRepository::new();

        refresh_tokens
            .expect_set_revoked()
            .times(1)
            .returning(|_, _| Ok(None));

        let service = service(users, refresh_tokens);

        let result = service.revoke("missing").await;
        assert!(matches!(
            result.unwrap_err(),
            SessionError::RefreshTokenNotFound
        ));
    }

    // Revoking a token that already expired naturally is reported as an
    // error rather than a no-op, even though the revocation timestamp is
    // still written. Carried over from the observed revoke behavior.
    #[tokio::test]
    async fn test_revoke_expired_token_is_rejected() {
        let users = MockTestUserRepository::new();
        let mut refresh_tokens = MockTestRefreshTokenRepository::new();

        let mut record = active_record(UserId::new());
        record.expires_at = Utc::now() - Duration::days(1);
        let token_value = record.token.clone();

        refresh_tokens
            .expect_set_revoked()
            .times(1)
            .returning(move |_, revoked_at| {
                let mut updated = record.clone();
                updated.revoked_at = Some(revoked_at);
                Ok(Some(updated))
            });

        let service = service(users, refresh_tokens);

        let result = service.revoke(&token_value).await;
        assert!(matches!(
            result.unwrap_err(),
            SessionError::RefreshTokenExpired
        ));
    }
}
