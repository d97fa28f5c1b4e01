use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::Authenticator;
use chirp_service::domain::chirp::errors::ChirpError;
use chirp_service::domain::chirp::models::Chirp;
use chirp_service::domain::chirp::models::ChirpId;
use chirp_service::domain::chirp::ports::ChirpRepository;
use chirp_service::domain::chirp::service::ChirpService;
use chirp_service::domain::session::errors::SessionError;
use chirp_service::domain::session::models::RefreshTokenRecord;
use chirp_service::domain::session::ports::RefreshTokenRepository;
use chirp_service::domain::session::service::SessionService;
use chirp_service::domain::user::errors::UserError;
use chirp_service::domain::user::models::User;
use chirp_service::domain::user::models::UserId;
use chirp_service::domain::user::ports::UserRepository;
use chirp_service::domain::user::service::UserService;
use chirp_service::inbound::http::router::create_router;
use chirp_service::inbound::http::router::AppState;
use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

pub const TEST_JWT_SECRET: &[u8] = b"test-secret-key-for-signing-at-least-32-bytes";
pub const TEST_WEBHOOK_API_KEY: &str = "test-webhook-api-key";

/// Test application that spawns the real router on a random port.
///
/// Persistence ports are backed by in-memory implementations so the suite
/// needs no database; handles to the stores stay available for direct
/// state manipulation (e.g. forcing a refresh token to expire).
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub authenticator: Arc<Authenticator>,
    pub refresh_tokens: Arc<InMemoryRefreshTokenRepository>,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let authenticator = Arc::new(Authenticator::new(TEST_JWT_SECRET));
        let user_repo = Arc::new(InMemoryUserRepository::new());
        let chirp_repo = Arc::new(InMemoryChirpRepository::new());
        let refresh_token_repo = Arc::new(InMemoryRefreshTokenRepository::new());

        let state = AppState {
            user_service: Arc::new(UserService::new(Arc::clone(&user_repo))),
            chirp_service: Arc::new(ChirpService::new(chirp_repo)),
            session_service: Arc::new(SessionService::new(
                user_repo,
                Arc::clone(&refresh_token_repo),
                Arc::clone(&authenticator),
            )),
            authenticator: Arc::clone(&authenticator),
            webhook_api_key: TEST_WEBHOOK_API_KEY.to_string(),
        };

        let router = create_router(state);
        tokio::spawn(async move {
            axum::serve(listener, router)
                .await
                .expect("Server crashed");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            authenticator,
            refresh_tokens: refresh_token_repo,
        }
    }

    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    pub fn put(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.put(format!("{}{}", self.address, path))
    }

    pub fn delete(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.delete(format!("{}{}", self.address, path))
    }

    /// Register a user and return the response data object.
    pub async fn create_user(&self, email: &str, password: &str) -> serde_json::Value {
        let response = self
            .post("/api/users")
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        body["data"].clone()
    }

    /// Log a user in and return the response data object.
    pub async fn login(&self, email: &str, password: &str) -> serde_json::Value {
        let response = self
            .post("/api/login")
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        body["data"].clone()
    }
}

/// In-memory user store.
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == user.email) {
            return Err(UserError::EmailAlreadyExists(
                user.email.as_str().to_string(),
            ));
        }
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.id == *id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.email.as_str() == email).cloned())
    }

    async fn update(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.lock().unwrap();
        if users
            .iter()
            .any(|u| u.id != user.id && u.email == user.email)
        {
            return Err(UserError::EmailAlreadyExists(
                user.email.as_str().to_string(),
            ));
        }
        let existing = users
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or(UserError::NotFound(user.id.to_string()))?;
        *existing = user.clone();
        Ok(user)
    }
}

/// In-memory chirp store.
pub struct InMemoryChirpRepository {
    chirps: Mutex<Vec<Chirp>>,
}

impl InMemoryChirpRepository {
    pub fn new() -> Self {
        Self {
            chirps: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl ChirpRepository for InMemoryChirpRepository {
    async fn create(&self, chirp: Chirp) -> Result<Chirp, ChirpError> {
        self.chirps.lock().unwrap().push(chirp.clone());
        Ok(chirp)
    }

    async fn find_by_id(&self, id: &ChirpId) -> Result<Option<Chirp>, ChirpError> {
        let chirps = self.chirps.lock().unwrap();
        Ok(chirps.iter().find(|c| c.id == *id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Chirp>, ChirpError> {
        let mut chirps = self.chirps.lock().unwrap().clone();
        chirps.sort_by_key(|c| c.created_at);
        Ok(chirps)
    }

    async fn list_by_author(&self, author: &UserId) -> Result<Vec<Chirp>, ChirpError> {
        let mut chirps: Vec<Chirp> = self
            .chirps
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.user_id == *author)
            .cloned()
            .collect();
        chirps.sort_by_key(|c| c.created_at);
        Ok(chirps)
    }

    async fn delete(&self, id: &ChirpId) -> Result<(), ChirpError> {
        let mut chirps = self.chirps.lock().unwrap();
        let before = chirps.len();
        chirps.retain(|c| c.id != *id);
        if chirps.len() == before {
            return Err(ChirpError::NotFound(id.to_string()));
        }
        Ok(())
    }
}

/// In-memory refresh-token store.
pub struct InMemoryRefreshTokenRepository {
    tokens: Mutex<HashMap<String, RefreshTokenRecord>>,
}

impl InMemoryRefreshTokenRepository {
    pub fn new() -> Self {
        Self {
            tokens: Mutex::new(HashMap::new()),
        }
    }

    /// Force a stored token's expiry into the past.
    pub fn expire(&self, token: &str) {
        let mut tokens = self.tokens.lock().unwrap();
        if let Some(record) = tokens.get_mut(token) {
            record.expires_at = Utc::now() - Duration::days(1);
        }
    }

    /// Read a stored record back for assertions.
    pub fn record(&self, token: &str) -> Option<RefreshTokenRecord> {
        self.tokens.lock().unwrap().get(token).cloned()
    }
}

#[async_trait]
impl RefreshTokenRepository for InMemoryRefreshTokenRepository {
    async fn create(&self, record: RefreshTokenRecord) -> Result<RefreshTokenRecord, SessionError> {
        self.tokens
            .lock()
            .unwrap()
            .insert(record.token.clone(), record.clone());
        Ok(record)
    }

    async fn find(&self, token: &str) -> Result<Option<RefreshTokenRecord>, SessionError> {
        Ok(self.tokens.lock().unwrap().get(token).cloned())
    }

    async fn set_revoked(
        &self,
        token: &str,
        revoked_at: DateTime<Utc>,
    ) -> Result<Option<RefreshTokenRecord>, SessionError> {
        let mut tokens = self.tokens.lock().unwrap();
        match tokens.get_mut(token) {
            Some(record) => {
                record.revoked_at = Some(revoked_at);
                Ok(Some(record.clone()))
            }
            None => Ok(None),
        }
    }
}
