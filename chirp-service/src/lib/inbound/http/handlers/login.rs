use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::session::models::AuthenticatedSession;
use crate::domain::user::models::EmailAddress;
use crate::inbound::http::router::AppState;

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequestBody>,
) -> Result<ApiSuccess<LoginResponseData>, ApiError> {
    // An unparseable email cannot belong to an account; present it exactly
    // like a failed credential check.
    let email = EmailAddress::new(body.email)
        .map_err(|_| ApiError::Unauthorized("Invalid credentials".to_string()))?;

    state
        .session_service
        .login(&email, body.password, body.expires_in_seconds)
        .await
        .map_err(ApiError::from)
        .map(|ref session| ApiSuccess::new(StatusCode::OK, session.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequestBody {
    email: String,
    password: String,
    /// Optional requested access-token lifetime; values of zero or above
    /// the one-hour bound are clamped to the bound.
    expires_in_seconds: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub email: String,
    pub is_premium: bool,
    pub token: String,
    pub refresh_token: String,
}

impl From<&AuthenticatedSession> for LoginResponseData {
    fn from(session: &AuthenticatedSession) -> Self {
        Self {
            id: session.user.id.to_string(),
            created_at: session.user.created_at,
            updated_at: session.user.updated_at,
            email: session.user.email.as_str().to_string(),
            is_premium: session.user.is_premium,
            token: session.access_token.clone(),
            refresh_token: session.refresh_token.clone(),
        }
    }
}
