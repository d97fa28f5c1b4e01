use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::router::AppState;

/// Revoke the refresh token carried in the bearer header.
///
/// Revocation is terminal; the token can never become valid again.
pub async fn revoke(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<ApiSuccess<()>, ApiError> {
    let refresh_token =
        auth::header::extract_bearer(&headers).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    state
        .session_service
        .revoke(&refresh_token)
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::new(StatusCode::NO_CONTENT, ()))
}
