use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::UserId;
use crate::inbound::http::router::AppState;

/// Event name the payment provider sends when a user buys a membership.
const USER_UPGRADED_EVENT: &str = "user.upgraded";

/// Inbound webhook from the payment provider.
///
/// Authenticated with the `ApiKey` scheme against the key configured at
/// startup; all outcomes the provider should not retry are acknowledged
/// with 204.
pub async fn payment_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<PaymentWebhookRequest>,
) -> Result<ApiSuccess<()>, ApiError> {
    let api_key = auth::header::extract_api_key(&headers)
        .map_err(|e| ApiError::Unauthorized(e.to_string()))?;

    if api_key != state.webhook_api_key {
        return Err(ApiError::Unauthorized("Incorrect API key".to_string()));
    }

    if body.event != USER_UPGRADED_EVENT {
        return Ok(ApiSuccess::new(StatusCode::NO_CONTENT, ()));
    }

    let user_id =
        UserId::from_string(&body.data.user_id).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    state
        .user_service
        .upgrade_to_premium(&user_id)
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::new(StatusCode::NO_CONTENT, ()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PaymentWebhookRequest {
    event: String,
    data: PaymentWebhookData,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PaymentWebhookData {
    user_id: String,
}
