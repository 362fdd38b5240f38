use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use serde_json::Value;

use crate::shared::messaging::{parse_update, ParsedUpdate};
use crate::system::state::AppState;

pub const SECRET_HEADER: &str = "x-telegram-bot-api-secret-token";

/// POST /api/telegram/webhook
///
/// Telegram повторяет доставку, пока не получит 200, поэтому ошибки обработки
/// только логируются.
pub async fn webhook(State(state): State<AppState>, headers: HeaderMap, body: Bytes) -> StatusCode {
    if let Some(expected) = state.webhook_secret.as_deref() {
        let provided = headers.get(SECRET_HEADER).and_then(|v| v.to_str().ok());
        if provided != Some(expected) {
            tracing::warn!("Rejected webhook call with invalid secret token");
            return StatusCode::UNAUTHORIZED;
        }
    }

    let update: Value = match serde_json::from_slice(&body) {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!("Webhook body is not JSON: {}", e);
            return StatusCode::OK;
        }
    };

    let result = match parse_update(&update) {
        ParsedUpdate::Event(event) => state.lookup.handle_event(event).await,
        ParsedUpdate::Malformed {
            user_id,
            callback_id,
            reason,
        } => {
            state
                .lookup
                .handle_malformed(user_id, callback_id.as_deref(), &reason)
                .await
        }
        ParsedUpdate::Ignored(reason) => {
            tracing::debug!("Ignored update: {}", reason);
            Ok(())
        }
    };

    if let Err(e) = result {
        tracing::error!("Failed to handle update: {}", e);
    }
    StatusCode::OK
}
