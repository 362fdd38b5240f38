use axum::extract::State;
use axum::Json;
use contracts::usecases::u502_admin_notification::{NotificationRequest, NotificationSummary};

use crate::system::state::AppState;

/// POST /api/notifications/admins
pub async fn notify_admins(
    State(state): State<AppState>,
    Json(request): Json<NotificationRequest>,
) -> Result<Json<NotificationSummary>, axum::http::StatusCode> {
    if request.text.trim().is_empty() {
        return Err(axum::http::StatusCode::BAD_REQUEST);
    }
    Ok(Json(state.notifications.notify_admins(&request.text).await))
}
