use serde::{Deserialize, Serialize};

/// Запрос на рассылку уведомления администраторам
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationRequest {
    pub text: String,
}
