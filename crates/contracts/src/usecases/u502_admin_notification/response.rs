use serde::{Deserialize, Serialize};

/// Итог рассылки
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationSummary {
    pub total: usize,
    pub sent: usize,
    pub failed: usize,
}
