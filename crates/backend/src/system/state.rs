use crate::shared::data::DocumentStore;
use crate::usecases::u501_client_lookup::ClientLookupExecutor;
use crate::usecases::u502_admin_notification::NotificationExecutor;
use std::sync::Arc;

/// Общее состояние HTTP-обработчиков
#[derive(Clone)]
pub struct AppState {
    pub lookup: Arc<ClientLookupExecutor>,
    pub notifications: Arc<NotificationExecutor>,
    pub store: Arc<dyn DocumentStore>,
    /// Ожидаемое значение X-Telegram-Bot-Api-Secret-Token; `None` - не проверять
    pub webhook_secret: Option<String>,
}
