pub mod telegram;
pub mod telegram_update;

#[cfg(test)]
pub mod recording;

pub use telegram::TelegramClient;
pub use telegram_update::{parse_update, ParsedUpdate};

use async_trait::async_trait;
use contracts::domain::common::GeoPoint;
use contracts::usecases::u501_client_lookup::{Button, UserId};
use thiserror::Error;

/// Ошибки отправки через мессенджер
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out")]
    Timeout,

    #[error("API error {code}: {description}")]
    Api { code: i64, description: String },

    #[error("Cannot decode response: {0}")]
    Decode(String),
}

/// Исходящий канал мессенджера
#[async_trait]
pub trait MessagingTransport: Send + Sync {
    /// Отправить текстовое сообщение
    async fn send_text(&self, user_id: UserId, text: &str) -> Result<(), TransportError>;

    /// Отправить сообщение с inline-кнопками (по одной в строке)
    async fn send_buttons(
        &self,
        user_id: UserId,
        text: &str,
        buttons: &[Button],
    ) -> Result<(), TransportError>;

    /// Отправить точку на карте
    async fn send_location(&self, user_id: UserId, point: GeoPoint) -> Result<(), TransportError>;

    /// Подтвердить получение callback-запроса
    async fn ack(&self, callback_id: &str) -> Result<(), TransportError>;
}
