//! Транспорт для тестов: запоминает все исходящие сообщения.

use super::{MessagingTransport, TransportError};
use async_trait::async_trait;
use contracts::domain::common::GeoPoint;
use contracts::usecases::u501_client_lookup::{Button, UserId};
use std::collections::HashSet;
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq)]
pub enum Sent {
    Text { user_id: UserId, text: String },
    Buttons { user_id: UserId, text: String, buttons: Vec<Button> },
    Location { user_id: UserId, point: GeoPoint },
    Ack { callback_id: String },
}

#[derive(Default)]
pub struct RecordingTransport {
    sent: Mutex<Vec<Sent>>,
    failing_users: HashSet<UserId>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Отправка этим пользователям завершается ошибкой
    pub fn failing_for(users: &[UserId]) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            failing_users: users.iter().copied().collect(),
        }
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.sent.lock().unwrap().clear();
    }

    /// Тексты всех сообщений (включая сообщения с кнопками)
    pub fn texts(&self) -> Vec<String> {
        self.sent()
            .into_iter()
            .filter_map(|s| match s {
                Sent::Text { text, .. } | Sent::Buttons { text, .. } => Some(text),
                _ => None,
            })
            .collect()
    }

    /// Кнопки последнего сообщения с кнопками
    pub fn last_buttons(&self) -> Vec<Button> {
        self.sent()
            .into_iter()
            .rev()
            .find_map(|s| match s {
                Sent::Buttons { buttons, .. } => Some(buttons),
                _ => None,
            })
            .unwrap_or_default()
    }

    fn record(&self, user_id: Option<UserId>, item: Sent) -> Result<(), TransportError> {
        if let Some(user_id) = user_id {
            if self.failing_users.contains(&user_id) {
                return Err(TransportError::Api {
                    code: 403,
                    description: "Forbidden: bot was blocked by the user".into(),
                });
            }
        }
        self.sent.lock().unwrap().push(item);
        Ok(())
    }
}

#[async_trait]
impl MessagingTransport for RecordingTransport {
    async fn send_text(&self, user_id: UserId, text: &str) -> Result<(), TransportError> {
        self.record(
            Some(user_id),
            Sent::Text {
                user_id,
                text: text.to_string(),
            },
        )
    }

    async fn send_buttons(
        &self,
        user_id: UserId,
        text: &str,
        buttons: &[Button],
    ) -> Result<(), TransportError> {
        self.record(
            Some(user_id),
            Sent::Buttons {
                user_id,
                text: text.to_string(),
                buttons: buttons.to_vec(),
            },
        )
    }

    async fn send_location(&self, user_id: UserId, point: GeoPoint) -> Result<(), TransportError> {
        self.record(Some(user_id), Sent::Location { user_id, point })
    }

    async fn ack(&self, callback_id: &str) -> Result<(), TransportError> {
        self.record(
            None,
            Sent::Ack {
                callback_id: callback_id.to_string(),
            },
        )
    }
}
