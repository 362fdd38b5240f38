use crate::shared::data::StoreError;
use crate::shared::messaging::TransportError;
use thiserror::Error;

/// Ошибки обработки события ботом
///
/// Все, кроме `Transport`, обрабатываются внутри и превращаются в ответ пользователю.
#[derive(Debug, Error)]
pub enum BotError {
    /// Поиск ничего не нашёл; пользователь может повторить запрос
    #[error("Nothing found for query '{query}'")]
    NotFound { query: String },

    /// Сессия или выбранный вариант больше не существуют
    #[error("Session expired or selection is stale")]
    SessionExpired,

    /// Событие без необходимых данных
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Store failure: {0}")]
    Store(#[from] StoreError),

    #[error("Transport failure: {0}")]
    Transport(#[from] TransportError),
}

impl BotError {
    /// Отказ внешней зависимости (хранилище или мессенджер)
    pub fn is_dependency_failure(&self) -> bool {
        matches!(self, BotError::Store(_) | BotError::Transport(_))
    }
}
