use serde::{Deserialize, Serialize};

/// Inline-кнопка: подпись и токен обратного вызова
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Button {
    pub label: String,
    #[serde(rename = "callbackToken")]
    pub callback_token: String,
}

impl Button {
    pub fn new(label: impl Into<String>, action: &CallbackAction) -> Self {
        Self {
            label: label.into(),
            callback_token: action.to_token(),
        }
    }
}

const START_SEARCH_TOKEN: &str = "search";
const SELECT_PREFIX: &str = "sel";

/// Действие, закодированное в токене кнопки
///
/// Формат выбора: `sel:<nonce>:<index>`. Nonce привязывает индекс к
/// конкретному списку вариантов, показанному пользователю.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackAction {
    /// Кнопка "Найти ресторан"
    StartSearch,
    /// Выбор варианта из списка
    Select { nonce: String, index: usize },
}

impl CallbackAction {
    pub fn to_token(&self) -> String {
        match self {
            CallbackAction::StartSearch => START_SEARCH_TOKEN.to_string(),
            CallbackAction::Select { nonce, index } => {
                format!("{}:{}:{}", SELECT_PREFIX, nonce, index)
            }
        }
    }

    /// Разобрать токен; `None` для неизвестного формата
    pub fn parse(token: &str) -> Option<Self> {
        let token = token.trim();
        if token == START_SEARCH_TOKEN {
            return Some(CallbackAction::StartSearch);
        }

        let mut parts = token.splitn(3, ':');
        if parts.next()? != SELECT_PREFIX {
            return None;
        }
        let nonce = parts.next()?;
        let index = parts.next()?.parse::<usize>().ok()?;
        if nonce.is_empty() {
            return None;
        }
        Some(CallbackAction::Select {
            nonce: nonce.to_string(),
            index,
        })
    }
}
