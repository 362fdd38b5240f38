use serde::{Deserialize, Serialize};

/// Идентификатор пользователя (чата) в мессенджере
pub type UserId = i64;

/// Входящее событие от мессенджера
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum InboundEvent {
    /// Команда вида `/start`
    Command {
        #[serde(rename = "userId")]
        user_id: UserId,
        text: String,
    },

    /// Произвольный текст
    Text {
        #[serde(rename = "userId")]
        user_id: UserId,
        text: String,
    },

    /// Нажатие inline-кнопки
    Callback {
        #[serde(rename = "userId")]
        user_id: UserId,
        token: String,
        /// ID callback-запроса для подтверждения (ack)
        #[serde(rename = "callbackId", default)]
        callback_id: Option<String>,
    },
}

impl InboundEvent {
    pub fn user_id(&self) -> UserId {
        match self {
            InboundEvent::Command { user_id, .. }
            | InboundEvent::Text { user_id, .. }
            | InboundEvent::Callback { user_id, .. } => *user_id,
        }
    }

    /// Классифицирует текст сообщения: команда начинается с `/`
    pub fn from_text(user_id: UserId, text: impl Into<String>) -> Self {
        let text = text.into();
        if text.trim_start().starts_with('/') {
            InboundEvent::Command { user_id, text }
        } else {
            InboundEvent::Text { user_id, text }
        }
    }

    /// Имя команды без `/` и суффикса `@botname`, в нижнем регистре
    pub fn command_name(&self) -> Option<String> {
        let InboundEvent::Command { text, .. } = self else {
            return None;
        };
        let head = text.trim().trim_start_matches('/').split_whitespace().next()?;
        let name = head.split('@').next().unwrap_or(head);
        Some(name.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_tagged_events() {
        let ev: InboundEvent =
            serde_json::from_str(r#"{"kind":"text","userId":7,"text":"Dono"}"#).unwrap();
        assert_eq!(
            ev,
            InboundEvent::Text {
                user_id: 7,
                text: "Dono".into()
            }
        );

        let ev: InboundEvent =
            serde_json::from_str(r#"{"kind":"callback","userId":7,"token":"search"}"#).unwrap();
        assert_eq!(ev.user_id(), 7);
        assert!(matches!(ev, InboundEvent::Callback { callback_id: None, .. }));
    }

    #[test]
    fn test_from_text_and_command_name() {
        let ev = InboundEvent::from_text(1, "/Start@paper_bot extra");
        assert_eq!(ev.command_name().as_deref(), Some("start"));

        let ev = InboundEvent::from_text(1, "Cafe Dono");
        assert!(matches!(ev, InboundEvent::Text { .. }));
        assert_eq!(ev.command_name(), None);
    }
}
