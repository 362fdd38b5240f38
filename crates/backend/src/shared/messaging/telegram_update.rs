//! Разбор входящих Telegram Update в события бота.

use contracts::usecases::u501_client_lookup::{InboundEvent, UserId};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
struct Update {
    #[allow(dead_code)]
    update_id: Option<i64>,
    message: Option<Message>,
    callback_query: Option<CallbackQuery>,
}

#[derive(Debug, Deserialize)]
struct Message {
    chat: Option<Chat>,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Chat {
    id: i64,
}

#[derive(Debug, Deserialize)]
struct User {
    id: i64,
}

#[derive(Debug, Deserialize)]
struct CallbackQuery {
    id: String,
    from: Option<User>,
    message: Option<Message>,
    data: Option<String>,
}

/// Результат разбора Update
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedUpdate {
    /// Событие для обработки ботом
    Event(InboundEvent),
    /// Отправитель известен, но данных для обработки нет
    Malformed {
        user_id: UserId,
        callback_id: Option<String>,
        reason: String,
    },
    /// Некому отвечать (нет отправителя или неподдерживаемый тип)
    Ignored(String),
}

pub fn parse_update(value: &Value) -> ParsedUpdate {
    let update: Update = match serde_json::from_value(value.clone()) {
        Ok(u) => u,
        Err(e) => return ParsedUpdate::Ignored(format!("invalid update: {}", e)),
    };

    if let Some(query) = update.callback_query {
        let user_id = query
            .message
            .as_ref()
            .and_then(|m| m.chat.as_ref())
            .map(|c| c.id)
            .or_else(|| query.from.as_ref().map(|u| u.id));

        let Some(user_id) = user_id else {
            return ParsedUpdate::Ignored("callback without sender".into());
        };

        return match query.data.filter(|d| !d.trim().is_empty()) {
            Some(token) => ParsedUpdate::Event(InboundEvent::Callback {
                user_id,
                token,
                callback_id: Some(query.id),
            }),
            None => ParsedUpdate::Malformed {
                user_id,
                callback_id: Some(query.id),
                reason: "callback without data".into(),
            },
        };
    }

    if let Some(message) = update.message {
        let Some(chat) = message.chat else {
            return ParsedUpdate::Ignored("message without chat".into());
        };

        return match message.text.filter(|t| !t.trim().is_empty()) {
            Some(text) => ParsedUpdate::Event(InboundEvent::from_text(chat.id, text)),
            None => ParsedUpdate::Malformed {
                user_id: chat.id,
                callback_id: None,
                reason: "message without text".into(),
            },
        };
    }

    ParsedUpdate::Ignored("unsupported update type".into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_and_command_messages() {
        let update = json!({
            "update_id": 1,
            "message": {"message_id": 5, "chat": {"id": 42, "type": "private"}, "text": "Cafe Dono"}
        });
        assert_eq!(
            parse_update(&update),
            ParsedUpdate::Event(InboundEvent::Text {
                user_id: 42,
                text: "Cafe Dono".into()
            })
        );

        let update = json!({"update_id": 2, "message": {"chat": {"id": 42}, "text": "/start"}});
        assert!(matches!(
            parse_update(&update),
            ParsedUpdate::Event(InboundEvent::Command { user_id: 42, .. })
        ));
    }

    #[test]
    fn test_callback_query() {
        let update = json!({
            "update_id": 3,
            "callback_query": {
                "id": "cb-1",
                "from": {"id": 7},
                "message": {"chat": {"id": 42}},
                "data": "sel:abc:0"
            }
        });
        assert_eq!(
            parse_update(&update),
            ParsedUpdate::Event(InboundEvent::Callback {
                user_id: 42,
                token: "sel:abc:0".into(),
                callback_id: Some("cb-1".into()),
            })
        );
    }

    #[test]
    fn test_malformed_and_ignored() {
        let sticker = json!({"update_id": 4, "message": {"chat": {"id": 42}, "sticker": {}}});
        assert!(matches!(
            parse_update(&sticker),
            ParsedUpdate::Malformed { user_id: 42, callback_id: None, .. }
        ));

        let no_data = json!({"update_id": 5, "callback_query": {"id": "cb", "from": {"id": 7}}});
        assert!(matches!(
            parse_update(&no_data),
            ParsedUpdate::Malformed { user_id: 7, .. }
        ));

        assert!(matches!(
            parse_update(&json!({"update_id": 6, "edited_message": {}})),
            ParsedUpdate::Ignored(_)
        ));
        assert!(matches!(parse_update(&json!("garbage")), ParsedUpdate::Ignored(_)));
    }
}
