use super::{MessagingTransport, TransportError};
use crate::shared::config::TelegramConfig;
use async_trait::async_trait;
use contracts::domain::common::GeoPoint;
use contracts::usecases::u501_client_lookup::{Button, UserId};
use serde::Deserialize;
use serde_json::{json, Value};

/// Клиент Telegram Bot API
pub struct TelegramClient {
    client: reqwest::Client,
    api_url: String,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    ok: bool,
    #[serde(default)]
    result: Value,
    error_code: Option<i64>,
    description: Option<String>,
}

impl TelegramClient {
    pub fn new(config: &TelegramConfig) -> anyhow::Result<Self> {
        // Очищаем токен от невидимых символов и пробелов
        let token = config.bot_token.trim().replace(['\n', '\r', '\t'], "");
        if token.is_empty() {
            anyhow::bail!("Telegram bot token is empty (set telegram.bot_token or TELEGRAM_BOT_TOKEN)");
        }

        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_url: format!("{}/bot{}", config.api_base.trim_end_matches('/'), token),
        })
    }

    /// Вызов метода Bot API
    async fn call(&self, method: &str, payload: Value) -> Result<Value, TransportError> {
        let url = format!("{}/{}", self.api_url, method);

        let response = self
            .client
            .post(&url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TransportError::Timeout
                } else {
                    // URL содержит токен - в ошибку не выводим
                    TransportError::Network(e.without_url().to_string())
                }
            })?;

        let status = response.status();
        let body: ApiResponse = response
            .json()
            .await
            .map_err(|e| TransportError::Decode(e.without_url().to_string()))?;

        if !body.ok {
            return Err(TransportError::Api {
                code: body.error_code.unwrap_or(status.as_u16() as i64),
                description: body.description.unwrap_or_default(),
            });
        }

        Ok(body.result)
    }

    /// Зарегистрировать вебхук
    pub async fn set_webhook(&self, url: &str, secret: Option<&str>) -> Result<(), TransportError> {
        let mut payload = json!({
            "url": url,
            "allowed_updates": ["message", "callback_query"],
        });
        if let Some(secret) = secret {
            payload["secret_token"] = json!(secret);
        }
        self.call("setWebhook", payload).await?;
        tracing::info!("Telegram webhook registered: {}", url);
        Ok(())
    }
}

/// Разметка inline-клавиатуры: одна кнопка в строке
fn inline_keyboard(buttons: &[Button]) -> Value {
    let rows: Vec<Value> = buttons
        .iter()
        .map(|b| json!([{ "text": b.label, "callback_data": b.callback_token }]))
        .collect();
    json!({ "inline_keyboard": rows })
}

#[async_trait]
impl MessagingTransport for TelegramClient {
    async fn send_text(&self, user_id: UserId, text: &str) -> Result<(), TransportError> {
        self.call(
            "sendMessage",
            json!({
                "chat_id": user_id,
                "text": text,
                "disable_web_page_preview": true,
            }),
        )
        .await
        .map(|_| ())
    }

    async fn send_buttons(
        &self,
        user_id: UserId,
        text: &str,
        buttons: &[Button],
    ) -> Result<(), TransportError> {
        self.call(
            "sendMessage",
            json!({
                "chat_id": user_id,
                "text": text,
                "reply_markup": inline_keyboard(buttons),
            }),
        )
        .await
        .map(|_| ())
    }

    async fn send_location(&self, user_id: UserId, point: GeoPoint) -> Result<(), TransportError> {
        self.call(
            "sendLocation",
            json!({
                "chat_id": user_id,
                "latitude": point.latitude,
                "longitude": point.longitude,
            }),
        )
        .await
        .map(|_| ())
    }

    async fn ack(&self, callback_id: &str) -> Result<(), TransportError> {
        self.call(
            "answerCallbackQuery",
            json!({ "callback_query_id": callback_id }),
        )
        .await
        .map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::usecases::u501_client_lookup::CallbackAction;

    fn config(token: &str) -> TelegramConfig {
        TelegramConfig {
            bot_token: token.into(),
            api_base: "https://api.telegram.org/".into(),
            webhook_url: None,
            webhook_secret: None,
            request_timeout_secs: 5,
        }
    }

    #[test]
    fn test_new_requires_token() {
        assert!(TelegramClient::new(&config("  ")).is_err());
        let client = TelegramClient::new(&config(" 123:abc\n")).unwrap();
        assert_eq!(client.api_url, "https://api.telegram.org/bot123:abc");
    }

    #[test]
    fn test_inline_keyboard_one_button_per_row() {
        let buttons = vec![
            Button::new("Cafe Dono", &CallbackAction::StartSearch),
            Button::new(
                "Cafe Dolce",
                &CallbackAction::Select {
                    nonce: "n1".into(),
                    index: 1,
                },
            ),
        ];
        let markup = inline_keyboard(&buttons);
        assert_eq!(
            markup,
            json!({"inline_keyboard": [
                [{"text": "Cafe Dono", "callback_data": "search"}],
                [{"text": "Cafe Dolce", "callback_data": "sel:n1:1"}]
            ]})
        );
    }
}
