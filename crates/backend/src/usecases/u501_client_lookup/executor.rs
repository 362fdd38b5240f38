use super::details::{format_details, resolve_details};
use super::error::BotError;
use super::grouping::{flatten_groups, group_candidates, single_candidate};
use super::messages;
use super::session::{new_nonce, Session, SessionState};
use super::session_store::SessionStore;
use crate::domain::a001_client;
use crate::shared::config::BotConfig;
use crate::shared::data::{DocumentStore, StoreError};
use crate::shared::messaging::MessagingTransport;
use chrono::Utc;
use contracts::domain::a001_client::Client;
use contracts::usecases::common::UseCaseMetadata;
use contracts::usecases::u501_client_lookup::{
    Button, CallbackAction, ClientLookup, InboundEvent, UserId,
};
use std::sync::Arc;
use std::time::Duration;

/// Параметры диалога поиска
#[derive(Debug, Clone)]
pub struct LookupSettings {
    /// Максимальная длина подписи кнопки, символов
    pub button_label_limit: usize,
    /// Максимум кнопок выбора в одном сообщении
    pub max_choices: usize,
    /// Таймаут одного обращения к хранилищу при сборке карточки
    pub lookup_timeout: Duration,
    /// Таймаут чтения клиентов при поиске
    pub search_timeout: Duration,
    /// Время жизни неактивной сессии
    pub session_ttl: chrono::Duration,
}

impl From<&BotConfig> for LookupSettings {
    fn from(config: &BotConfig) -> Self {
        Self {
            button_label_limit: config.button_label_limit,
            max_choices: config.max_choices,
            lookup_timeout: config.lookup_timeout(),
            search_timeout: config.search_timeout(),
            session_ttl: config.session_ttl(),
        }
    }
}

impl Default for LookupSettings {
    fn default() -> Self {
        Self::from(&BotConfig::default())
    }
}

/// Executor для UseCase поиска ресторана в боте
///
/// Каждое событие обрабатывается до конца независимо; состояние между
/// событиями хранится только в `SessionStore`.
#[derive(Clone)]
pub struct ClientLookupExecutor {
    store: Arc<dyn DocumentStore>,
    transport: Arc<dyn MessagingTransport>,
    sessions: Arc<dyn SessionStore>,
    settings: LookupSettings,
}

impl ClientLookupExecutor {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        transport: Arc<dyn MessagingTransport>,
        sessions: Arc<dyn SessionStore>,
        settings: LookupSettings,
    ) -> Self {
        Self {
            store,
            transport,
            sessions,
            settings,
        }
    }

    /// Обработать входящее событие.
    ///
    /// Ошибки пользователя и хранилища превращаются в ответные сообщения;
    /// наружу возвращается только ошибка отправки.
    pub async fn handle_event(&self, event: InboundEvent) -> Result<(), BotError> {
        let user_id = event.user_id();

        if let InboundEvent::Callback {
            callback_id: Some(callback_id),
            ..
        } = &event
        {
            self.ack(callback_id).await;
        }

        let session = self.load_session(user_id).await;
        tracing::debug!(
            "{}: user {} in state {}",
            ClientLookup::full_name(),
            user_id,
            session.state.name()
        );

        let result = match &event {
            InboundEvent::Command { .. } => self.on_command(user_id, &event).await,
            InboundEvent::Text { text, .. } => self.on_text(user_id, text, &session).await,
            InboundEvent::Callback { token, .. } => {
                self.on_callback(user_id, token, &session).await
            }
        };

        self.recover(user_id, result).await
    }

    /// Событие от известного пользователя без данных для обработки
    pub async fn handle_malformed(
        &self,
        user_id: UserId,
        callback_id: Option<&str>,
        reason: &str,
    ) -> Result<(), BotError> {
        if let Some(callback_id) = callback_id {
            self.ack(callback_id).await;
        }
        self.recover(user_id, Err(BotError::MalformedInput(reason.to_string())))
            .await
    }

    async fn recover(&self, user_id: UserId, result: Result<(), BotError>) -> Result<(), BotError> {
        match result {
            Ok(()) => Ok(()),
            Err(BotError::NotFound { query }) => {
                tracing::info!("User {}: nothing found for '{}'", user_id, query);
                // остаёмся в ожидании запроса, пользователь может повторить
                self.sessions.set(user_id, Session::awaiting_query()).await;
                self.send_text(user_id, &messages::not_found(&query)).await
            }
            Err(BotError::SessionExpired) => {
                tracing::info!("User {}: session expired or stale selection", user_id);
                self.sessions.delete(user_id).await;
                self.send_text(user_id, messages::SESSION_EXPIRED).await
            }
            Err(BotError::MalformedInput(reason)) => {
                tracing::warn!("User {}: malformed input: {}", user_id, reason);
                self.send_text(user_id, messages::GUIDANCE).await
            }
            Err(BotError::Store(e)) => {
                tracing::error!("User {}: store failure: {}", user_id, e);
                self.sessions.delete(user_id).await;
                self.send_text(user_id, messages::SERVICE_UNAVAILABLE).await
            }
            Err(e @ BotError::Transport(_)) => Err(e),
        }
    }

    async fn load_session(&self, user_id: UserId) -> Session {
        match self.sessions.get(user_id).await {
            Some(session) if session.is_expired(self.settings.session_ttl, Utc::now()) => {
                self.sessions.delete(user_id).await;
                Session::idle()
            }
            Some(session) => session,
            None => Session::idle(),
        }
    }

    async fn ack(&self, callback_id: &str) {
        if let Err(e) = self.transport.ack(callback_id).await {
            tracing::warn!("Failed to ack callback {}: {}", callback_id, e);
        }
    }

    async fn send_text(&self, user_id: UserId, text: &str) -> Result<(), BotError> {
        self.transport
            .send_text(user_id, text)
            .await
            .map_err(BotError::from)
    }

    async fn on_command(&self, user_id: UserId, event: &InboundEvent) -> Result<(), BotError> {
        match event.command_name().as_deref() {
            Some("start") => {
                self.sessions.delete(user_id).await;
                let entry = Button::new(messages::ENTRY_BUTTON, &CallbackAction::StartSearch);
                self.transport
                    .send_buttons(user_id, messages::WELCOME, &[entry])
                    .await?;
                Ok(())
            }
            Some("search") => self.ask_query(user_id).await,
            Some("cancel") => {
                self.sessions.delete(user_id).await;
                self.send_text(user_id, messages::CANCELLED).await
            }
            _ => self.send_text(user_id, messages::HELP).await,
        }
    }

    async fn ask_query(&self, user_id: UserId) -> Result<(), BotError> {
        self.sessions.set(user_id, Session::awaiting_query()).await;
        self.send_text(user_id, messages::ASK_QUERY).await
    }

    async fn on_text(&self, user_id: UserId, text: &str, session: &Session) -> Result<(), BotError> {
        match &session.state {
            SessionState::Idle => self.send_text(user_id, messages::HELP).await,
            SessionState::AwaitingQuery => self.search(user_id, text).await,
            // список вариантов не трогаем до выбора
            SessionState::AwaitingSelection { .. } => {
                self.send_text(user_id, messages::CHOOSE_FROM_LIST).await
            }
        }
    }

    async fn on_callback(
        &self,
        user_id: UserId,
        token: &str,
        session: &Session,
    ) -> Result<(), BotError> {
        let action = CallbackAction::parse(token)
            .ok_or_else(|| BotError::MalformedInput(format!("unknown callback token '{}'", token)))?;

        match action {
            CallbackAction::StartSearch => self.ask_query(user_id).await,
            CallbackAction::Select { nonce, index } => {
                let client = session
                    .selection(&nonce, index)
                    .cloned()
                    .ok_or(BotError::SessionExpired)?;
                self.sessions.delete(user_id).await;
                self.send_client(user_id, &client).await
            }
        }
    }

    async fn search(&self, user_id: UserId, query: &str) -> Result<(), BotError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(BotError::MalformedInput("empty query".into()));
        }

        // полное чтение коллекции; зависшее хранилище не должно держать сессию
        let matches = tokio::time::timeout(
            self.settings.search_timeout,
            a001_client::service::search(self.store.as_ref(), query),
        )
        .await
        .map_err(|_| StoreError::Timeout)??;
        if matches.is_empty() {
            return Err(BotError::NotFound {
                query: query.to_string(),
            });
        }

        tracing::info!(
            "User {}: query '{}' matched {} clients",
            user_id,
            query,
            matches.len()
        );

        let groups = group_candidates(matches);
        if let Some(client) = single_candidate(&groups) {
            let client = client.clone();
            self.sessions.delete(user_id).await;
            return self.send_client(user_id, &client).await;
        }

        self.present_choices(user_id, flatten_groups(groups)).await
    }

    async fn present_choices(&self, user_id: UserId, mut pending: Vec<Client>) -> Result<(), BotError> {
        let total = pending.len();
        let limit = self.settings.max_choices.max(1);
        pending.truncate(limit);

        let text = if total > pending.len() {
            tracing::info!(
                "User {}: showing {} of {} candidates",
                user_id,
                pending.len(),
                total
            );
            messages::too_many_choices(pending.len(), total)
        } else {
            messages::CHOOSE_ONE.to_string()
        };

        let nonce = new_nonce();
        let buttons: Vec<Button> = pending
            .iter()
            .enumerate()
            .map(|(index, client)| {
                Button::new(
                    messages::choice_label(client, self.settings.button_label_limit),
                    &CallbackAction::Select {
                        nonce: nonce.clone(),
                        index,
                    },
                )
            })
            .collect();

        self.sessions
            .set(user_id, Session::selecting(nonce, pending))
            .await;

        if let Err(e) = self
            .transport
            .send_buttons(user_id, &text, &buttons)
            .await
        {
            // пользователь не увидел варианты - выбирать нечего
            self.sessions.delete(user_id).await;
            return Err(e.into());
        }
        Ok(())
    }

    /// Отправить карточку клиента и, если есть, его местоположение
    async fn send_client(&self, user_id: UserId, client: &Client) -> Result<(), BotError> {
        let details =
            resolve_details(self.store.as_ref(), client, self.settings.lookup_timeout).await;
        self.send_text(user_id, &format_details(&details)).await?;

        if let Some(point) = client.location {
            if let Err(e) = self.transport.send_location(user_id, point).await {
                tracing::warn!("User {}: failed to send location: {}", user_id, e);
            }
        }
        Ok(())
    }
}
