use super::state::AppState;
use super::tasks::SessionCleanupWorker;
use crate::shared::config::{resolve_data_path, Config, StoreConfig, StoreKind};
use crate::shared::data::{DocumentStore, FirestoreStore, InMemoryDocumentStore};
use crate::shared::messaging::{MessagingTransport, TelegramClient};
use crate::usecases::u501_client_lookup::{
    ClientLookupExecutor, InMemorySessionStore, LookupSettings, SessionStore,
};
use crate::usecases::u502_admin_notification::NotificationExecutor;
use anyhow::{anyhow, Result};
use std::sync::Arc;

/// Создать хранилище документов по настройкам
pub fn build_store(config: &StoreConfig) -> Result<Arc<dyn DocumentStore>> {
    match config.kind {
        StoreKind::Json => {
            let path = config
                .json_path
                .as_deref()
                .ok_or_else(|| anyhow!("store.json_path is required for kind = \"json\""))?;
            let path = resolve_data_path(path);
            let store = InMemoryDocumentStore::load_from_file(&path)?;
            tracing::info!("Using JSON snapshot store: {}", path.display());
            Ok(Arc::new(store))
        }
        StoreKind::Firestore => {
            let firestore = config
                .firestore
                .as_ref()
                .ok_or_else(|| anyhow!("[store.firestore] section is required for kind = \"firestore\""))?;
            tracing::info!(
                "Using Firestore store: project {}, database {}",
                firestore.project_id,
                firestore.database
            );
            Ok(Arc::new(FirestoreStore::new(firestore)?))
        }
    }
}

/// Собрать состояние обработчиков из готовых зависимостей
pub fn build_state(
    config: &Config,
    store: Arc<dyn DocumentStore>,
    transport: Arc<dyn MessagingTransport>,
    sessions: Arc<dyn SessionStore>,
) -> AppState {
    let lookup = ClientLookupExecutor::new(
        store.clone(),
        transport.clone(),
        sessions,
        LookupSettings::from(&config.bot),
    );
    let notifications = NotificationExecutor::new(
        transport,
        config.bot.admin_chat_ids.clone(),
        config.bot.send_timeout(),
    );

    AppState {
        lookup: Arc::new(lookup),
        notifications: Arc::new(notifications),
        store,
        webhook_secret: config
            .telegram
            .webhook_secret
            .clone()
            .filter(|s| !s.trim().is_empty()),
    }
}

/// Инициализация сервиса: хранилище, Telegram, сессии, фоновая очистка, вебхук
pub async fn initialize(config: &Config) -> Result<AppState> {
    let store = build_store(&config.store)?;
    let telegram = Arc::new(TelegramClient::new(&config.telegram)?);
    let sessions = Arc::new(InMemorySessionStore::new());

    let worker = SessionCleanupWorker::new(
        sessions.clone(),
        config.bot.session_ttl(),
        config.bot.cleanup_interval_secs,
    );
    tokio::spawn(async move { worker.run_loop().await });

    if let Some(url) = config
        .telegram
        .webhook_url
        .as_deref()
        .filter(|u| !u.trim().is_empty())
    {
        // без вебхука сервис всё равно отвечает на HTTP API
        if let Err(e) = telegram
            .set_webhook(url, config.telegram.webhook_secret.as_deref())
            .await
        {
            tracing::error!("Failed to register Telegram webhook: {}", e);
        }
    }

    if config.bot.admin_chat_ids.is_empty() {
        tracing::warn!("bot.admin_chat_ids is empty, admin notifications are disabled");
    }

    Ok(build_state(config, store, telegram, sessions))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::config::parse_config;

    #[test]
    fn test_json_store_requires_path() {
        let config = StoreConfig {
            kind: StoreKind::Json,
            json_path: None,
            firestore: None,
        };
        assert!(build_store(&config).is_err());
    }

    #[test]
    fn test_firestore_store_requires_section() {
        let config = StoreConfig {
            kind: StoreKind::Firestore,
            json_path: None,
            firestore: None,
        };
        assert!(build_store(&config).is_err());
    }

    #[test]
    fn test_blank_webhook_secret_disables_check() {
        let mut config = parse_config(crate::shared::config::DEFAULT_CONFIG).unwrap();
        config.telegram.webhook_secret = Some("  ".into());

        let state = build_state(
            &config,
            Arc::new(InMemoryDocumentStore::new()),
            Arc::new(crate::shared::messaging::recording::RecordingTransport::new()),
            Arc::new(InMemorySessionStore::new()),
        );
        assert!(state.webhook_secret.is_none());
    }
}
