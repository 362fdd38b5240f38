use crate::usecases::u501_client_lookup::SessionStore;
use std::sync::Arc;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info};

/// Фоновый воркер, удаляющий брошенные сессии.
pub struct SessionCleanupWorker {
    sessions: Arc<dyn SessionStore>,
    ttl: chrono::Duration,
    interval_seconds: u64,
}

impl SessionCleanupWorker {
    pub fn new(sessions: Arc<dyn SessionStore>, ttl: chrono::Duration, interval_seconds: u64) -> Self {
        Self {
            sessions,
            ttl,
            interval_seconds,
        }
    }

    /// Одна проверка; возвращает число удалённых сессий
    pub async fn run_once(&self) -> usize {
        let removed = self.sessions.remove_expired(self.ttl).await;
        if removed > 0 {
            info!("Removed {} expired sessions", removed);
        } else {
            debug!("No expired sessions");
        }
        removed
    }

    /// Запускает цикл очистки.
    pub async fn run_loop(&self) {
        info!(
            "Session cleanup worker started with interval {} seconds",
            self.interval_seconds
        );
        let mut interval = time::interval(time::Duration::from_secs(self.interval_seconds.max(1)));
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            interval.tick().await;
            self.run_once().await;
        }
    }
}
