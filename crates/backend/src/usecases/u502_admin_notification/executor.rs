use crate::shared::messaging::MessagingTransport;
use contracts::usecases::common::UseCaseMetadata;
use contracts::usecases::u501_client_lookup::UserId;
use contracts::usecases::u502_admin_notification::{AdminNotification, NotificationSummary};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;

/// Executor для рассылки уведомлений администраторам
///
/// Все отправки идут параллельно, каждая со своим таймаутом.
/// Ошибка одной отправки не отменяет остальные.
#[derive(Clone)]
pub struct NotificationExecutor {
    transport: Arc<dyn MessagingTransport>,
    admin_ids: Vec<UserId>,
    send_timeout: Duration,
}

impl NotificationExecutor {
    pub fn new(
        transport: Arc<dyn MessagingTransport>,
        admin_ids: Vec<UserId>,
        send_timeout: Duration,
    ) -> Self {
        Self {
            transport,
            admin_ids,
            send_timeout,
        }
    }

    pub fn admin_count(&self) -> usize {
        self.admin_ids.len()
    }

    /// Разослать текст всем администраторам и дождаться всех отправок
    pub async fn notify_admins(&self, text: &str) -> NotificationSummary {
        let mut summary = NotificationSummary {
            total: self.admin_ids.len(),
            ..Default::default()
        };
        if self.admin_ids.is_empty() {
            tracing::warn!("{}: no admin chats configured", AdminNotification::full_name());
            return summary;
        }

        let mut tasks = JoinSet::new();
        for &admin_id in &self.admin_ids {
            let transport = self.transport.clone();
            let text = text.to_string();
            let timeout = self.send_timeout;
            tasks.spawn(async move {
                match tokio::time::timeout(timeout, transport.send_text(admin_id, &text)).await {
                    Ok(Ok(())) => true,
                    Ok(Err(e)) => {
                        tracing::warn!("Notification to admin {} failed: {}", admin_id, e);
                        false
                    }
                    Err(_) => {
                        tracing::warn!(
                            "Notification to admin {} timed out after {:?}",
                            admin_id,
                            timeout
                        );
                        false
                    }
                }
            });
        }

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(true) => summary.sent += 1,
                Ok(false) => summary.failed += 1,
                Err(e) => {
                    tracing::error!("Notification task panicked: {}", e);
                    summary.failed += 1;
                }
            }
        }

        tracing::info!(
            "{}: sent {}/{} (failed {})",
            AdminNotification::full_name(),
            summary.sent,
            summary.total,
            summary.failed
        );
        summary
    }
}
