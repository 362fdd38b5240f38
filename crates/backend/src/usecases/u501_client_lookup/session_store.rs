use super::session::Session;
use async_trait::async_trait;
use chrono::Utc;
use contracts::usecases::u501_client_lookup::UserId;
use dashmap::DashMap;

/// Хранилище сессий по пользователю
///
/// Реализация в памяти подходит для одного экземпляра сервиса; для нескольких
/// экземпляров нужна реализация поверх общего key-value хранилища.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self, user_id: UserId) -> Option<Session>;

    async fn set(&self, user_id: UserId, session: Session);

    async fn delete(&self, user_id: UserId);

    /// Удалить сессии, не обновлявшиеся дольше `ttl`; возвращает число удалённых
    async fn remove_expired(&self, _ttl: chrono::Duration) -> usize {
        0
    }
}

/// Сессии в памяти процесса; записи разных пользователей не блокируют друг друга
#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: DashMap<UserId, Session>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, user_id: UserId) -> Option<Session> {
        self.sessions.get(&user_id).map(|entry| entry.value().clone())
    }

    async fn set(&self, user_id: UserId, session: Session) {
        self.sessions.insert(user_id, session);
    }

    async fn delete(&self, user_id: UserId) {
        self.sessions.remove(&user_id);
    }

    async fn remove_expired(&self, ttl: chrono::Duration) -> usize {
        let now = Utc::now();
        let before = self.sessions.len();
        self.sessions.retain(|_, session| !session.is_expired(ttl, now));
        before.saturating_sub(self.sessions.len())
    }
}
