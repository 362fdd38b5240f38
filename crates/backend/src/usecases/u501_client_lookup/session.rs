use chrono::{DateTime, Utc};
use contracts::domain::a001_client::Client;

/// Состояние диалога с пользователем
///
/// Список вариантов существует только в состоянии выбора.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Idle,
    AwaitingQuery,
    AwaitingSelection {
        /// Привязывает кнопки выбора к этому списку
        nonce: String,
        pending: Vec<Client>,
    },
}

impl SessionState {
    pub fn name(&self) -> &'static str {
        match self {
            SessionState::Idle => "idle",
            SessionState::AwaitingQuery => "awaiting_query",
            SessionState::AwaitingSelection { .. } => "awaiting_selection",
        }
    }
}

/// Сессия пользователя (в памяти, без сохранения между перезапусками)
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub state: SessionState,
    pub updated_at: DateTime<Utc>,
}

impl Session {
    fn with_state(state: SessionState) -> Self {
        Self {
            state,
            updated_at: Utc::now(),
        }
    }

    pub fn idle() -> Self {
        Self::with_state(SessionState::Idle)
    }

    pub fn awaiting_query() -> Self {
        Self::with_state(SessionState::AwaitingQuery)
    }

    /// Сессия выбора с новым nonce; пустой список даёт `Idle`
    pub fn awaiting_selection(pending: Vec<Client>) -> Self {
        Self::selecting(new_nonce(), pending)
    }

    /// Сессия выбора для уже выданных кнопок с этим nonce
    pub fn selecting(nonce: String, pending: Vec<Client>) -> Self {
        if pending.is_empty() {
            return Self::idle();
        }
        Self::with_state(SessionState::AwaitingSelection { nonce, pending })
    }

    pub fn is_idle(&self) -> bool {
        self.state == SessionState::Idle
    }

    /// Варианты для выбора (пусто вне состояния выбора)
    pub fn pending_results(&self) -> &[Client] {
        match &self.state {
            SessionState::AwaitingSelection { pending, .. } => pending.as_slice(),
            _ => &[],
        }
    }

    /// Вариант по индексу, если nonce совпадает с текущим списком
    pub fn selection(&self, nonce: &str, index: usize) -> Option<&Client> {
        match &self.state {
            SessionState::AwaitingSelection {
                nonce: current,
                pending,
            } if current == nonce => pending.get(index),
            _ => None,
        }
    }

    pub fn is_expired(&self, ttl: chrono::Duration, now: DateTime<Utc>) -> bool {
        now - self.updated_at > ttl
    }
}

/// Короткий nonce, помещается в callback_data вместе с индексом
pub fn new_nonce() -> String {
    uuid::Uuid::new_v4().simple().to_string()[..8].to_string()
}
