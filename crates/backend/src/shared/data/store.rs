use super::document::Document;
use async_trait::async_trait;
use thiserror::Error;

/// Ошибки внешнего хранилища документов
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Store returned HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Cannot decode document: {0}")]
    Decode(String),

    #[error("Store request timed out")]
    Timeout,

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Хранилище документов (только чтение)
///
/// Коллекции сканируются целиком; подколлекции адресуются родительским документом.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Все документы коллекции
    async fn fetch_all(&self, collection: &str) -> Result<Vec<Document>, StoreError>;

    /// Все документы подколлекции `name` документа `parent_id` из `collection`
    async fn fetch_subcollection(
        &self,
        collection: &str,
        parent_id: &str,
        name: &str,
    ) -> Result<Vec<Document>, StoreError>;

    /// Документ по ID, `None` если не найден
    async fn get_by_id(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError>;
}
