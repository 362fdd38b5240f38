use serde::{Deserialize, Serialize};

crate::document_id!(
    /// Уникальный идентификатор продукта
    ProductId
);

/// Продукт (вид бумаги в рулоне)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
}
