use serde::{Deserialize, Serialize};

crate::document_id!(
    /// Уникальный идентификатор типа упаковки
    PackageTypeId
);

/// Тип упаковки рулона
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageType {
    pub id: PackageTypeId,
    pub name: String,
}
