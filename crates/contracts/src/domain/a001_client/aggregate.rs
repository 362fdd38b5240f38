use serde::{Deserialize, Serialize};

use crate::domain::a002_product::ProductId;
use crate::domain::a003_package_type::PackageTypeId;
use crate::domain::common::GeoPoint;

// ============================================================================
// ID Type
// ============================================================================

crate::document_id!(
    /// Уникальный идентификатор клиента (ресторана)
    ClientId
);

// ============================================================================
// Aggregate Root
// ============================================================================

/// Клиент (ресторан), у которого стоят рулоны
///
/// Каноническое представление документа из хранилища: все альтернативные
/// названия полей документа сводятся к этим полям на границе хранилища.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub id: ClientId,

    #[serde(rename = "displayName")]
    pub display_name: String,

    #[serde(rename = "organizationName")]
    pub organization_name: Option<String>,

    #[serde(rename = "legalName")]
    pub legal_name: Option<String>,

    #[serde(rename = "branchName")]
    pub branch_name: Option<String>,

    #[serde(rename = "productRef")]
    pub product_ref: Option<ProductId>,

    #[serde(rename = "packageTypeRef")]
    pub package_type_ref: Option<PackageTypeId>,

    /// Собственный граммаж клиента (перекрывает правила)
    #[serde(rename = "gramOverride")]
    pub gram_override: Option<f64>,

    pub phone: Option<String>,
    pub address: Option<String>,
    pub location: Option<GeoPoint>,
}

impl Client {
    /// Минимальный клиент только с названием
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: ClientId::new(id),
            display_name: display_name.into(),
            organization_name: None,
            legal_name: None,
            branch_name: None,
            product_ref: None,
            package_type_ref: None,
            gram_override: None,
            phone: None,
            address: None,
            location: None,
        }
    }

    /// Текст поля для поиска (пустая строка, если поле не заполнено)
    pub fn field_text(&self, field: ClientField) -> &str {
        match field {
            ClientField::DisplayName => &self.display_name,
            ClientField::OrganizationName => self.organization_name.as_deref().unwrap_or(""),
            ClientField::LegalName => self.legal_name.as_deref().unwrap_or(""),
            ClientField::BranchName => self.branch_name.as_deref().unwrap_or(""),
        }
    }

    /// Название для отображения: имя, иначе первое заполненное альтернативное, иначе ID
    pub fn title(&self) -> &str {
        [
            self.display_name.as_str(),
            self.organization_name.as_deref().unwrap_or(""),
            self.legal_name.as_deref().unwrap_or(""),
        ]
        .into_iter()
        .find(|s| !s.trim().is_empty())
        .unwrap_or(self.id.value())
    }
}

/// Поля клиента, по которым выполняется поиск
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClientField {
    DisplayName,
    OrganizationName,
    LegalName,
    BranchName,
}

impl ClientField {
    /// Все поля для поиска по названию
    pub const ALL: [ClientField; 4] = [
        ClientField::DisplayName,
        ClientField::OrganizationName,
        ClientField::LegalName,
        ClientField::BranchName,
    ];
}

// ============================================================================
// Nested: рулоны
// ============================================================================

/// Рулон у клиента (элемент подколлекции `rolls`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Roll {
    pub id: String,
    /// Вес, кг
    pub weight: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_text_defaults_to_empty() {
        let mut client = Client::new("c1", "Cafe Dono");
        client.branch_name = Some("Chilonzor".into());
        assert_eq!(client.field_text(ClientField::DisplayName), "Cafe Dono");
        assert_eq!(client.field_text(ClientField::BranchName), "Chilonzor");
        assert_eq!(client.field_text(ClientField::LegalName), "");
    }

    #[test]
    fn test_title_falls_back() {
        let mut client = Client::new("c1", " ");
        assert_eq!(client.title(), "c1");
        client.legal_name = Some("OOO Dono".into());
        assert_eq!(client.title(), "OOO Dono");
    }
}
