//! Карточка клиента: продукт, упаковка, граммаж и рулоны.
//!
//! Все обращения к хранилищу выполняются параллельно и ограничены таймаутом.
//! Ошибка или таймаут любого обращения заменяется заглушкой.

use super::messages::NOT_SPECIFIED;
use crate::domain::{a001_client, a002_product, a003_package_type, a004_gram_rule};
use crate::shared::data::{DocumentStore, StoreError};
use crate::shared::format::format_weight;
use contracts::domain::a001_client::Client;
use contracts::domain::a004_gram_rule::find_gram;
use std::fmt::Write;
use std::future::Future;
use std::time::Duration;

/// Данные для сообщения о клиенте
#[derive(Debug, Clone, PartialEq)]
pub struct ClientDetails {
    pub title: String,
    pub branch: Option<String>,
    pub organization: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub product_name: Option<String>,
    pub package_name: Option<String>,
    pub gram: Option<f64>,
    /// Веса ненулевых рулонов; `None`, если рулоны получить не удалось
    pub roll_weights: Option<Vec<f64>>,
}

impl ClientDetails {
    pub fn total_weight(&self) -> f64 {
        self.roll_weights
            .as_deref()
            .map(|w| w.iter().sum())
            .unwrap_or(0.0)
    }
}

/// Выполнить обращение к хранилищу; ошибка и таймаут дают `None`
async fn guarded<T>(
    timeout: Duration,
    what: &str,
    lookup: impl Future<Output = Result<T, StoreError>>,
) -> Option<T> {
    match tokio::time::timeout(timeout, lookup).await {
        Ok(Ok(value)) => Some(value),
        Ok(Err(e)) => {
            tracing::warn!("Lookup of {} failed: {}", what, e);
            None
        }
        Err(_) => {
            tracing::warn!("Lookup of {} timed out after {:?}", what, timeout);
            None
        }
    }
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}

/// Собрать карточку клиента. Никогда не завершается ошибкой.
pub async fn resolve_details(
    store: &dyn DocumentStore,
    client: &Client,
    timeout: Duration,
) -> ClientDetails {
    let product = async {
        let id = client.product_ref.as_ref()?;
        guarded(timeout, "product", a002_product::repository::get_by_id(store, id))
            .await
            .flatten()
            .and_then(|p| non_empty(p.name))
    };

    let package = async {
        let id = client.package_type_ref.as_ref()?;
        guarded(
            timeout,
            "package type",
            a003_package_type::repository::get_by_id(store, id),
        )
        .await
        .flatten()
        .and_then(|p| non_empty(p.name))
    };

    let gram = async {
        if let Some(own) = client.gram_override {
            return Some(own);
        }
        let product = client.product_ref.as_ref()?;
        let package_type = client.package_type_ref.as_ref()?;
        let rules = guarded(
            timeout,
            "gram rules",
            a004_gram_rule::repository::list_all(store),
        )
        .await?;
        find_gram(&rules, product, package_type)
    };

    let rolls = async {
        guarded(
            timeout,
            "rolls",
            a001_client::repository::list_rolls(store, &client.id),
        )
        .await
        .map(|rolls| {
            rolls
                .into_iter()
                .map(|r| r.weight)
                .filter(|w| *w != 0.0)
                .collect::<Vec<_>>()
        })
    };

    let (product_name, package_name, gram, roll_weights) =
        tokio::join!(product, package, gram, rolls);

    ClientDetails {
        title: client.title().to_string(),
        branch: client.branch_name.clone(),
        organization: client.organization_name.clone(),
        address: client.address.clone(),
        phone: client.phone.clone(),
        product_name,
        package_name,
        gram,
        roll_weights,
    }
}

/// Текст сообщения о клиенте
pub fn format_details(details: &ClientDetails) -> String {
    let mut text = String::new();

    let _ = writeln!(text, "🏪 {}", details.title);
    for (label, value) in [
        ("Филиал", &details.branch),
        ("Организация", &details.organization),
        ("Адрес", &details.address),
        ("Телефон", &details.phone),
    ] {
        if let Some(value) = value.as_deref().filter(|v| !v.trim().is_empty()) {
            let _ = writeln!(text, "{}: {}", label, value);
        }
    }

    let _ = writeln!(text);
    let _ = writeln!(
        text,
        "Продукт: {}",
        details.product_name.as_deref().unwrap_or(NOT_SPECIFIED)
    );
    let _ = writeln!(
        text,
        "Тип упаковки: {}",
        details.package_name.as_deref().unwrap_or(NOT_SPECIFIED)
    );
    match details.gram {
        Some(gram) => {
            let _ = writeln!(text, "Граммаж: {} г", format_weight(gram));
        }
        None => {
            let _ = writeln!(text, "Граммаж: {}", NOT_SPECIFIED);
        }
    }

    let _ = writeln!(text);
    match details.roll_weights.as_deref() {
        None => {
            let _ = writeln!(text, "Рулоны: {}", NOT_SPECIFIED);
            let _ = write!(text, "Итого: {}", NOT_SPECIFIED);
        }
        Some([]) => {
            let _ = writeln!(text, "Рулоны: нет");
            let _ = write!(text, "Итого: 0 кг");
        }
        Some(weights) => {
            let _ = writeln!(text, "Рулоны ({}):", weights.len());
            for (i, weight) in weights.iter().enumerate() {
                let _ = writeln!(text, "{}. {} кг", i + 1, format_weight(*weight));
            }
            let _ = write!(
                text,
                "Итого: {} кг",
                format_weight(details.total_weight())
            );
        }
    }

    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::{Document, InMemoryDocumentStore};
    use async_trait::async_trait;
    use contracts::domain::a002_product::ProductId;
    use contracts::domain::a003_package_type::PackageTypeId;

    const SNAPSHOT: &str = r#"{
        "clients": [{"id": "c1", "name": "Cafe Dono", "_collections": {"rolls": [
            {"weight": 12.5}, {"weight": 0}, {"weight": "10"}
        ]}}],
        "products": [{"id": "p1", "name": "Термобумага"}],
        "packageTypes": [{"id": "k1", "name": "Коробка"}],
        "gramRules": [
            {"productId": "p1", "packageTypeId": "k2", "gram": 10},
            {"productId": "p1", "packageTypeId": "k1", "gram": 18},
            {"productId": "p1", "packageTypeId": "k1", "gram": 25}
        ]
    }"#;

    fn client() -> Client {
        let mut c = Client::new("c1", "Cafe Dono");
        c.product_ref = Some(ProductId::new("p1"));
        c.package_type_ref = Some(PackageTypeId::new("k1"));
        c
    }

    /// Хранилище, в котором всё, кроме рулонов, падает или зависает
    struct BrokenStore {
        inner: InMemoryDocumentStore,
        hang: bool,
    }

    #[async_trait]
    impl DocumentStore for BrokenStore {
        async fn fetch_all(&self, _collection: &str) -> Result<Vec<Document>, StoreError> {
            if self.hang {
                std::future::pending::<()>().await;
            }
            Err(StoreError::Network("connection reset".into()))
        }

        async fn fetch_subcollection(
            &self,
            collection: &str,
            parent_id: &str,
            name: &str,
        ) -> Result<Vec<Document>, StoreError> {
            self.inner.fetch_subcollection(collection, parent_id, name).await
        }

        async fn get_by_id(
            &self,
            _collection: &str,
            _id: &str,
        ) -> Result<Option<Document>, StoreError> {
            if self.hang {
                std::future::pending::<()>().await;
            }
            Err(StoreError::Timeout)
        }
    }

    #[tokio::test]
    async fn test_resolve_details_full() {
        let store = InMemoryDocumentStore::from_json_str(SNAPSHOT).unwrap();
        let details = resolve_details(&store, &client(), Duration::from_secs(1)).await;

        assert_eq!(details.product_name.as_deref(), Some("Термобумага"));
        assert_eq!(details.package_name.as_deref(), Some("Коробка"));
        assert_eq!(details.gram, Some(18.0));
        assert_eq!(details.roll_weights, Some(vec![12.5, 10.0]));
        assert_eq!(details.total_weight(), 22.5);

        let text = format_details(&details);
        assert!(text.contains("Продукт: Термобумага"));
        assert!(text.contains("Граммаж: 18 г"));
        assert!(text.contains("Рулоны (2):"));
        assert!(text.contains("1. 12.5 кг"));
        assert!(text.contains("2. 10 кг"));
        assert!(text.ends_with("Итого: 22.5 кг"));
    }

    #[tokio::test]
    async fn test_gram_override_wins() {
        let store = InMemoryDocumentStore::from_json_str(SNAPSHOT).unwrap();
        let mut c = client();
        c.gram_override = Some(21.0);
        let details = resolve_details(&store, &c, Duration::from_secs(1)).await;
        assert_eq!(details.gram, Some(21.0));
    }

    #[tokio::test]
    async fn test_failed_lookups_use_placeholders() {
        let inner = InMemoryDocumentStore::from_json_str(SNAPSHOT).unwrap();
        let store = BrokenStore { inner, hang: false };
        let details = resolve_details(&store, &client(), Duration::from_secs(1)).await;

        assert_eq!(details.product_name, None);
        assert_eq!(details.package_name, None);
        assert_eq!(details.gram, None);
        assert_eq!(details.roll_weights, Some(vec![12.5, 10.0]));

        let text = format_details(&details);
        assert!(text.contains("Продукт: не указано"));
        assert!(text.contains("Тип упаковки: не указано"));
        assert!(text.contains("Граммаж: не указано"));
        assert!(text.contains("Итого: 22.5 кг"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_hung_lookups_time_out() {
        let inner = InMemoryDocumentStore::from_json_str(SNAPSHOT).unwrap();
        let store = BrokenStore { inner, hang: true };
        let details = resolve_details(&store, &client(), Duration::from_millis(200)).await;

        assert_eq!(details.product_name, None);
        assert_eq!(details.gram, None);
        assert_eq!(details.total_weight(), 22.5);
    }

    #[test]
    fn test_format_without_rolls_data() {
        let details = ClientDetails {
            title: "Cafe Dono".into(),
            branch: Some("Chilonzor".into()),
            organization: None,
            address: None,
            phone: Some("+998 90 000 00 00".into()),
            product_name: None,
            package_name: None,
            gram: None,
            roll_weights: None,
        };
        let text = format_details(&details);
        assert!(text.starts_with("🏪 Cafe Dono\nФилиал: Chilonzor\nТелефон: +998 90 000 00 00\n"));
        assert!(text.ends_with("Рулоны: не указано\nИтого: не указано"));

        let empty = ClientDetails {
            roll_weights: Some(Vec::new()),
            ..details
        };
        assert!(format_details(&empty).ends_with("Рулоны: нет\nИтого: 0 кг"));
    }
}
