use super::repository;
use crate::shared::data::{DocumentStore, StoreError};
use crate::shared::text::fuzzy_match_with_transliteration;
use contracts::domain::a001_client::{Client, ClientField};

/// Поиск клиентов по названию (с учётом транслитерации запроса)
///
/// Пустой запрос возвращает всех клиентов.
pub async fn search(store: &dyn DocumentStore, query: &str) -> Result<Vec<Client>, StoreError> {
    let clients = repository::list_all(store).await?;
    let found = fuzzy_match_with_transliteration(&clients, query, &ClientField::ALL);
    tracing::debug!(
        "Client search '{}': {} of {} matched",
        query,
        found.len(),
        clients.len()
    );
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::InMemoryDocumentStore;

    #[tokio::test]
    async fn test_search_matches_transliterated_query() {
        let store = InMemoryDocumentStore::from_json_str(
            r#"{"clients": [
                {"id": "c1", "name": "Kafe Dono"},
                {"id": "c2", "name": "Tea House Lotus"}
            ]}"#,
        )
        .unwrap();

        let found = search(&store, "Кафе Доно").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id.value(), "c1");

        let all = search(&store, "").await.unwrap();
        assert_eq!(all.len(), 2);
    }
}
