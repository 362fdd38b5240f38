use super::document::Document;
use super::store::{DocumentStore, StoreError};
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::Path;
use std::sync::RwLock;

/// Ключ в документе снимка, содержащий его подколлекции
const SUBCOLLECTIONS_KEY: &str = "_collections";

/// Хранилище документов в памяти процесса
///
/// Используется для локального запуска (JSON-снимок) и в тестах.
#[derive(Default)]
pub struct InMemoryDocumentStore {
    collections: RwLock<HashMap<String, Vec<Document>>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Загрузить снимок из JSON-файла
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read store snapshot {}: {}", path.display(), e))?;
        let store = Self::from_json_str(&contents)?;
        tracing::info!(
            "Loaded store snapshot from {} ({} collections)",
            path.display(),
            store.collection_count()
        );
        Ok(store)
    }

    /// Снимок вида `{"clients": [{"id": "c1", "name": "...", "_collections": {"rolls": [...]}}]}`
    pub fn from_json_str(json: &str) -> anyhow::Result<Self> {
        let root: Map<String, Value> = serde_json::from_str(json)?;
        let store = Self::new();
        for (collection, docs) in root {
            store.load_collection(&collection, docs)?;
        }
        Ok(store)
    }

    fn load_collection(&self, path: &str, docs: Value) -> anyhow::Result<()> {
        let Value::Array(docs) = docs else {
            anyhow::bail!("Collection '{}' must be an array", path);
        };

        for (index, raw) in docs.into_iter().enumerate() {
            let Value::Object(mut fields) = raw else {
                anyhow::bail!("Document #{} in '{}' must be an object", index, path);
            };

            let id = match fields.remove("id") {
                Some(Value::String(s)) if !s.trim().is_empty() => s,
                Some(Value::Number(n)) => n.to_string(),
                _ => format!("{}-{}", path.replace('/', "-"), index + 1),
            };

            let nested = fields.remove(SUBCOLLECTIONS_KEY);
            self.insert(path, Document::new(id.clone(), fields));

            if let Some(Value::Object(subcollections)) = nested {
                for (name, sub_docs) in subcollections {
                    self.load_collection(&subcollection_path(path, &id, &name), sub_docs)?;
                }
            }
        }
        Ok(())
    }

    /// Добавить документ в коллекцию (или путь подколлекции)
    pub fn insert(&self, collection: &str, document: Document) {
        let mut collections = match self.collections.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        collections
            .entry(collection.to_string())
            .or_default()
            .push(document);
    }

    /// Добавить документ в подколлекцию
    pub fn insert_sub(&self, collection: &str, parent_id: &str, name: &str, document: Document) {
        self.insert(&subcollection_path(collection, parent_id, name), document);
    }

    fn collection_count(&self) -> usize {
        self.collections.read().map(|c| c.len()).unwrap_or(0)
    }

    fn read_collection(&self, path: &str) -> Result<Vec<Document>, StoreError> {
        let collections = self
            .collections
            .read()
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        Ok(collections.get(path).cloned().unwrap_or_default())
    }
}

fn subcollection_path(collection: &str, parent_id: &str, name: &str) -> String {
    format!("{}/{}/{}", collection, parent_id, name)
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn fetch_all(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        self.read_collection(collection)
    }

    async fn fetch_subcollection(
        &self,
        collection: &str,
        parent_id: &str,
        name: &str,
    ) -> Result<Vec<Document>, StoreError> {
        self.read_collection(&subcollection_path(collection, parent_id, name))
    }

    async fn get_by_id(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        Ok(self
            .read_collection(collection)?
            .into_iter()
            .find(|doc| doc.id == id))
    }
}
