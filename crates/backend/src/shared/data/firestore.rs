//! Клиент Firestore REST API (только чтение).

use super::document::Document;
use super::store::{DocumentStore, StoreError};
use crate::shared::config::FirestoreConfig;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Map, Value};

const PAGE_SIZE: &str = "300";

/// Хранилище документов поверх Firestore REST API
pub struct FirestoreStore {
    client: reqwest::Client,
    documents_url: String,
    api_key: Option<String>,
    access_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ListDocumentsResponse {
    #[serde(default)]
    documents: Vec<Value>,
    #[serde(rename = "nextPageToken")]
    next_page_token: Option<String>,
}

impl FirestoreStore {
    pub fn new(config: &FirestoreConfig) -> anyhow::Result<Self> {
        if config.project_id.trim().is_empty() {
            anyhow::bail!("Firestore project_id is empty");
        }

        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.request_timeout_secs))
            .build()?;

        let documents_url = format!(
            "{}/projects/{}/databases/{}/documents",
            config.api_base.trim_end_matches('/'),
            config.project_id.trim(),
            config.database.trim()
        );

        Ok(Self {
            client,
            documents_url,
            api_key: config.api_key.clone().filter(|k| !k.trim().is_empty()),
            access_token: config.access_token.clone().filter(|t| !t.trim().is_empty()),
        })
    }

    fn url(&self, segments: &[&str]) -> String {
        let mut url = self.documents_url.clone();
        for segment in segments {
            url.push('/');
            url.push_str(&urlencoding::encode(segment));
        }
        url
    }

    /// GET запрос; 404 возвращает `None`
    async fn get_json(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<Option<Value>, StoreError> {
        let mut request = self.client.get(url).query(query);
        if let Some(key) = &self.api_key {
            request = request.query(&[("key", key.as_str())]);
        }
        if let Some(token) = &self.access_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                StoreError::Timeout
            } else {
                StoreError::Network(e.to_string())
            }
        })?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(StoreError::Http {
                status: status.as_u16(),
                message,
            });
        }

        let body = response
            .json::<Value>()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))?;
        Ok(Some(body))
    }

    /// Все документы коллекции с учётом постраничной выдачи
    async fn list_documents(&self, url: &str) -> Result<Vec<Document>, StoreError> {
        let mut documents = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let response = {
                let mut query = vec![("pageSize", PAGE_SIZE)];
                if let Some(token) = page_token.as_deref() {
                    query.push(("pageToken", token));
                }
                self.get_json(url, &query).await?
            };

            let Some(body) = response else {
                break;
            };

            match collect_page(&mut documents, body)? {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        tracing::debug!("Firestore: {} documents from {}", documents.len(), url);
        Ok(documents)
    }
}

#[async_trait]
impl DocumentStore for FirestoreStore {
    async fn fetch_all(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        self.list_documents(&self.url(&[collection])).await
    }

    async fn fetch_subcollection(
        &self,
        collection: &str,
        parent_id: &str,
        name: &str,
    ) -> Result<Vec<Document>, StoreError> {
        self.list_documents(&self.url(&[collection, parent_id, name]))
            .await
    }

    async fn get_by_id(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        match self.get_json(&self.url(&[collection, id]), &[]).await? {
            Some(raw) => decode_document(&raw).map(Some),
            None => Ok(None),
        }
    }
}

/// Добавить документы страницы; возвращает токен следующей страницы.
///
/// Документ, который не удалось разобрать, пропускается.
fn collect_page(documents: &mut Vec<Document>, body: Value) -> Result<Option<String>, StoreError> {
    let page: ListDocumentsResponse =
        serde_json::from_value(body).map_err(|e| StoreError::Decode(e.to_string()))?;

    for raw in &page.documents {
        match decode_document(raw) {
            Ok(doc) => documents.push(doc),
            Err(e) => tracing::warn!("Firestore: skipped document: {}", e),
        }
    }

    Ok(page.next_page_token.filter(|t| !t.is_empty()))
}

/// Документ Firestore (`{name, fields}`) в `Document`
fn decode_document(raw: &Value) -> Result<Document, StoreError> {
    let name = raw
        .get("name")
        .and_then(Value::as_str)
        .ok_or_else(|| StoreError::Decode("document without name".into()))?;
    let id = name.rsplit('/').next().unwrap_or(name).to_string();

    let fields = match raw.get("fields") {
        Some(Value::Object(fields)) => decode_fields(fields),
        _ => Map::new(),
    };

    Ok(Document::new(id, fields))
}

fn decode_fields(fields: &Map<String, Value>) -> Map<String, Value> {
    fields
        .iter()
        .map(|(key, value)| (key.clone(), decode_value(value)))
        .collect()
}

/// Типизированное значение Firestore в обычный JSON
fn decode_value(value: &Value) -> Value {
    let Some(obj) = value.as_object() else {
        return Value::Null;
    };
    let Some((kind, inner)) = obj.iter().next() else {
        return Value::Null;
    };

    match kind.as_str() {
        "nullValue" => Value::Null,
        "booleanValue" | "doubleValue" => inner.clone(),
        "integerValue" => match inner {
            Value::String(s) => s
                .parse::<i64>()
                .map(Value::from)
                .unwrap_or_else(|_| Value::String(s.clone())),
            other => other.clone(),
        },
        "stringValue" | "timestampValue" | "bytesValue" | "referenceValue" => inner.clone(),
        "geoPointValue" => inner.clone(),
        "arrayValue" => Value::Array(
            inner
                .get("values")
                .and_then(Value::as_array)
                .map(|values| values.iter().map(decode_value).collect())
                .unwrap_or_default(),
        ),
        "mapValue" => Value::Object(
            inner
                .get("fields")
                .and_then(Value::as_object)
                .map(decode_fields)
                .unwrap_or_default(),
        ),
        other => {
            tracing::warn!("Unknown Firestore value type: {}", other);
            Value::Null
        }
    }
}
