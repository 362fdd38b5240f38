use serde::{de::DeserializeOwned, Serialize};
use std::hash::Hash;

/// Трейт для типов идентификаторов агрегатов
///
/// Идентификаторы документов во внешнем хранилище - строки,
/// поэтому `Copy` не требуется.
pub trait AggregateId:
    Clone + PartialEq + Eq + Hash + Serialize + DeserializeOwned + std::fmt::Debug
{
    /// Преобразовать ID в строку
    fn as_string(&self) -> String;

    /// Создать ID из строки
    fn from_string(s: &str) -> Result<Self, String>;
}

/// Объявляет строковый newtype-идентификатор документа
#[macro_export]
macro_rules! document_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn value(&self) -> &str {
                &self.0
            }
        }

        impl $crate::domain::common::AggregateId for $name {
            fn as_string(&self) -> String {
                self.0.clone()
            }

            fn from_string(s: &str) -> Result<Self, String> {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Err("Empty document id".to_string());
                }
                Ok(Self(trimmed.to_string()))
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::AggregateId;

    document_id!(
        /// Тестовый идентификатор
        SampleId
    );

    #[test]
    fn test_from_string_trims_and_rejects_empty() {
        assert_eq!(SampleId::from_string("  abc ").unwrap(), SampleId::new("abc"));
        assert!(SampleId::from_string("   ").is_err());
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let id = SampleId::new("doc-1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"doc-1\"");
        assert_eq!(id.as_string(), "doc-1");
    }
}
