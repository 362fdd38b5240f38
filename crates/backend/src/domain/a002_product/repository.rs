use crate::shared::data::{Document, DocumentStore, StoreError};
use contracts::domain::a002_product::{Product, ProductId};

pub const COLLECTION: &str = "products";

fn product_from_document(doc: &Document) -> Product {
    Product {
        id: ProductId::new(doc.id.clone()),
        name: doc.str_field(&["name", "title"]).unwrap_or_default(),
    }
}

pub async fn get_by_id(
    store: &dyn DocumentStore,
    id: &ProductId,
) -> Result<Option<Product>, StoreError> {
    Ok(store
        .get_by_id(COLLECTION, id.value())
        .await?
        .as_ref()
        .map(product_from_document))
}
