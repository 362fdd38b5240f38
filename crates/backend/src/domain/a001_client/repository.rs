use crate::shared::data::{Document, DocumentStore, StoreError};
use contracts::domain::a001_client::{Client, ClientId, Roll};
use contracts::domain::a002_product::ProductId;
use contracts::domain::a003_package_type::PackageTypeId;

pub const COLLECTION: &str = "clients";
pub const ROLLS_SUBCOLLECTION: &str = "rolls";

const DISPLAY_NAME_KEYS: &[&str] = &["name", "restaurant", "restaurantName"];
const ORGANIZATION_KEYS: &[&str] = &["organization", "orgName"];
const LEGAL_NAME_KEYS: &[&str] = &["legalName", "firmName"];
const BRANCH_KEYS: &[&str] = &["branch", "branchName"];
const PRODUCT_KEYS: &[&str] = &["productId", "product"];
const PACKAGE_TYPE_KEYS: &[&str] = &["packageTypeId", "packageType"];
const GRAM_KEYS: &[&str] = &["gram", "grams"];
const DELETED_KEYS: &[&str] = &["isDeleted", "deleted", "archived"];

/// Документ хранилища в каноническое представление клиента
pub fn client_from_document(doc: &Document) -> Client {
    Client {
        id: ClientId::new(doc.id.clone()),
        display_name: doc.str_field(DISPLAY_NAME_KEYS).unwrap_or_default(),
        organization_name: doc.str_field(ORGANIZATION_KEYS),
        legal_name: doc.str_field(LEGAL_NAME_KEYS),
        branch_name: doc.str_field(BRANCH_KEYS),
        product_ref: doc.ref_field(PRODUCT_KEYS).map(ProductId::new),
        package_type_ref: doc.ref_field(PACKAGE_TYPE_KEYS).map(PackageTypeId::new),
        gram_override: doc.number_field(GRAM_KEYS).filter(|g| *g > 0.0),
        phone: doc.str_field(&["phone"]),
        address: doc.str_field(&["address"]),
        location: doc.geo_field(&["location", "geo"]),
    }
}

fn is_deleted(doc: &Document) -> bool {
    DELETED_KEYS
        .iter()
        .any(|key| doc.fields.get(*key).and_then(|v| v.as_bool()) == Some(true))
}

fn roll_from_document(doc: &Document) -> Roll {
    Roll {
        id: doc.id.clone(),
        weight: doc.number_field(&["weight", "weightKg", "kg"]).unwrap_or(0.0),
    }
}

/// Все клиенты, кроме удалённых, в порядке хранилища
pub async fn list_all(store: &dyn DocumentStore) -> Result<Vec<Client>, StoreError> {
    let docs = store.fetch_all(COLLECTION).await?;
    Ok(docs
        .iter()
        .filter(|doc| !is_deleted(doc))
        .map(client_from_document)
        .collect())
}

/// Рулоны клиента
pub async fn list_rolls(
    store: &dyn DocumentStore,
    client_id: &ClientId,
) -> Result<Vec<Roll>, StoreError> {
    let docs = store
        .fetch_subcollection(COLLECTION, client_id.value(), ROLLS_SUBCOLLECTION)
        .await?;
    Ok(docs.iter().map(roll_from_document).collect())
}
