use crate::shared::data::{Document, DocumentStore, StoreError};
use contracts::domain::a003_package_type::{PackageType, PackageTypeId};

pub const COLLECTION: &str = "packageTypes";

fn package_type_from_document(doc: &Document) -> PackageType {
    PackageType {
        id: PackageTypeId::new(doc.id.clone()),
        name: doc.str_field(&["name", "title"]).unwrap_or_default(),
    }
}

pub async fn get_by_id(
    store: &dyn DocumentStore,
    id: &PackageTypeId,
) -> Result<Option<PackageType>, StoreError> {
    Ok(store
        .get_by_id(COLLECTION, id.value())
        .await?
        .as_ref()
        .map(package_type_from_document))
}
