use crate::shared::data::{Document, DocumentStore, StoreError};
use contracts::domain::a002_product::ProductId;
use contracts::domain::a003_package_type::PackageTypeId;
use contracts::domain::a004_gram_rule::GramRule;

pub const COLLECTION: &str = "gramRules";

/// Правило без продукта, типа упаковки или граммажа пропускается
fn rule_from_document(doc: &Document) -> Option<GramRule> {
    Some(GramRule {
        product_ref: ProductId::new(doc.ref_field(&["productId", "product"])?),
        package_type_ref: PackageTypeId::new(doc.ref_field(&["packageTypeId", "packageType"])?),
        gram: doc.number_field(&["gram", "grams"])?,
    })
}

/// Все правила в порядке хранилища (порядок важен: первое подходящее побеждает)
pub async fn list_all(store: &dyn DocumentStore) -> Result<Vec<GramRule>, StoreError> {
    let docs = store.fetch_all(COLLECTION).await?;
    let rules: Vec<GramRule> = docs.iter().filter_map(rule_from_document).collect();
    if rules.len() < docs.len() {
        tracing::warn!(
            "Skipped {} incomplete gram rules",
            docs.len() - rules.len()
        );
    }
    Ok(rules)
}
