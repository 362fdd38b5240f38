use serde::{Deserialize, Serialize};

use crate::domain::a002_product::ProductId;
use crate::domain::a003_package_type::PackageTypeId;

/// Правило граммажа для комбинации продукт + тип упаковки
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GramRule {
    #[serde(rename = "productRef")]
    pub product_ref: ProductId,

    #[serde(rename = "packageTypeRef")]
    pub package_type_ref: PackageTypeId,

    pub gram: f64,
}

impl GramRule {
    pub fn applies_to(&self, product: &ProductId, package_type: &PackageTypeId) -> bool {
        &self.product_ref == product && &self.package_type_ref == package_type
    }
}

/// Граммаж для комбинации: первое подходящее правило
pub fn find_gram(
    rules: &[GramRule],
    product: &ProductId,
    package_type: &PackageTypeId,
) -> Option<f64> {
    rules
        .iter()
        .find(|r| r.applies_to(product, package_type))
        .map(|r| r.gram)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(product: &str, package: &str, gram: f64) -> GramRule {
        GramRule {
            product_ref: ProductId::new(product),
            package_type_ref: PackageTypeId::new(package),
            gram,
        }
    }

    #[test]
    fn test_first_matching_rule_wins() {
        let rules = vec![
            rule("p1", "k2", 10.0),
            rule("p1", "k1", 18.0),
            rule("p1", "k1", 25.0),
        ];
        let gram = find_gram(&rules, &ProductId::new("p1"), &PackageTypeId::new("k1"));
        assert_eq!(gram, Some(18.0));
    }

    #[test]
    fn test_no_rule_for_combination() {
        let rules = vec![rule("p1", "k1", 18.0)];
        assert_eq!(
            find_gram(&rules, &ProductId::new("p2"), &PackageTypeId::new("k1")),
            None
        );
    }
}
