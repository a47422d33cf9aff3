//! Identity & duplicate resolution.

use stockroom_core::ProductId;

use crate::product::Product;

/// Case-insensitive `(name, brand, category)` triple used to detect duplicate
/// products.
///
/// Name alone is not unique enough in an inventory (the same product name can
/// exist across brands), so all three fields must match.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IdentityKey {
    name: String,
    brand: String,
    category: String,
}

impl IdentityKey {
    pub fn of(name: &str, brand: &str, category: &str) -> Self {
        Self {
            name: normalize(name),
            brand: normalize(brand),
            category: normalize(category),
        }
    }
}

impl From<&Product> for IdentityKey {
    fn from(product: &Product) -> Self {
        Self::of(&product.name, &product.brand, &product.category)
    }
}

fn normalize(field: &str) -> String {
    field.trim().to_lowercase()
}

/// Resolve a candidate identity against already-committed records.
///
/// Deterministic: the first (oldest) committed match wins. Within a single
/// import batch the pipeline additionally tracks identities accepted earlier
/// in the same pass, so duplicate resolution is independent of anything but
/// file order.
pub fn resolve<'a, I>(key: &IdentityKey, existing: I) -> Option<ProductId>
where
    I: IntoIterator<Item = &'a Product>,
{
    existing
        .into_iter()
        .find(|p| IdentityKey::from(*p) == *key)
        .map(|p| p.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::{ProductDraft, ProductStatus};
    use chrono::Utc;

    fn product(name: &str, brand: &str, category: &str) -> Product {
        ProductDraft {
            name: name.to_string(),
            unit: "pcs".to_string(),
            category: category.to_string(),
            brand: brand.to_string(),
            stock: 1,
            status: Some(ProductStatus::InStock),
            image: None,
        }
        .validate()
        .unwrap()
        .into_product(ProductId::new(), Utc::now())
    }

    #[test]
    fn identity_match_is_case_insensitive() {
        let existing = vec![product("Pen", "Acme", "Stationery")];
        let key = IdentityKey::of("PEN", "acme", "STATIONERY");
        assert_eq!(resolve(&key, &existing), Some(existing[0].id));
    }

    #[test]
    fn all_three_fields_must_match() {
        let existing = vec![product("Pen", "Acme", "Stationery")];
        assert_eq!(resolve(&IdentityKey::of("Pen", "Globex", "Stationery"), &existing), None);
        assert_eq!(resolve(&IdentityKey::of("Pen", "Acme", "Office"), &existing), None);
        assert_eq!(resolve(&IdentityKey::of("Pencil", "Acme", "Stationery"), &existing), None);
    }

    #[test]
    fn oldest_committed_match_wins() {
        let first = product("Pen", "Acme", "Stationery");
        let second = product("Pen", "Acme", "Stationery");
        let existing = vec![first.clone(), second];
        let key = IdentityKey::of("Pen", "Acme", "Stationery");
        assert_eq!(resolve(&key, &existing), Some(first.id));
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: the key is invariant under case changes and
            /// surrounding whitespace.
            #[test]
            fn key_is_case_and_padding_invariant(
                name in "[A-Za-z][A-Za-z0-9 ]{0,30}",
                brand in "[A-Za-z]{1,15}",
                category in "[A-Za-z]{1,15}",
            ) {
                let plain = IdentityKey::of(&name, &brand, &category);
                let shouted = IdentityKey::of(
                    &format!("  {}  ", name.to_uppercase()),
                    &brand.to_uppercase(),
                    &category.to_lowercase(),
                );
                prop_assert_eq!(plain, shouted);
            }
        }
    }
}
