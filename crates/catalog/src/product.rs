use chrono::{DateTime, Utc};
use core::str::FromStr;
use serde::{Deserialize, Serialize};
use url::Url;

use stockroom_core::{DomainError, DomainResult, Entity, ProductId};

use crate::identity::IdentityKey;

/// Availability hint shown next to a product.
///
/// Deliberately independent of the numeric `stock` value: callers submit both
/// fields separately and the store never derives one from the other, so a
/// mismatch is legal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProductStatus {
    #[serde(rename = "In Stock")]
    InStock,
    #[serde(rename = "Out of Stock")]
    OutOfStock,
}

impl Default for ProductStatus {
    fn default() -> Self {
        Self::InStock
    }
}

impl core::fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InStock => f.write_str("In Stock"),
            Self::OutOfStock => f.write_str("Out of Stock"),
        }
    }
}

impl FromStr for ProductStatus {
    type Err = DomainError;

    /// Lenient parse: case-insensitive, separator-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        match normalized.as_str() {
            "in stock" | "instock" | "in_stock" => Ok(Self::InStock),
            "out of stock" | "outofstock" | "out_of_stock" => Ok(Self::OutOfStock),
            _ => Err(DomainError::validation(format!(
                "status must be 'In Stock' or 'Out of Stock', got '{s}'"
            ))),
        }
    }
}

/// A stored inventory record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub unit: String,
    pub category: String,
    pub brand: String,
    pub stock: u32,
    pub status: ProductStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl Product {
    /// Merge a patch over this record into a draft.
    ///
    /// Patch fields override current values; unspecified fields retain them.
    /// The merged draft must pass validation again before it is stored.
    pub fn merged(&self, patch: ProductPatch) -> ProductDraft {
        ProductDraft {
            name: patch.name.unwrap_or_else(|| self.name.clone()),
            unit: patch.unit.unwrap_or_else(|| self.unit.clone()),
            category: patch.category.unwrap_or_else(|| self.category.clone()),
            brand: patch.brand.unwrap_or_else(|| self.brand.clone()),
            stock: patch.stock.unwrap_or(self.stock),
            status: Some(patch.status.unwrap_or(self.status)),
            image: match patch.image {
                Some(image) => image,
                None => self.image.clone(),
            },
        }
    }
}

/// Candidate record prior to validation (a single create or one import row).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDraft {
    pub name: String,
    pub unit: String,
    pub category: String,
    pub brand: String,
    pub stock: u32,
    #[serde(default)]
    pub status: Option<ProductStatus>,
    #[serde(default)]
    pub image: Option<String>,
}

impl ProductDraft {
    /// Validate field-level constraints, yielding a [`ValidDraft`].
    ///
    /// Pure and side-effect free. Text fields must be non-empty after
    /// trimming; a missing status defaults to [`ProductStatus::InStock`]; a
    /// non-empty image must be URI-like.
    pub fn validate(self) -> DomainResult<ValidDraft> {
        let name = require_text("name", self.name)?;
        let unit = require_text("unit", self.unit)?;
        let category = require_text("category", self.category)?;
        let brand = require_text("brand", self.brand)?;
        let status = self.status.unwrap_or_default();
        let image = normalize_image(self.image)?;

        Ok(ValidDraft {
            name,
            unit,
            category,
            brand,
            stock: self.stock,
            status,
            image,
        })
    }
}

/// A candidate record that passed schema validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidDraft {
    name: String,
    unit: String,
    category: String,
    brand: String,
    stock: u32,
    status: ProductStatus,
    image: Option<String>,
}

impl ValidDraft {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn brand(&self) -> &str {
        &self.brand
    }

    pub fn stock(&self) -> u32 {
        self.stock
    }

    pub fn status(&self) -> ProductStatus {
        self.status
    }

    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    /// Duplicate-detection key for this candidate.
    pub fn identity(&self) -> IdentityKey {
        IdentityKey::of(&self.name, &self.brand, &self.category)
    }

    /// Promote the draft into a stored record.
    pub fn into_product(self, id: ProductId, created_at: DateTime<Utc>) -> Product {
        Product {
            id,
            name: self.name,
            unit: self.unit,
            category: self.category,
            brand: self.brand,
            stock: self.stock,
            status: self.status,
            image: self.image,
            created_at,
        }
    }
}

/// Field-by-field patch applied over a stored record.
///
/// `None` means "keep the current value". `image` is doubly optional so a
/// patch can also clear it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ProductPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub stock: Option<u32>,
    #[serde(default)]
    pub status: Option<ProductStatus>,
    #[serde(default)]
    pub image: Option<Option<String>>,
}

impl ProductPatch {
    /// Patch that only changes the stock level.
    pub fn stock(stock: u32) -> Self {
        Self {
            stock: Some(stock),
            ..Self::default()
        }
    }
}

fn require_text(field: &'static str, value: String) -> DomainResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation(format!("{field} must not be empty")));
    }
    if trimmed.len() == value.len() {
        Ok(value)
    } else {
        Ok(trimmed.to_string())
    }
}

/// Lenient URI check: absolute URLs parse, relative references pass as long
/// as they carry no whitespace. No reachability check.
fn normalize_image(image: Option<String>) -> DomainResult<Option<String>> {
    let Some(raw) = image else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    match Url::parse(trimmed) {
        Ok(_) => Ok(Some(trimmed.to_string())),
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            if trimmed.chars().any(char::is_whitespace) {
                Err(DomainError::validation("image must be a URI-like string"))
            } else {
                Ok(Some(trimmed.to_string()))
            }
        }
        Err(e) => Err(DomainError::validation(format!("image is not a valid URI: {e}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> ProductDraft {
        ProductDraft {
            name: "Ballpoint Pen".to_string(),
            unit: "pcs".to_string(),
            category: "Stationery".to_string(),
            brand: "Acme".to_string(),
            stock: 12,
            status: Some(ProductStatus::InStock),
            image: None,
        }
    }

    #[test]
    fn valid_draft_passes() {
        let valid = draft().validate().unwrap();
        assert_eq!(valid.name(), "Ballpoint Pen");
        assert_eq!(valid.stock(), 12);
        assert_eq!(valid.status(), ProductStatus::InStock);
    }

    #[test]
    fn whitespace_only_fields_are_rejected() {
        for field in ["name", "unit", "category", "brand"] {
            let mut candidate = draft();
            match field {
                "name" => candidate.name = "   ".to_string(),
                "unit" => candidate.unit = String::new(),
                "category" => candidate.category = "\t".to_string(),
                _ => candidate.brand = " \n ".to_string(),
            }
            let err = candidate.validate().unwrap_err();
            match err {
                DomainError::Validation(msg) => assert!(msg.contains(field), "{msg}"),
                other => panic!("expected Validation, got {other:?}"),
            }
        }
    }

    #[test]
    fn text_fields_are_trimmed() {
        let mut candidate = draft();
        candidate.name = "  Ballpoint Pen  ".to_string();
        let valid = candidate.validate().unwrap();
        assert_eq!(valid.name(), "Ballpoint Pen");
    }

    #[test]
    fn missing_status_defaults_to_in_stock() {
        let mut candidate = draft();
        candidate.status = None;
        let valid = candidate.validate().unwrap();
        assert_eq!(valid.status(), ProductStatus::InStock);
    }

    #[test]
    fn status_parse_is_lenient() {
        assert_eq!("In Stock".parse::<ProductStatus>().unwrap(), ProductStatus::InStock);
        assert_eq!("out of stock".parse::<ProductStatus>().unwrap(), ProductStatus::OutOfStock);
        assert_eq!("OutOfStock".parse::<ProductStatus>().unwrap(), ProductStatus::OutOfStock);
        assert!("backordered".parse::<ProductStatus>().is_err());
    }

    #[test]
    fn empty_image_normalizes_to_none() {
        let mut candidate = draft();
        candidate.image = Some("   ".to_string());
        let valid = candidate.validate().unwrap();
        assert_eq!(valid.image(), None);
    }

    #[test]
    fn absolute_and_relative_image_uris_pass() {
        let mut candidate = draft();
        candidate.image = Some("https://cdn.example.com/pen.png".to_string());
        assert!(candidate.clone().validate().is_ok());

        candidate.image = Some("images/pen.png".to_string());
        assert!(candidate.validate().is_ok());
    }

    #[test]
    fn image_with_interior_whitespace_is_rejected() {
        let mut candidate = draft();
        candidate.image = Some("not a uri".to_string());
        assert!(candidate.validate().is_err());
    }

    #[test]
    fn merged_patch_overrides_and_retains() {
        let product = draft()
            .validate()
            .unwrap()
            .into_product(ProductId::new(), Utc::now());

        let patch = ProductPatch {
            stock: Some(40),
            brand: Some("Globex".to_string()),
            ..ProductPatch::default()
        };
        let merged = product.merged(patch);

        assert_eq!(merged.stock, 40);
        assert_eq!(merged.brand, "Globex");
        assert_eq!(merged.name, product.name);
        assert_eq!(merged.status, Some(product.status));
    }

    #[test]
    fn patch_can_clear_image() {
        let mut candidate = draft();
        candidate.image = Some("https://cdn.example.com/pen.png".to_string());
        let product = candidate
            .validate()
            .unwrap()
            .into_product(ProductId::new(), Utc::now());
        assert!(product.image.is_some());

        let patch = ProductPatch {
            image: Some(None),
            ..ProductPatch::default()
        };
        assert_eq!(product.merged(patch).image, None);
    }

    #[test]
    fn product_serializes_with_wire_field_names() {
        let product = draft()
            .validate()
            .unwrap()
            .into_product(ProductId::new(), Utc::now());
        let json = serde_json::to_value(&product).unwrap();

        assert_eq!(json["status"], "In Stock");
        assert!(json.get("createdAt").is_some());
        assert!(json.get("created_at").is_none());
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: any draft whose text fields have non-whitespace
            /// content validates, and validation is deterministic.
            #[test]
            fn non_blank_drafts_validate(
                name in "[A-Za-z][A-Za-z0-9 ]{0,40}",
                unit in "[a-z]{1,10}",
                category in "[A-Za-z]{1,20}",
                brand in "[A-Za-z]{1,20}",
                stock in 0u32..100_000,
            ) {
                let candidate = ProductDraft {
                    name, unit, category, brand, stock,
                    status: None,
                    image: None,
                };
                let first = candidate.clone().validate();
                let second = candidate.validate();
                prop_assert!(first.is_ok());
                prop_assert_eq!(first, second);
            }

            /// Property: status display round-trips through the lenient parser.
            #[test]
            fn status_display_round_trips(out_of_stock in any::<bool>()) {
                let status = if out_of_stock {
                    ProductStatus::OutOfStock
                } else {
                    ProductStatus::InStock
                };
                prop_assert_eq!(status.to_string().parse::<ProductStatus>().unwrap(), status);
            }
        }
    }
}
