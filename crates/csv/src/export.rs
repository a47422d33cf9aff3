//! Store-to-CSV export.

use serde::Serialize;
use thiserror::Error;

use stockroom_catalog::{Product, ProductStatus};
use stockroom_store::{InventoryStore, ListFilter, StoreError};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("csv write failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("csv buffer finalize failed: {0}")]
    Finalize(String),
}

/// One exported row; the field order fixes the column order.
#[derive(Debug, Serialize)]
struct ExportRow<'a> {
    name: &'a str,
    unit: &'a str,
    category: &'a str,
    brand: &'a str,
    stock: u32,
    status: ProductStatus,
    image: &'a str,
}

impl<'a> From<&'a Product> for ExportRow<'a> {
    fn from(product: &'a Product) -> Self {
        Self {
            name: &product.name,
            unit: &product.unit,
            category: &product.category,
            brand: &product.brand,
            stock: product.stock,
            status: product.status,
            image: product.image.as_deref().unwrap_or(""),
        }
    }
}

/// Serialize every stored product as one CSV row.
///
/// Fields containing the delimiter, quotes, or newlines are quoted with
/// internal quotes doubled (standard CSV quoting, handled by the writer).
/// Re-importing the output into an empty store reproduces the same records
/// modulo surrogate id reassignment; ids are internal and not exported.
pub fn export_csv<S>(store: &S) -> Result<Vec<u8>, ExportError>
where
    S: InventoryStore + ?Sized,
{
    let products = store.list(&ListFilter::default())?;

    let mut writer = csv::Writer::from_writer(Vec::new());
    for product in &products {
        writer.serialize(ExportRow::from(product))?;
    }
    writer
        .into_inner()
        .map_err(|e| ExportError::Finalize(e.to_string()))
}
