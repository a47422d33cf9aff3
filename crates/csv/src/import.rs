//! Row-by-row CSV import.

use std::collections::HashSet;

use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};

use stockroom_catalog::{IdentityKey, ProductDraft, ProductStatus};
use stockroom_core::DomainError;
use stockroom_store::{InventoryStore, StoreError, StoreResult};

/// Outcome of one import call.
///
/// Transient: produced per call, returned to the caller, then discarded.
/// `skipped` counts invalid rows *and* duplicates; `duplicates` echoes the
/// duplicate subset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub added: u64,
    pub skipped: u64,
    pub duplicates: Vec<DuplicateRow>,
}

/// Echo of a row skipped as a duplicate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateRow {
    /// 1-based line in the payload (line 1 is the header).
    pub line: u64,
    pub name: String,
    pub brand: String,
    pub category: String,
}

/// Raw row as it appears in the file.
///
/// Columns map by header name, order-independent; serde ignores anything
/// unrecognized. Every field is optional here so a missing column becomes a
/// validation failure for the row rather than a batch abort.
#[derive(Debug, Default, Deserialize)]
struct ImportRow {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    unit: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    brand: Option<String>,
    #[serde(default)]
    stock: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    image: Option<String>,
}

impl ImportRow {
    fn into_draft(self) -> Result<ProductDraft, DomainError> {
        let stock = parse_stock(self.stock.as_deref())?;
        let status = match self.status.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(raw.parse::<ProductStatus>()?),
        };

        Ok(ProductDraft {
            name: self.name.unwrap_or_default(),
            unit: self.unit.unwrap_or_default(),
            category: self.category.unwrap_or_default(),
            brand: self.brand.unwrap_or_default(),
            stock,
            status,
            image: self.image,
        })
    }
}

/// Coerce a numeric-looking string into a stock level.
fn parse_stock(raw: Option<&str>) -> Result<u32, DomainError> {
    let raw = raw.map(str::trim).unwrap_or("");
    if raw.is_empty() {
        return Err(DomainError::validation("stock is required"));
    }
    raw.parse::<u32>().map_err(|_| {
        DomainError::validation(format!("stock must be a non-negative integer, got '{raw}'"))
    })
}

/// Import a CSV payload into the store, row by row, in file order.
///
/// Each row is validated, resolved against the committed store and against
/// rows already accepted earlier in this batch, and committed through the
/// same `create` path the single-record API uses. One bad row never blocks
/// the rest; only a storage failure aborts the batch (rows committed before
/// it stay committed).
pub fn import_csv<S>(store: &S, content: &[u8]) -> StoreResult<ImportSummary>
where
    S: InventoryStore + ?Sized,
{
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content);

    let mut summary = ImportSummary::default();
    // Identities accepted earlier in this same pass; makes the second of two
    // identical rows a duplicate of the first, regardless of committed state.
    let mut seen: HashSet<IdentityKey> = HashSet::new();

    for (index, row) in reader.deserialize::<ImportRow>().enumerate() {
        let line = index as u64 + 2;

        let row = match row {
            Ok(row) => row,
            Err(e) => {
                tracing::debug!("line {line}: unreadable row: {e}");
                summary.skipped += 1;
                continue;
            }
        };

        let draft = match row.into_draft() {
            Ok(draft) => draft,
            Err(e) => {
                tracing::debug!("line {line}: {e}");
                summary.skipped += 1;
                continue;
            }
        };

        // Validation comes before duplicate detection: an invalid row is a
        // plain skip even when its identity would also collide.
        let valid = match draft.clone().validate() {
            Ok(valid) => valid,
            Err(e) => {
                tracing::debug!("line {line}: {e}");
                summary.skipped += 1;
                continue;
            }
        };

        let key = valid.identity();
        let duplicate_of = |summary: &mut ImportSummary| {
            summary.skipped += 1;
            summary.duplicates.push(DuplicateRow {
                line,
                name: valid.name().to_string(),
                brand: valid.brand().to_string(),
                category: valid.category().to_string(),
            });
        };

        if seen.contains(&key) {
            duplicate_of(&mut summary);
            continue;
        }

        match store.create(draft) {
            Ok(_) => {
                seen.insert(key);
                summary.added += 1;
            }
            // Matches a committed record (or a racing writer beat us to it).
            Err(StoreError::Domain(DomainError::Conflict(_))) => duplicate_of(&mut summary),
            Err(StoreError::Domain(e)) => {
                tracing::debug!("line {line}: rejected: {e}");
                summary.skipped += 1;
            }
            Err(storage @ StoreError::Storage(_)) => return Err(storage),
        }
    }

    tracing::info!(
        "import finished: {} added, {} skipped ({} duplicates)",
        summary.added,
        summary.skipped,
        summary.duplicates.len()
    );
    Ok(summary)
}
