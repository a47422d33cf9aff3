use std::sync::Arc;

use thiserror::Error;

use stockroom_catalog::{Product, ProductDraft, ProductPatch};
use stockroom_core::{Actor, DomainError, ProductId};

use crate::ledger::HistoryEntry;

/// Store-level error: the domain taxonomy plus infrastructure failure.
///
/// `Storage` is not locally recoverable; a mutation that hits it commits
/// neither the record nor its history entry.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("storage failure: {0}")]
    Storage(String),
}

impl StoreError {
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// True for errors the caller can recover from by fixing the request.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Domain(_))
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Read filter for [`InventoryStore::list`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListFilter {
    /// When set, only records whose category equals this value.
    pub category: Option<String>,
}

impl ListFilter {
    pub fn by_category(category: impl Into<String>) -> Self {
        Self {
            category: Some(category.into()),
        }
    }
}

/// The authoritative mapping of product identity to current record.
///
/// Implementations must treat each mutation together with its dependent
/// history append as a single atomic unit: no reader may observe a stock
/// change without its matching ledger entry, or vice versa. Concurrent
/// updates to the same id must be strictly ordered.
pub trait InventoryStore: Send + Sync {
    /// Validate, resolve identity, and insert a new record.
    ///
    /// Fails with `Conflict` when the candidate's identity key matches an
    /// existing record. Creation is not a stock change, so no history entry
    /// is written.
    fn create(&self, draft: ProductDraft) -> StoreResult<Product>;

    /// Merge a patch over the stored record, re-validate, and persist.
    ///
    /// When the merged stock differs from the prior value, the record write
    /// and the history append commit together.
    fn update(&self, id: ProductId, patch: ProductPatch, actor: Actor) -> StoreResult<Product>;

    /// Hard-delete a record. Its ledger entries are retained as audit trail.
    fn delete(&self, id: ProductId) -> StoreResult<()>;

    fn get(&self, id: ProductId) -> StoreResult<Product>;

    /// All records matching the filter, most-recently-created first.
    fn list(&self, filter: &ListFilter) -> StoreResult<Vec<Product>>;

    /// Case-insensitive substring match on `name`, same ordering as `list`.
    fn search(&self, name: &str) -> StoreResult<Vec<Product>>;

    /// Stock-change history for a product, newest first.
    ///
    /// Works for deleted products too; the ledger outlives the record.
    fn history_for(&self, id: ProductId) -> StoreResult<Vec<HistoryEntry>>;

    /// Distinct category names in first-created order (filter discovery).
    fn categories(&self) -> StoreResult<Vec<String>>;
}

impl<S> InventoryStore for Arc<S>
where
    S: InventoryStore + ?Sized,
{
    fn create(&self, draft: ProductDraft) -> StoreResult<Product> {
        (**self).create(draft)
    }

    fn update(&self, id: ProductId, patch: ProductPatch, actor: Actor) -> StoreResult<Product> {
        (**self).update(id, patch, actor)
    }

    fn delete(&self, id: ProductId) -> StoreResult<()> {
        (**self).delete(id)
    }

    fn get(&self, id: ProductId) -> StoreResult<Product> {
        (**self).get(id)
    }

    fn list(&self, filter: &ListFilter) -> StoreResult<Vec<Product>> {
        (**self).list(filter)
    }

    fn search(&self, name: &str) -> StoreResult<Vec<Product>> {
        (**self).search(name)
    }

    fn history_for(&self, id: ProductId) -> StoreResult<Vec<HistoryEntry>> {
        (**self).history_for(id)
    }

    fn categories(&self) -> StoreResult<Vec<String>> {
        (**self).categories()
    }
}
