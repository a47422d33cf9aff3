//! Append-only stock-change history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockroom_core::{Actor, EntryId, ProductId};

/// One immutable stock transition.
///
/// References a product without owning its lifetime: entries survive the
/// deletion of the record they describe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: EntryId,
    pub product_id: ProductId,
    pub timestamp: DateTime<Utc>,
    pub old_stock: u32,
    pub new_stock: u32,
    pub changed_by: Actor,
}

/// The ledger itself: an append-only log, never edited, never pruned.
///
/// This structure is not internally synchronized. The owning store mutates it
/// only inside the same critical section that persists the record change,
/// which is what makes "record + entry" one atomic unit.
#[derive(Debug, Default)]
pub struct StockLedger {
    entries: Vec<HistoryEntry>,
}

impl StockLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a transition, or do nothing when the stock did not change.
    pub fn append(
        &mut self,
        product_id: ProductId,
        old_stock: u32,
        new_stock: u32,
        changed_by: Actor,
        at: DateTime<Utc>,
    ) -> Option<&HistoryEntry> {
        if old_stock == new_stock {
            return None;
        }

        self.entries.push(HistoryEntry {
            id: EntryId::new(),
            product_id,
            timestamp: at,
            old_stock,
            new_stock,
            changed_by,
        });
        self.entries.last()
    }

    /// Entries for one product, newest first.
    pub fn entries_for(&self, product_id: ProductId) -> Vec<HistoryEntry> {
        self.entries
            .iter()
            .rev()
            .filter(|e| e.product_id == product_id)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
