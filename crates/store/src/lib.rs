//! Inventory store: the authoritative product record owner plus its
//! append-only stock-change ledger.
//!
//! Every mutation path (single-record API or import row) commits through the
//! same [`InventoryStore`] operations, so manual edits and bulk imports obey
//! identical invariants.

pub mod ledger;
pub mod memory;
mod r#trait;


pub use ledger::{HistoryEntry, StockLedger};
pub use memory::MemoryStore;
pub use r#trait::{InventoryStore, ListFilter, StoreError, StoreResult};
