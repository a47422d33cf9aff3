//! CSV import/export pipeline for the inventory store.
//!
//! Import decomposes a payload into rows and commits each accepted row
//! through the same store mutation path the single-record API uses; export
//! serializes the current store back to CSV. Row failures never abort a
//! batch; they are aggregated into the returned summary.

pub mod export;
pub mod import;

pub use export::{ExportError, export_csv};
pub use import::{DuplicateRow, ImportSummary, import_csv};
