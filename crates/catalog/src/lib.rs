//! Catalog domain module.
//!
//! This crate contains business rules for product records, implemented purely
//! as deterministic domain logic (no IO, no HTTP, no storage).

pub mod identity;
pub mod product;

pub use identity::{IdentityKey, resolve};
pub use product::{Product, ProductDraft, ProductPatch, ProductStatus, ValidDraft};
