//! `stockroom-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no storage or transport
//! concerns): typed identifiers, the audit actor, and the error taxonomy.

pub mod actor;
pub mod entity;
pub mod error;
pub mod id;

pub use actor::Actor;
pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{EntryId, ProductId};
