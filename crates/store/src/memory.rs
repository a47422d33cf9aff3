use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;

use stockroom_catalog::{Product, ProductDraft, ProductPatch, resolve};
use stockroom_core::{Actor, DomainError, ProductId};

use crate::ledger::{HistoryEntry, StockLedger};
use crate::r#trait::{InventoryStore, ListFilter, StoreError, StoreResult};

#[derive(Debug, Default)]
struct State {
    // Insertion order is creation order; reads reverse it.
    products: Vec<Product>,
    ledger: StockLedger,
}

/// In-memory inventory store.
///
/// A single lock guards the product set and the ledger together, so a
/// mutation plus its dependent history append is one critical section: no
/// reader can observe a stock change without its matching entry, and
/// concurrent updates to the same id are strictly ordered. Starts empty;
/// there is no teardown.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, State>> {
        self.state
            .read()
            .map_err(|_| StoreError::storage("lock poisoned"))
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, State>> {
        self.state
            .write()
            .map_err(|_| StoreError::storage("lock poisoned"))
    }
}

impl InventoryStore for MemoryStore {
    fn create(&self, draft: ProductDraft) -> StoreResult<Product> {
        let valid = draft.validate()?;
        let key = valid.identity();

        // Resolve + insert under one write guard so two racing creates of the
        // same identity cannot both pass the duplicate check.
        let mut state = self.write()?;
        if resolve(&key, state.products.iter()).is_some() {
            return Err(DomainError::conflict(format!(
                "product '{}' ({}, {}) already exists",
                valid.name(),
                valid.brand(),
                valid.category()
            ))
            .into());
        }

        let product = valid.into_product(ProductId::new(), Utc::now());
        state.products.push(product.clone());
        tracing::info!("created product {} ('{}')", product.id, product.name);
        Ok(product)
    }

    fn update(&self, id: ProductId, patch: ProductPatch, actor: Actor) -> StoreResult<Product> {
        let mut state = self.write()?;
        let pos = state
            .products
            .iter()
            .position(|p| p.id == id)
            .ok_or(DomainError::NotFound)?;

        let current = &state.products[pos];
        let old_stock = current.stock;
        let created_at = current.created_at;
        let updated = current.merged(patch).validate()?.into_product(id, created_at);

        // Record write + ledger append stay inside the same guard: that is
        // the atomic unit.
        if updated.stock != old_stock {
            state
                .ledger
                .append(id, old_stock, updated.stock, actor, Utc::now());
            tracing::info!("stock for {} changed {} -> {}", id, old_stock, updated.stock);
        }
        state.products[pos] = updated.clone();
        Ok(updated)
    }

    fn delete(&self, id: ProductId) -> StoreResult<()> {
        let mut state = self.write()?;
        let pos = state
            .products
            .iter()
            .position(|p| p.id == id)
            .ok_or(DomainError::NotFound)?;
        let removed = state.products.remove(pos);
        tracing::info!("deleted product {} ('{}')", removed.id, removed.name);
        Ok(())
    }

    fn get(&self, id: ProductId) -> StoreResult<Product> {
        self.read()?
            .products
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| DomainError::NotFound.into())
    }

    fn list(&self, filter: &ListFilter) -> StoreResult<Vec<Product>> {
        let state = self.read()?;
        Ok(state
            .products
            .iter()
            .rev()
            .filter(|p| match filter.category.as_deref() {
                Some(category) => p.category == category,
                None => true,
            })
            .cloned()
            .collect())
    }

    fn search(&self, name: &str) -> StoreResult<Vec<Product>> {
        let needle = name.to_lowercase();
        let state = self.read()?;
        Ok(state
            .products
            .iter()
            .rev()
            .filter(|p| p.name.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    fn history_for(&self, id: ProductId) -> StoreResult<Vec<HistoryEntry>> {
        Ok(self.read()?.ledger.entries_for(id))
    }

    fn categories(&self) -> StoreResult<Vec<String>> {
        let state = self.read()?;
        let mut seen: Vec<String> = Vec::new();
        for p in &state.products {
            if !seen.iter().any(|c| c == &p.category) {
                seen.push(p.category.clone());
            }
        }
        Ok(seen)
    }
}
