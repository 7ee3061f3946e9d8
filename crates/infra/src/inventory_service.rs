//! Stock operations over a `StockStore`.
//!
//! ```text
//! add_stock     : get(key) -> new | add -> save
//! remove_stock  : get(key) -> NotFound | remove -> save
//! query_quantity: list_by_color -> filter by comparison -> sum
//! ```
//!
//! Inputs arrive already validated (`Color`, `CottonPart`, `Quantity` can only
//! hold in-range values). Read-modify-write sequences run under one async
//! write lock, so concurrent add/remove calls in a process cannot create a
//! second record for a key or drive a quantity below zero.

use thiserror::Error;
use tokio::sync::Mutex;

use socks_core::DomainError;
use socks_inventory::{Color, Comparison, CottonPart, Quantity, StockKey, StockRecord, total_quantity};

use crate::stock_store::{StockStore, StoreError};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Owns the stock record set (through its store) and applies income, outcome
/// and quantity queries to it.
#[derive(Debug)]
pub struct InventoryService<S> {
    store: S,
    write_lock: Mutex<()>,
}

impl<S> InventoryService<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S> InventoryService<S>
where
    S: StockStore,
{
    /// Register incoming pairs. Creates the record on first income for a key.
    pub async fn add_stock(
        &self,
        color: Color,
        cotton_part: CottonPart,
        quantity: Quantity,
    ) -> Result<StockRecord, ServiceError> {
        let key = StockKey::new(color, cotton_part);
        let _guard = self.write_lock.lock().await;

        let record = match self.store.get(&key).await? {
            Some(mut existing) => {
                existing.add(quantity)?;
                existing
            }
            None => StockRecord::new(key, quantity),
        };
        self.store.save(record.clone()).await?;

        tracing::info!(
            color = %record.color(),
            cotton_part = %record.cotton_part(),
            added = quantity.get(),
            quantity = record.quantity(),
            "added socks"
        );
        Ok(record)
    }

    /// Take pairs out of stock. Returns the affected records.
    pub async fn remove_stock(
        &self,
        color: Color,
        cotton_part: CottonPart,
        quantity: Quantity,
    ) -> Result<Vec<StockRecord>, ServiceError> {
        let key = StockKey::new(color, cotton_part);
        let _guard = self.write_lock.lock().await;

        let Some(mut record) = self.store.get(&key).await? else {
            tracing::warn!(key = %key, "no socks found to remove");
            return Err(DomainError::not_found().into());
        };

        if let Err(e) = record.remove(quantity) {
            tracing::warn!(key = %key, error = %e, "rejected socks removal");
            return Err(e.into());
        }
        self.store.save(record.clone()).await?;

        tracing::info!(
            key = %key,
            removed = quantity.get(),
            quantity = record.quantity(),
            "removed socks"
        );
        Ok(vec![record])
    }

    /// Total pairs of `color` whose cotton part satisfies `comparison`.
    ///
    /// A zero total is reported as `NotFound`.
    pub async fn query_quantity(
        &self,
        color: &Color,
        comparison: Comparison,
        cotton_part: CottonPart,
    ) -> Result<u128, ServiceError> {
        let records = self.store.list_by_color(color).await?;
        let total = total_quantity(&records, color, comparison, cotton_part);

        if total == 0 {
            tracing::info!(
                color = %color,
                operation = %comparison,
                cotton_part = %cotton_part,
                "no socks matched query"
            );
            return Err(DomainError::not_found().into());
        }

        tracing::info!(
            color = %color,
            operation = %comparison,
            cotton_part = %cotton_part,
            total = %total,
            "queried socks"
        );
        Ok(total)
    }
}
