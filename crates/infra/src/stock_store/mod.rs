//! Stock record storage boundary.
//!
//! The service layer owns the read-modify-write sequence; stores only need to
//! key records by `(color, cotton_part)` and hand them back.

pub mod in_memory;
pub mod postgres;

pub use in_memory::InMemoryStockStore;
pub use postgres::PostgresStockStore;

use std::sync::Arc;

use thiserror::Error;

use socks_inventory::{Color, StockKey, StockRecord};

/// Storage operation error.
///
/// These are **infrastructure errors**; domain failures (validation, not found,
/// insufficient stock) never come from a store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("stock store unavailable: {0}")]
    Unavailable(String),

    #[error("stored stock record is invalid: {0}")]
    Corrupt(String),
}

/// Keyed persistence for stock records.
#[async_trait::async_trait]
pub trait StockStore: Send + Sync {
    async fn get(&self, key: &StockKey) -> Result<Option<StockRecord>, StoreError>;

    /// Insert or replace the record stored under `record.key()`.
    async fn save(&self, record: StockRecord) -> Result<(), StoreError>;

    async fn list_by_color(&self, color: &Color) -> Result<Vec<StockRecord>, StoreError>;

    async fn list(&self) -> Result<Vec<StockRecord>, StoreError>;
}

#[async_trait::async_trait]
impl<S> StockStore for Arc<S>
where
    S: StockStore + ?Sized,
{
    async fn get(&self, key: &StockKey) -> Result<Option<StockRecord>, StoreError> {
        (**self).get(key).await
    }

    async fn save(&self, record: StockRecord) -> Result<(), StoreError> {
        (**self).save(record).await
    }

    async fn list_by_color(&self, color: &Color) -> Result<Vec<StockRecord>, StoreError> {
        (**self).list_by_color(color).await
    }

    async fn list(&self) -> Result<Vec<StockRecord>, StoreError> {
        (**self).list().await
    }
}
