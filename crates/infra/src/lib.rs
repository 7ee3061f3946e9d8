//! Infrastructure layer: stock storage and the inventory service built on it.

pub mod inventory_service;
pub mod stock_store;

pub use inventory_service::{InventoryService, ServiceError};
pub use stock_store::{InMemoryStockStore, PostgresStockStore, StockStore, StoreError};
