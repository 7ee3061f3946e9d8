use socks_infra::{
    InMemoryStockStore, InventoryService, PostgresStockStore, ServiceError, StoreError,
};
use socks_inventory::{Color, Comparison, CottonPart, Quantity, StockRecord};

use crate::config::{ApiConfig, StorageConfig};

/// Inventory service bound to the configured storage backend.
#[derive(Debug)]
pub enum AppServices {
    InMemory {
        inventory: InventoryService<InMemoryStockStore>,
    },
    Persistent {
        inventory: InventoryService<PostgresStockStore>,
    },
}

pub async fn build_services(config: &ApiConfig) -> Result<AppServices, StoreError> {
    match &config.storage {
        StorageConfig::InMemory => Ok(AppServices::in_memory()),
        StorageConfig::Postgres { database_url } => AppServices::persistent(database_url).await,
    }
}

impl AppServices {
    /// In-memory wiring (dev/test). Stock is lost on restart.
    pub fn in_memory() -> Self {
        AppServices::InMemory {
            inventory: InventoryService::new(InMemoryStockStore::new()),
        }
    }

    pub async fn persistent(database_url: &str) -> Result<Self, StoreError> {
        let store = PostgresStockStore::connect(database_url).await?;
        Ok(AppServices::Persistent {
            inventory: InventoryService::new(store),
        })
    }

    pub fn backend(&self) -> &'static str {
        match self {
            AppServices::InMemory { .. } => "in_memory",
            AppServices::Persistent { .. } => "postgres",
        }
    }

    pub async fn add_stock(
        &self,
        color: Color,
        cotton_part: CottonPart,
        quantity: Quantity,
    ) -> Result<StockRecord, ServiceError> {
        match self {
            AppServices::InMemory { inventory } => {
                inventory.add_stock(color, cotton_part, quantity).await
            }
            AppServices::Persistent { inventory } => {
                inventory.add_stock(color, cotton_part, quantity).await
            }
        }
    }

    pub async fn remove_stock(
        &self,
        color: Color,
        cotton_part: CottonPart,
        quantity: Quantity,
    ) -> Result<Vec<StockRecord>, ServiceError> {
        match self {
            AppServices::InMemory { inventory } => {
                inventory.remove_stock(color, cotton_part, quantity).await
            }
            AppServices::Persistent { inventory } => {
                inventory.remove_stock(color, cotton_part, quantity).await
            }
        }
    }

    pub async fn query_quantity(
        &self,
        color: &Color,
        comparison: Comparison,
        cotton_part: CottonPart,
    ) -> Result<u128, ServiceError> {
        match self {
            AppServices::InMemory { inventory } => {
                inventory.query_quantity(color, comparison, cotton_part).await
            }
            AppServices::Persistent { inventory } => {
                inventory.query_quantity(color, comparison, cotton_part).await
            }
        }
    }
}
