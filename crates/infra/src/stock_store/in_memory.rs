use std::collections::HashMap;
use std::sync::RwLock;

use socks_core::Entity;
use socks_inventory::{Color, StockKey, StockRecord};

use super::{StockStore, StoreError};

/// In-memory stock store for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryStockStore {
    inner: RwLock<HashMap<StockKey, StockRecord>>,
}

impl InMemoryStockStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: T) -> StoreError {
    StoreError::Unavailable("in-memory stock store lock poisoned".to_string())
}

#[async_trait::async_trait]
impl StockStore for InMemoryStockStore {
    async fn get(&self, key: &StockKey) -> Result<Option<StockRecord>, StoreError> {
        let map = self.inner.read().map_err(poisoned)?;
        Ok(map.get(key).cloned())
    }

    async fn save(&self, record: StockRecord) -> Result<(), StoreError> {
        let mut map = self.inner.write().map_err(poisoned)?;
        map.insert(record.id().clone(), record);
        Ok(())
    }

    async fn list_by_color(&self, color: &Color) -> Result<Vec<StockRecord>, StoreError> {
        let map = self.inner.read().map_err(poisoned)?;
        Ok(map
            .values()
            .filter(|r| r.color() == color)
            .cloned()
            .collect())
    }

    async fn list(&self) -> Result<Vec<StockRecord>, StoreError> {
        let map = self.inner.read().map_err(poisoned)?;
        Ok(map.values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use socks_inventory::{CottonPart, Quantity};

    fn key(color: &str, part: i64) -> StockKey {
        StockKey::new(Color::parse(color).unwrap(), CottonPart::new(part).unwrap())
    }

    #[tokio::test]
    async fn save_replaces_record_with_same_key() {
        let store = InMemoryStockStore::new();
        store
            .save(StockRecord::new(key("red", 50), Quantity::new(3).unwrap()))
            .await
            .unwrap();
        store
            .save(StockRecord::restore(key("red", 50), 9))
            .await
            .unwrap();

        let all = store.list().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].quantity(), 9);
    }

    #[tokio::test]
    async fn list_by_color_filters_exactly() {
        let store = InMemoryStockStore::new();
        for (color, part) in [("red", 10), ("red", 20), ("blue", 10)] {
            store
                .save(StockRecord::new(key(color, part), Quantity::new(1).unwrap()))
                .await
                .unwrap();
        }

        let red = store
            .list_by_color(&Color::parse("red").unwrap())
            .await
            .unwrap();
        assert_eq!(red.len(), 2);
        assert!(red.iter().all(|r| r.color().as_str() == "red"));

        assert!(store.get(&key("green", 10)).await.unwrap().is_none());
    }
}
