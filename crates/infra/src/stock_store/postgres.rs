//! Postgres-backed stock store.
//!
//! Records live in a single `socks_stock` table whose primary key is
//! `(color, cotton_part)`, so the one-record-per-key invariant is also enforced
//! by the database.
//!
//! ## Error Mapping
//!
//! | SQLx Error | StoreError |
//! |------------|------------|
//! | Database (check constraint `23514`) | `Corrupt` |
//! | Database (other) | `Unavailable` |
//! | PoolClosed / network / other | `Unavailable` |
//!
//! Rows that no longer satisfy the domain rules (e.g. a negative quantity
//! written by hand) are reported as `Corrupt` when read.

use std::sync::Arc;

use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::instrument;

use socks_inventory::{Color, CottonPart, StockKey, StockRecord};

use super::{StockStore, StoreError};

const CREATE_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS socks_stock (
    color       TEXT        NOT NULL,
    cotton_part SMALLINT    NOT NULL CHECK (cotton_part BETWEEN 0 AND 100),
    quantity    BIGINT      NOT NULL CHECK (quantity >= 0),
    updated_at  TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    PRIMARY KEY (color, cotton_part)
)
"#;

/// Postgres-backed stock store.
///
/// `PgPool` is internally reference counted, so clones of this store share one pool.
#[derive(Debug, Clone)]
pub struct PostgresStockStore {
    pool: Arc<PgPool>,
}

impl PostgresStockStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    /// Connect and make sure the `socks_stock` table exists.
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let pool = PgPool::connect(database_url)
            .await
            .map_err(|e| map_sqlx_error("connect", e))?;
        let store = Self::new(pool);
        store.ensure_schema().await?;
        Ok(store)
    }

    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(CREATE_TABLE)
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("ensure_schema", e))?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl StockStore for PostgresStockStore {
    #[instrument(skip(self, key), fields(key = %key))]
    async fn get(&self, key: &StockKey) -> Result<Option<StockRecord>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT color, cotton_part, quantity
            FROM socks_stock
            WHERE color = $1 AND cotton_part = $2
            "#,
        )
        .bind(key.color.as_str())
        .bind(i16::from(key.cotton_part.value()))
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("get_stock", e))?;

        row.as_ref().map(row_to_record).transpose()
    }

    #[instrument(skip(self, record), fields(key = %record.key()))]
    async fn save(&self, record: StockRecord) -> Result<(), StoreError> {
        let quantity = i64::try_from(record.quantity()).map_err(|_| {
            StoreError::Corrupt(format!("quantity {} does not fit BIGINT", record.quantity()))
        })?;

        sqlx::query(
            r#"
            INSERT INTO socks_stock (color, cotton_part, quantity)
            VALUES ($1, $2, $3)
            ON CONFLICT (color, cotton_part)
            DO UPDATE SET
                quantity = EXCLUDED.quantity,
                updated_at = NOW()
            "#,
        )
        .bind(record.color().as_str())
        .bind(i16::from(record.cotton_part().value()))
        .bind(quantity)
        .execute(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("save_stock", e))?;

        Ok(())
    }

    #[instrument(skip(self, color), fields(color = %color))]
    async fn list_by_color(&self, color: &Color) -> Result<Vec<StockRecord>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT color, cotton_part, quantity
            FROM socks_stock
            WHERE color = $1
            ORDER BY cotton_part
            "#,
        )
        .bind(color.as_str())
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("list_stock_by_color", e))?;

        rows.iter().map(row_to_record).collect()
    }

    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<StockRecord>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT color, cotton_part, quantity
            FROM socks_stock
            ORDER BY color, cotton_part
            "#,
        )
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("list_stock", e))?;

        rows.iter().map(row_to_record).collect()
    }
}

fn row_to_record(row: &PgRow) -> Result<StockRecord, StoreError> {
    let color: String = row
        .try_get("color")
        .map_err(|e| StoreError::Corrupt(format!("color: {e}")))?;
    let cotton_part: i16 = row
        .try_get("cotton_part")
        .map_err(|e| StoreError::Corrupt(format!("cotton_part: {e}")))?;
    let quantity: i64 = row
        .try_get("quantity")
        .map_err(|e| StoreError::Corrupt(format!("quantity: {e}")))?;

    let color = Color::parse(color).map_err(|e| StoreError::Corrupt(e.to_string()))?;
    let cotton_part =
        CottonPart::new(i64::from(cotton_part)).map_err(|e| StoreError::Corrupt(e.to_string()))?;
    let quantity = u64::try_from(quantity)
        .map_err(|_| StoreError::Corrupt(format!("negative quantity {quantity}")))?;

    Ok(StockRecord::restore(StockKey::new(color, cotton_part), quantity))
}

fn map_sqlx_error(operation: &str, err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::Database(db_err) => {
            let msg = format!("database error in {}: {}", operation, db_err.message());
            match db_err.code().as_deref() {
                Some("23514") => StoreError::Corrupt(msg),
                _ => StoreError::Unavailable(msg),
            }
        }
        sqlx::Error::PoolClosed => {
            StoreError::Unavailable(format!("connection pool closed in {}", operation))
        }
        _ => StoreError::Unavailable(format!("sqlx error in {}: {}", operation, err)),
    }
}
