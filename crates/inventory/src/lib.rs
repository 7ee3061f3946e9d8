//! Sock inventory domain module.
//!
//! This crate contains business rules for sock stock, implemented purely as
//! deterministic domain logic (no IO, no HTTP, no storage).

pub mod stock;

pub use stock::{
    Color, Comparison, CottonPart, Quantity, StockKey, StockRecord, total_quantity,
};
