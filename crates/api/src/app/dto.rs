use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use socks_core::DomainResult;
use socks_inventory::{Color, Comparison, CottonPart, Quantity};

// -------------------------
// Request DTOs
// -------------------------

/// Body of `/api/socks/income` and `/api/socks/outcome`.
///
/// Numeric fields are signed so that out-of-range values reach validation
/// and get a descriptive message instead of a deserializer error.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SocksRequest {
    /// Non-blank color, matched exactly.
    #[schema(example = "red")]
    pub color: String,
    /// Cotton percentage, 0..=100.
    #[schema(minimum = 0, maximum = 100, example = 50)]
    pub cotton_part: i64,
    /// Number of pairs, at least 1.
    #[schema(minimum = 1, example = 10)]
    pub quantity: i64,
}

/// Query string of `GET /api/socks`.
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct SocksQuery {
    /// Color to count.
    pub color: String,
    /// One of `equal`, `moreThan` (alias `greaterThan`), `lessThan`.
    pub operation: String,
    /// Cotton percentage to compare against, 0..=100.
    #[param(minimum = 0, maximum = 100)]
    pub cotton_part: i64,
}

/// A validated income/outcome line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocksLine {
    pub color: Color,
    pub cotton_part: CottonPart,
    pub quantity: Quantity,
}

/// A validated stock query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockQuery {
    pub color: Color,
    pub comparison: Comparison,
    pub cotton_part: CottonPart,
}

impl SocksRequest {
    pub fn validate(self) -> DomainResult<SocksLine> {
        Ok(SocksLine {
            color: Color::parse(self.color)?,
            cotton_part: CottonPart::new(self.cotton_part)?,
            quantity: Quantity::new(self.quantity)?,
        })
    }
}

impl SocksQuery {
    pub fn validate(self) -> DomainResult<StockQuery> {
        Ok(StockQuery {
            comparison: self.operation.parse()?,
            color: Color::parse(self.color)?,
            cotton_part: CottonPart::new(self.cotton_part)?,
        })
    }
}
