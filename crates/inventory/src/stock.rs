use core::fmt;
use core::str::FromStr;

use socks_core::{DomainError, DomainResult, Entity, ValueObject};

/// Sock color. Non-blank, stored verbatim (case-sensitive).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Color(String);

impl Color {
    pub fn parse(raw: impl Into<String>) -> DomainResult<Self> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(DomainError::validation("color cannot be empty"));
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ValueObject for Color {}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Cotton content of a pair, as a percentage in `0..=100`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CottonPart(u8);

impl CottonPart {
    pub const MAX: u8 = 100;

    pub fn new(value: i64) -> DomainResult<Self> {
        match u8::try_from(value) {
            Ok(v) if v <= Self::MAX => Ok(Self(v)),
            _ => Err(DomainError::validation(format!(
                "cottonPart must be between 0 and {}, got {value}",
                Self::MAX
            ))),
        }
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl ValueObject for CottonPart {}

impl fmt::Display for CottonPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Number of pairs moved by a single income/outcome request. Always positive.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Quantity(u64);

impl Quantity {
    pub fn new(value: i64) -> DomainResult<Self> {
        match u64::try_from(value) {
            Ok(v) if v > 0 => Ok(Self(v)),
            _ => Err(DomainError::validation(format!(
                "quantity must be positive, got {value}"
            ))),
        }
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

impl ValueObject for Quantity {}

/// Identity of a stock record. At most one record exists per key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StockKey {
    pub color: Color,
    pub cotton_part: CottonPart,
}

impl StockKey {
    pub fn new(color: Color, cotton_part: CottonPart) -> Self {
        Self { color, cotton_part }
    }
}

impl fmt::Display for StockKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}%", self.color, self.cotton_part)
    }
}

/// Aggregate count of pairs sharing a (color, cotton part) key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockRecord {
    key: StockKey,
    quantity: u64,
}

impl StockRecord {
    /// Largest quantity a single record may hold (fits a signed 64-bit column).
    pub const MAX_QUANTITY: u64 = i64::MAX as u64;

    /// First income for a key.
    pub fn new(key: StockKey, quantity: Quantity) -> Self {
        Self {
            key,
            quantity: quantity.get(),
        }
    }

    /// Rehydrate a record read back from storage. Zero is a valid stored quantity.
    pub fn restore(key: StockKey, quantity: u64) -> Self {
        Self { key, quantity }
    }

    pub fn key(&self) -> &StockKey {
        &self.key
    }

    pub fn color(&self) -> &Color {
        &self.key.color
    }

    pub fn cotton_part(&self) -> CottonPart {
        self.key.cotton_part
    }

    pub fn quantity(&self) -> u64 {
        self.quantity
    }

    /// Add pairs to stock. The record is left untouched when the result would
    /// exceed `MAX_QUANTITY`.
    pub fn add(&mut self, quantity: Quantity) -> DomainResult<()> {
        self.quantity = self
            .quantity
            .checked_add(quantity.get())
            .filter(|q| *q <= Self::MAX_QUANTITY)
            .ok_or_else(|| DomainError::validation("quantity overflow"))?;
        Ok(())
    }

    /// Take pairs out of stock. Leaves the record untouched on failure; a record
    /// drained to zero is kept.
    pub fn remove(&mut self, quantity: Quantity) -> DomainResult<()> {
        let requested = quantity.get();
        if requested > self.quantity {
            return Err(DomainError::insufficient_stock(requested, self.quantity));
        }
        self.quantity -= requested;
        Ok(())
    }
}

impl Entity for StockRecord {
    type Id = StockKey;

    fn id(&self) -> &Self::Id {
        &self.key
    }
}

/// Predicate on a record's cotton part relative to a requested threshold.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Comparison {
    Equal,
    GreaterThan,
    LessThan,
}

/// Accepted `operation` spellings. Matching is case-sensitive.
const COMPARISON_NAMES: &[(&str, Comparison)] = &[
    ("equal", Comparison::Equal),
    ("moreThan", Comparison::GreaterThan),
    ("greaterThan", Comparison::GreaterThan),
    ("lessThan", Comparison::LessThan),
];

impl Comparison {
    /// Canonical wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Comparison::Equal => "equal",
            Comparison::GreaterThan => "moreThan",
            Comparison::LessThan => "lessThan",
        }
    }

    pub fn matches(&self, record_part: CottonPart, threshold: CottonPart) -> bool {
        match self {
            Comparison::Equal => record_part == threshold,
            Comparison::GreaterThan => record_part > threshold,
            Comparison::LessThan => record_part < threshold,
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Comparison {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        COMPARISON_NAMES
            .iter()
            .find(|(name, _)| *name == s)
            .map(|(_, cmp)| *cmp)
            .ok_or_else(|| {
                DomainError::validation(format!(
                    "unknown operation '{s}', expected one of: equal, moreThan, lessThan"
                ))
            })
    }
}

/// Total pairs of `color` whose cotton part satisfies `comparison` against `cotton_part`.
///
/// Summed as `u128`: at most 101 records match a color, so the total is exact.
pub fn total_quantity<'a, I>(
    records: I,
    color: &Color,
    comparison: Comparison,
    cotton_part: CottonPart,
) -> u128
where
    I: IntoIterator<Item = &'a StockRecord>,
{
    records
        .into_iter()
        .filter(|r| r.color() == color && comparison.matches(r.cotton_part(), cotton_part))
        .map(|r| u128::from(r.quantity()))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn key(color: &str, part: i64) -> StockKey {
        StockKey::new(Color::parse(color).unwrap(), CottonPart::new(part).unwrap())
    }

    fn qty(n: i64) -> Quantity {
        Quantity::new(n).unwrap()
    }

    #[test]
    fn color_rejects_blank() {
        assert!(matches!(Color::parse(""), Err(DomainError::Validation(_))));
        assert!(matches!(Color::parse("   "), Err(DomainError::Validation(_))));
        assert_eq!(Color::parse("Red").unwrap().as_str(), "Red");
    }

    #[test]
    fn cotton_part_bounds_are_inclusive() {
        assert_eq!(CottonPart::new(0).unwrap().value(), 0);
        assert_eq!(CottonPart::new(100).unwrap().value(), 100);
        assert!(CottonPart::new(101).is_err());
        assert!(CottonPart::new(-1).is_err());
    }

    #[test]
    fn quantity_must_be_positive() {
        assert!(Quantity::new(0).is_err());
        assert!(Quantity::new(-5).is_err());
        assert_eq!(Quantity::new(3).unwrap().get(), 3);
    }

    #[test]
    fn add_accumulates() {
        let mut record = StockRecord::new(key("red", 50), qty(10));
        record.add(qty(4)).unwrap();
        assert_eq!(record.quantity(), 14);
    }

    #[test]
    fn add_rejects_overflow() {
        let mut record = StockRecord::restore(key("red", 50), u64::MAX);
        let err = record.add(qty(1)).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(record.quantity(), u64::MAX);
    }

    #[test]
    fn add_is_capped_at_signed_64_bit_range() {
        let mut record = StockRecord::new(key("red", 10), qty(i64::MAX));
        assert_eq!(record.quantity(), StockRecord::MAX_QUANTITY);

        let err = record.add(qty(i64::MAX)).unwrap_err();
        assert_eq!(err, DomainError::validation("quantity overflow"));
        assert_eq!(record.quantity(), StockRecord::MAX_QUANTITY);

        let mut record = StockRecord::restore(key("red", 20), StockRecord::MAX_QUANTITY - 1);
        record.add(qty(1)).unwrap();
        assert_eq!(record.quantity(), StockRecord::MAX_QUANTITY);
        assert!(record.add(qty(1)).is_err());
    }

    #[test]
    fn total_is_exact_beyond_u64() {
        let records = vec![
            StockRecord::new(key("red", 10), qty(i64::MAX)),
            StockRecord::new(key("red", 20), qty(i64::MAX)),
            StockRecord::new(key("red", 30), qty(i64::MAX)),
        ];
        let red = Color::parse("red").unwrap();
        let total = total_quantity(&records, &red, Comparison::GreaterThan, CottonPart::new(0).unwrap());
        assert_eq!(total, 3 * u128::from(StockRecord::MAX_QUANTITY));
        assert!(total > u128::from(u64::MAX));
    }

    #[test]
    fn remove_to_zero_keeps_record() {
        let mut record = StockRecord::new(key("red", 50), qty(5));
        record.remove(qty(5)).unwrap();
        assert_eq!(record.quantity(), 0);
    }

    #[test]
    fn remove_more_than_available_is_rejected_and_leaves_record() {
        let mut record = StockRecord::new(key("red", 50), qty(5));
        let err = record.remove(qty(6)).unwrap_err();
        assert_eq!(err, DomainError::insufficient_stock(6, 5));
        assert_eq!(record.quantity(), 5);
    }

    #[test]
    fn comparison_parses_static_names() {
        assert_eq!("equal".parse::<Comparison>().unwrap(), Comparison::Equal);
        assert_eq!("moreThan".parse::<Comparison>().unwrap(), Comparison::GreaterThan);
        assert_eq!("greaterThan".parse::<Comparison>().unwrap(), Comparison::GreaterThan);
        assert_eq!("lessThan".parse::<Comparison>().unwrap(), Comparison::LessThan);
        assert!("EQUAL".parse::<Comparison>().is_err());
        assert!("between".parse::<Comparison>().is_err());
    }

    #[test]
    fn canonical_names_round_trip() {
        for cmp in [Comparison::Equal, Comparison::GreaterThan, Comparison::LessThan] {
            assert_eq!(cmp.as_str().parse::<Comparison>().unwrap(), cmp);
        }
    }

    #[test]
    fn greater_than_selects_more_cotton() {
        let records = vec![
            StockRecord::new(key("red", 50), qty(10)),
            StockRecord::new(key("red", 80), qty(5)),
            StockRecord::new(key("blue", 90), qty(7)),
        ];
        let red = Color::parse("red").unwrap();
        let sixty = CottonPart::new(60).unwrap();

        assert_eq!(total_quantity(&records, &red, Comparison::GreaterThan, sixty), 5);
        assert_eq!(total_quantity(&records, &red, Comparison::LessThan, sixty), 10);
        assert_eq!(total_quantity(&records, &red, Comparison::Equal, sixty), 0);
        assert_eq!(
            total_quantity(&records, &red, Comparison::Equal, CottonPart::new(80).unwrap()),
            5
        );
    }

    #[test]
    fn color_match_is_exact() {
        let records = vec![StockRecord::new(key("Red", 50), qty(10))];
        let red = Color::parse("red").unwrap();
        assert_eq!(
            total_quantity(&records, &red, Comparison::Equal, CottonPart::new(50).unwrap()),
            0
        );
    }

    proptest! {
        /// The three comparisons partition a color's stock: equal + greater + less
        /// always adds up to everything of that color.
        #[test]
        fn comparisons_partition_stock(
            parts in prop::collection::vec((0i64..=100, 1i64..1_000), 0..20),
            threshold in 0i64..=100,
        ) {
            let records: Vec<StockRecord> = parts
                .iter()
                .map(|(p, q)| StockRecord::new(key("red", *p), qty(*q)))
                .collect();
            let red = Color::parse("red").unwrap();
            let t = CottonPart::new(threshold).unwrap();

            let eq = total_quantity(&records, &red, Comparison::Equal, t);
            let gt = total_quantity(&records, &red, Comparison::GreaterThan, t);
            let lt = total_quantity(&records, &red, Comparison::LessThan, t);
            let all: u128 = records.iter().map(|r| u128::from(r.quantity())).sum();

            prop_assert_eq!(eq + gt + lt, all);
        }

        #[test]
        fn add_then_remove_restores_quantity(start in 1i64..10_000, delta in 1i64..10_000) {
            let mut record = StockRecord::new(key("red", 40), qty(start));
            record.add(qty(delta)).unwrap();
            record.remove(qty(delta)).unwrap();
            prop_assert_eq!(record.quantity(), start as u64);
        }
    }
}
