//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are immutable and compared by their attribute values. Their
/// constructors are the only place input is validated, so holding one is proof
/// that the value is in range.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// struct CottonPart(u8);
///
/// impl ValueObject for CottonPart {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
