//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value** - two value
/// objects with the same attribute values are the same value. Contrast with
/// entities, which are identified by id regardless of attribute values.
///
/// `Money` is the canonical example: `$100.00` equals `$100.00` no matter
/// where either amount came from. To "modify" a value object, construct a
/// new one.
///
/// The supertraits keep value objects cheap to copy, comparable, and
/// debuggable.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
