//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects have no identity and are compared by their attribute values.
/// `Money` and `Color` are value objects; `Company` is an entity.
///
/// ```ignore
/// let a: Money = "8.50".parse()?;
/// let b = Money::from_cents(850);
/// assert_eq!(a, b);
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
