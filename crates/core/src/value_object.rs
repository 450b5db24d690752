//! Value object trait: equality by value, not identity.
//!
//! Value objects are domain objects with **no identity** - they are defined
//! entirely by their attribute values. Two value objects with the same values
//! are considered equal.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. To "modify" one,
/// create a new one with the new values. This gives value semantics (safe to
/// copy and share) and keeps them predictable in concurrent code.
///
/// ## Value Object vs Entity
///
/// - **Value Object**: no identity. `Money::from_cents(100)` equals any other
///   `Money::from_cents(100)`.
/// - **Entity**: has identity. Two `Account`s with the same name are still two
///   different accounts if their ids differ.
///
/// The trait requires `Clone` (values are copied, not referenced),
/// `PartialEq` (compared by attribute values) and `Debug` (logging, testing).
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
