//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// An entity is defined by its identifier, not its attributes: an `Account`
/// renamed by an administrator is still the same account.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
