//! Value object trait: equality by value, not identity.
//!
//! Cart lines and sales reports are values: a line records what an item looked
//! like when it entered the cart, and a report records what was sold. Neither
//! follows later changes to the catalog.

/// Marker trait for value objects.
///
/// ## Value Object vs Entity
///
/// - **Value Object**: No identity (two value objects with same values are equal)
/// - **Entity**: Has identity (two entities with same ID are the same entity)
///
/// A catalog `Item` is an entity (its stock changes, its id does not). A
/// `CartLine` holds a *copy* of an item and is a value object: restocking the
/// catalog afterwards must not alter the price recorded on the line.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
