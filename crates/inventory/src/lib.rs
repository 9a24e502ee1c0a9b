//! Inventory domain module.
//!
//! This crate contains business rules for the sellable catalog, implemented
//! purely as deterministic domain logic (no IO, no terminal, no storage).

pub mod catalog;
pub mod item;

pub use catalog::Catalog;
pub use item::Item;
