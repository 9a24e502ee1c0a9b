//! Persistence boundary for the catalog and the sales ledger.
//!
//! The traits make no storage assumptions; `json` holds the file-backed
//! implementations the terminal uses and `in_memory` the ones tests use.

pub mod in_memory;
pub mod json;
pub mod r#trait;

pub use in_memory::{InMemoryCatalogStore, InMemorySalesLedger};
pub use json::{JsonCatalogStore, JsonSalesLedger};
pub use r#trait::{CatalogStore, SalesLedger, StoreError};
