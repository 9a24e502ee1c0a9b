//! Infrastructure layer: file-backed stores, the checkout engine, receipts
//! and configuration.

pub mod config;
pub mod receipt;
pub mod session;
pub mod store;

pub use config::{ConfigError, PosConfig};
pub use receipt::{ReceiptError, ReceiptWriter};
pub use session::{
    Completion, Removal, Sale, Selection, SessionError, SessionState, TransactionSession,
    WriteStatus,
};
pub use store::{
    CatalogStore, InMemoryCatalogStore, InMemorySalesLedger, JsonCatalogStore, JsonSalesLedger,
    SalesLedger, StoreError,
};
