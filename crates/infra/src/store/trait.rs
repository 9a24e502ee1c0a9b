use std::sync::Arc;

use thiserror::Error;

use pos_inventory::Item;
use pos_sales::Report;

/// Storage failures for the catalog and the sales ledger.
///
/// `resource` names what was being accessed (a file path for the JSON
/// stores) so the operator can find it.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The resource could not be read or written.
    #[error("failed to access {resource}: {source}")]
    Io {
        resource: String,
        #[source]
        source: std::io::Error,
    },

    /// The resource was readable but did not hold well-formed data.
    #[error("malformed data in {resource}: {reason}")]
    Format { resource: String, reason: String },
}

impl StoreError {
    pub fn io(resource: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            resource: resource.into(),
            source,
        }
    }

    pub fn format(resource: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Format {
            resource: resource.into(),
            reason: reason.into(),
        }
    }
}

/// Persistent home of the sellable item list.
///
/// The catalog must already exist: an absent resource is an `Io` error, not
/// an empty catalog.
pub trait CatalogStore: Send + Sync {
    /// Load every item, in stored order.
    fn load(&self) -> Result<Vec<Item>, StoreError>;

    /// Replace the stored catalog with `items`.
    ///
    /// Implementations must never leave a partially written catalog visible
    /// to readers.
    fn save(&self, items: &[Item]) -> Result<(), StoreError>;
}

/// Append-only history of committed sales.
///
/// `append` rewrites the whole history; cost grows with the number of
/// stored reports.
pub trait SalesLedger: Send + Sync {
    /// Load every report, oldest first. An absent resource is an empty history.
    fn load(&self) -> Result<Vec<Report>, StoreError>;

    /// Add `report` after the last stored report.
    fn append(&self, report: &Report) -> Result<(), StoreError>;
}

impl<S> CatalogStore for Arc<S>
where
    S: CatalogStore + ?Sized,
{
    fn load(&self) -> Result<Vec<Item>, StoreError> {
        (**self).load()
    }

    fn save(&self, items: &[Item]) -> Result<(), StoreError> {
        (**self).save(items)
    }
}

impl<S> SalesLedger for Arc<S>
where
    S: SalesLedger + ?Sized,
{
    fn load(&self) -> Result<Vec<Report>, StoreError> {
        (**self).load()
    }

    fn append(&self, report: &Report) -> Result<(), StoreError> {
        (**self).append(report)
    }
}
