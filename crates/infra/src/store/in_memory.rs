use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use pos_inventory::Item;
use pos_sales::Report;

use super::r#trait::{CatalogStore, SalesLedger, StoreError};

const RESOURCE_CATALOG: &str = "in-memory catalog";
const RESOURCE_LEDGER: &str = "in-memory ledger";

fn lock_poisoned(resource: &str) -> StoreError {
    StoreError::io(resource, std::io::Error::other("lock poisoned"))
}

fn simulated_failure(resource: &str) -> StoreError {
    StoreError::io(resource, std::io::Error::other("simulated write failure"))
}

/// In-memory catalog store.
///
/// Intended for tests/dev. Counts successful saves and can be told to fail
/// writes, to exercise best-effort persistence.
#[derive(Debug, Default)]
pub struct InMemoryCatalogStore {
    items: RwLock<Vec<Item>>,
    saves: AtomicUsize,
    fail_writes: AtomicBool,
}

impl InMemoryCatalogStore {
    pub fn new(items: Vec<Item>) -> Self {
        Self {
            items: RwLock::new(items),
            ..Self::default()
        }
    }

    /// Current stored items.
    pub fn snapshot(&self) -> Vec<Item> {
        self.items.read().map(|i| i.clone()).unwrap_or_default()
    }

    /// Number of successful `save` calls.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

impl CatalogStore for InMemoryCatalogStore {
    fn load(&self) -> Result<Vec<Item>, StoreError> {
        let items = self
            .items
            .read()
            .map_err(|_| lock_poisoned(RESOURCE_CATALOG))?;
        Ok(items.clone())
    }

    fn save(&self, items: &[Item]) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(simulated_failure(RESOURCE_CATALOG));
        }
        let mut stored = self
            .items
            .write()
            .map_err(|_| lock_poisoned(RESOURCE_CATALOG))?;
        *stored = items.to_vec();
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// In-memory sales ledger.
///
/// Intended for tests/dev.
#[derive(Debug, Default)]
pub struct InMemorySalesLedger {
    reports: RwLock<Vec<Report>>,
    fail_writes: AtomicBool,
}

impl InMemorySalesLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

impl SalesLedger for InMemorySalesLedger {
    fn load(&self) -> Result<Vec<Report>, StoreError> {
        let reports = self
            .reports
            .read()
            .map_err(|_| lock_poisoned(RESOURCE_LEDGER))?;
        Ok(reports.clone())
    }

    fn append(&self, report: &Report) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(simulated_failure(RESOURCE_LEDGER));
        }
        let mut reports = self
            .reports
            .write()
            .map_err(|_| lock_poisoned(RESOURCE_LEDGER))?;
        reports.push(report.clone());
        Ok(())
    }
}
