//! JSON-file stores.
//!
//! Both files hold a pretty-printed JSON array. Writes go to a sibling
//! `.tmp` file which is then renamed over the target, so a concurrent reader
//! sees either the old or the new content.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;

use pos_inventory::{Catalog, Item};
use pos_sales::Report;

use super::r#trait::{CatalogStore, SalesLedger, StoreError};

/// Catalog kept in a JSON file (`[{"id", "name", "price", "stock"}, ...]`).
#[derive(Debug, Clone)]
pub struct JsonCatalogStore {
    path: PathBuf,
}

impl JsonCatalogStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn resource(&self) -> String {
        self.path.display().to_string()
    }
}

impl CatalogStore for JsonCatalogStore {
    fn load(&self) -> Result<Vec<Item>, StoreError> {
        let bytes = fs::read(&self.path).map_err(|e| StoreError::io(self.resource(), e))?;
        let items: Vec<Item> = serde_json::from_slice(&bytes)
            .map_err(|e| StoreError::format(self.resource(), e.to_string()))?;

        // Duplicate ids or bad prices make the file unusable as a catalog.
        let catalog =
            Catalog::new(items).map_err(|e| StoreError::format(self.resource(), e.to_string()))?;
        Ok(catalog.into_items())
    }

    fn save(&self, items: &[Item]) -> Result<(), StoreError> {
        write_json_atomic(&self.path, items)
    }
}

/// Sales ledger kept in a JSON file, one report per array element.
#[derive(Debug, Clone)]
pub struct JsonSalesLedger {
    path: PathBuf,
}

impl JsonSalesLedger {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn resource(&self) -> String {
        self.path.display().to_string()
    }
}

impl SalesLedger for JsonSalesLedger {
    fn load(&self) -> Result<Vec<Report>, StoreError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::io(self.resource(), e)),
        };

        // A freshly touched file counts as no history.
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }

        serde_json::from_slice(&bytes).map_err(|e| StoreError::format(self.resource(), e.to_string()))
    }

    fn append(&self, report: &Report) -> Result<(), StoreError> {
        let mut reports = self.load()?;
        reports.push(report.clone());
        write_json_atomic(&self.path, &reports)
    }
}

fn write_json_atomic<T>(path: &Path, value: &T) -> Result<(), StoreError>
where
    T: Serialize + ?Sized,
{
    let resource = path.display().to_string();
    let mut data = serde_json::to_vec_pretty(value)
        .map_err(|e| StoreError::format(resource.clone(), e.to_string()))?;
    data.push(b'\n');

    let tmp_path = tmp_path_for(path).map_err(|e| StoreError::io(resource.clone(), e))?;
    let write = || -> io::Result<()> {
        let mut file = File::create(&tmp_path)?;
        file.write_all(&data)?;
        file.sync_all()?;
        fs::rename(&tmp_path, path)
    };

    write().map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        StoreError::io(resource, e)
    })
}

fn tmp_path_for(path: &Path) -> io::Result<PathBuf> {
    let mut name = path
        .file_name()
        .ok_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidInput, "store path has no file name")
        })?
        .to_os_string();
    name.push(".tmp");
    Ok(path.with_file_name(name))
}
