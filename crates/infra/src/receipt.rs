//! Plain-text receipt per committed sale.
//!
//! Receipts are write-only: nothing in the system reads them back.

use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;

use chrono::NaiveDateTime;
use thiserror::Error;

use pos_sales::REPORT_DATE_FORMAT;

use crate::session::Sale;

/// File name pattern, derived from the commit timestamp.
pub const RECEIPT_FILE_FORMAT: &str = "receipt_%Y%m%d_%H%M%S.txt";

#[derive(Debug, Error)]
pub enum ReceiptError {
    #[error("failed to write receipt {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Currency amount as printed on receipts and the terminal, whole units.
pub fn format_amount(amount: f64) -> String {
    format!("Rp {amount:.0}")
}

#[derive(Debug, Clone)]
pub struct ReceiptWriter {
    dir: PathBuf,
}

impl ReceiptWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, occurred_at: NaiveDateTime) -> PathBuf {
        self.dir
            .join(occurred_at.format(RECEIPT_FILE_FORMAT).to_string())
    }

    /// Receipt body for `sale`.
    pub fn render(sale: &Sale) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "===== RECEIPT =====");
        let _ = writeln!(out, "{}", sale.occurred_at.format(REPORT_DATE_FORMAT));
        let _ = writeln!(out, "-------------------");
        for line in &sale.report.items_sold {
            let _ = writeln!(
                out,
                "{} x{} = {}",
                line.item.name,
                line.quantity,
                format_amount(line.subtotal())
            );
        }
        let _ = writeln!(out);
        let _ = writeln!(out, "TOTAL: {}", format_amount(sale.report.total_sales));
        let _ = writeln!(out, "===================");
        out
    }

    /// Write the receipt for `sale` and return its path.
    ///
    /// A sale committed in the same second as an earlier one overwrites that
    /// receipt.
    pub fn write(&self, sale: &Sale) -> Result<PathBuf, ReceiptError> {
        let path = self.path_for(sale.occurred_at);
        fs::write(&path, Self::render(sale)).map_err(|source| ReceiptError::Io {
            path: path.clone(),
            source,
        })?;
        tracing::info!(target: "pos::receipt", path = %path.display(), "receipt written");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pos_core::ItemId;
    use pos_inventory::Item;
    use pos_sales::{Cart, Report};

    use crate::session::WriteStatus;

    fn sale() -> Sale {
        let at = NaiveDate::from_ymd_opt(2024, 12, 31)
            .unwrap()
            .and_hms_opt(23, 59, 58)
            .unwrap();
        let mut cart = Cart::new();
        cart.add_or_merge(
            Item::new(ItemId::new(1).unwrap(), "Bread", 10.0, 5).unwrap(),
            3,
        )
        .unwrap();
        cart.add_or_merge(
            Item::new(ItemId::new(2).unwrap(), "Milk", 15.0, 2).unwrap(),
            1,
        )
        .unwrap();
        Sale {
            report: Report::from_cart(cart, at),
            occurred_at: at,
            catalog_write: WriteStatus::Saved,
            ledger_write: WriteStatus::Saved,
        }
    }

    #[test]
    fn amount_has_no_decimals() {
        assert_eq!(format_amount(45.0), "Rp 45");
        assert_eq!(format_amount(0.0), "Rp 0");
    }

    #[test]
    fn file_name_follows_commit_time() {
        let writer = ReceiptWriter::new("/tmp/receipts");
        assert_eq!(
            writer.path_for(sale().occurred_at),
            PathBuf::from("/tmp/receipts/receipt_20241231_235958.txt")
        );
    }

    #[test]
    fn render_lists_lines_and_total() {
        let text = ReceiptWriter::render(&sale());
        assert!(text.contains("31/12/2024 23:59:58"));
        assert!(text.contains("Bread x3 = Rp 30\n"));
        assert!(text.contains("Milk x1 = Rp 15\n"));
        assert!(text.contains("TOTAL: Rp 45\n"));
    }

    #[test]
    fn write_creates_receipt_file() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ReceiptWriter::new(dir.path());
        let sale = sale();

        let path = writer.write(&sale).unwrap();

        assert_eq!(path, dir.path().join("receipt_20241231_235958.txt"));
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            ReceiptWriter::render(&sale)
        );
    }

    #[test]
    fn write_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ReceiptWriter::new(dir.path().join("missing"));
        assert!(matches!(writer.write(&sale()), Err(ReceiptError::Io { .. })));
    }
}
