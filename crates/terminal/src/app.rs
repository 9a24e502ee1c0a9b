//! Menu loop and transaction flow.

use std::io::{BufRead, Write};

use anyhow::Context;
use chrono::{Local, NaiveDateTime};

use pos_core::ItemId;
use pos_infra::{
    Completion, JsonCatalogStore, JsonSalesLedger, PosConfig, ReceiptWriter, SalesLedger,
    TransactionSession, WriteStatus,
};

use crate::input::Prompter;
use crate::view;

type Session<'s> = TransactionSession<'s, JsonCatalogStore, JsonSalesLedger>;

const ITEM_PROMPT: &str = "Choose item ID (0 to finish, -1 to remove an item): ";

fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// The interactive point-of-sale terminal.
pub struct Terminal<R, W> {
    input: Prompter<R>,
    out: W,
    catalog_store: JsonCatalogStore,
    ledger: JsonSalesLedger,
    receipts: ReceiptWriter,
    clock: fn() -> NaiveDateTime,
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    pub fn new(config: &PosConfig, input: R, out: W) -> Self {
        Self {
            input: Prompter::new(input),
            out,
            catalog_store: JsonCatalogStore::new(&config.catalog_path),
            ledger: JsonSalesLedger::new(&config.ledger_path),
            receipts: ReceiptWriter::new(&config.receipt_dir),
            clock: local_now,
        }
    }

    /// Replace the wall clock used to stamp sales.
    pub fn with_clock(mut self, clock: fn() -> NaiveDateTime) -> Self {
        self.clock = clock;
        self
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Run the main menu until the operator quits or input ends.
    ///
    /// Returns an error when a transaction cannot start because the catalog
    /// failed to load, or when reading the operator's input or writing to
    /// the output fails.
    pub fn run(&mut self) -> anyhow::Result<()> {
        loop {
            view::main_menu(&mut self.out)?;
            let choice = self.input.ask(&mut self.out, "Choose menu: ")?;

            match choice.as_deref() {
                Some("a") => self.run_transaction()?,
                Some("b") => self.show_history()?,
                Some("q") | None => {
                    writeln!(self.out, "Thank you!")?;
                    return Ok(());
                }
                Some(other) => {
                    tracing::debug!(choice = other, "invalid menu choice");
                    writeln!(self.out, "Invalid menu choice!")?;
                }
            }
        }
    }

    fn show_history(&mut self) -> anyhow::Result<()> {
        let reports = self.ledger.load().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "failed to load sales history");
            Vec::new()
        });
        view::history(&mut self.out, &reports)?;
        Ok(())
    }

    fn run_transaction(&mut self) -> anyhow::Result<()> {
        let mut session = TransactionSession::begin(&self.catalog_store, &self.ledger)
            .with_context(|| {
                format!(
                    "failed to load catalog from {}",
                    self.catalog_store.path().display()
                )
            })?;

        loop {
            view::catalog(&mut self.out, session.catalog().items())?;

            // End of input finishes the transaction, like an explicit 0.
            let choice = self.input.ask_number(&mut self.out, ITEM_PROMPT)?.unwrap_or(0);
            match choice {
                0 => break,
                -1 => remove_flow(&mut self.input, &mut self.out, &mut session)?,
                id if id > 0 => select_flow(&mut self.input, &mut self.out, &mut session, id)?,
                _ => writeln!(self.out, "Invalid item ID!")?,
            }
        }

        match session.finalize((self.clock)()) {
            Completion::Abandoned => {
                writeln!(self.out, "Cart is empty. Transaction cancelled.")?;
            }
            Completion::Committed(sale) => {
                view::summary(&mut self.out, &sale.report)?;
                warn_write(&mut self.out, "catalog", &sale.catalog_write)?;
                warn_write(&mut self.out, "sales report", &sale.ledger_write)?;

                match self.receipts.write(&sale) {
                    Ok(path) => writeln!(self.out, "Receipt saved as: {}", path.display())?,
                    Err(err) => {
                        tracing::warn!(error = %err, "receipt not written");
                        writeln!(self.out, "Failed to save receipt: {err}")?;
                    }
                }
                writeln!(self.out, "Transaction complete. Thank you!")?;
            }
        }
        Ok(())
    }
}

fn select_flow<R: BufRead, W: Write>(
    input: &mut Prompter<R>,
    out: &mut W,
    session: &mut Session<'_>,
    raw_id: i64,
) -> anyhow::Result<()> {
    let Some(id) = u64::try_from(raw_id).ok().and_then(|v| ItemId::new(v).ok()) else {
        writeln!(out, "Invalid item ID!")?;
        return Ok(());
    };

    // Check before asking for a quantity, so the operator is not asked in vain.
    match session.catalog().get(id) {
        None => {
            writeln!(out, "Item ID not found!")?;
            return Ok(());
        }
        Some(item) if !item.is_in_stock() => {
            writeln!(out, "Out of stock!")?;
            return Ok(());
        }
        Some(_) => {}
    }

    let Some(raw_qty) = input.ask_number(out, "Quantity: ")? else {
        return Ok(());
    };
    if raw_qty <= 0 {
        writeln!(out, "Quantity must be at least 1.")?;
        return Ok(());
    }
    let Ok(quantity) = u32::try_from(raw_qty) else {
        writeln!(out, "Quantity is too large.")?;
        return Ok(());
    };

    match session.select_item(id, quantity) {
        Ok(selection) => {
            writeln!(out, "Item added to cart!")?;
            warn_write(out, "catalog", &selection.catalog_write)?;
            view::cart(out, session.cart())?;
            writeln!(out)?;
        }
        Err(err) => writeln!(out, "{}", view::describe(&err))?,
    }
    Ok(())
}

fn remove_flow<R: BufRead, W: Write>(
    input: &mut Prompter<R>,
    out: &mut W,
    session: &mut Session<'_>,
) -> anyhow::Result<()> {
    if session.cart().is_empty() {
        writeln!(out, "Cart is empty, nothing to remove.")?;
        return Ok(());
    }
    view::cart(out, session.cart())?;

    let Some(number) = input.ask_number(out, "Enter the cart line number to remove (1, 2, ...): ")?
    else {
        return Ok(());
    };
    // Operators count from 1; the cart counts from 0.
    let Some(index) = number
        .checked_sub(1)
        .and_then(|i| usize::try_from(i).ok())
    else {
        writeln!(out, "Invalid cart line number!")?;
        return Ok(());
    };

    match session.remove_line(index) {
        Ok(removal) => {
            writeln!(
                out,
                "Restored {} of {} to stock.",
                removal.line.quantity, removal.line.item.name
            )?;
            writeln!(out, "Item removed from cart.")?;
            warn_write(out, "catalog", &removal.catalog_write)?;
        }
        Err(err) => writeln!(out, "{}", view::describe(&err))?,
    }
    Ok(())
}

fn warn_write<W: Write>(out: &mut W, what: &str, status: &WriteStatus) -> std::io::Result<()> {
    match status.error() {
        Some(err) => writeln!(out, "Warning: {what} was not saved: {err}"),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;

    fn config_in(dir: &Path) -> PosConfig {
        PosConfig {
            catalog_path: dir.join("items.json"),
            ledger_path: dir.join("report.json"),
            receipt_dir: dir.to_path_buf(),
            ..PosConfig::default()
        }
    }

    fn run(dir: &Path, script: &str) -> (anyhow::Result<()>, String) {
        let mut terminal = Terminal::new(&config_in(dir), script.as_bytes(), Vec::new());
        let result = terminal.run();
        let out = String::from_utf8(terminal.into_output()).unwrap();
        (result, out)
    }

    #[test]
    fn quit_and_end_of_input_both_exit() {
        let dir = tempfile::tempdir().unwrap();
        let (res, out) = run(dir.path(), "q\n");
        assert!(res.is_ok());
        assert!(out.ends_with("Thank you!\n"));

        let (res, _) = run(dir.path(), "");
        assert!(res.is_ok());
    }

    #[test]
    fn invalid_menu_choice_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let (_, out) = run(dir.path(), "x q\n");
        assert!(out.contains("Invalid menu choice!"));
    }

    #[test]
    fn missing_catalog_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let (res, _) = run(dir.path(), "a\n");
        let err = res.unwrap_err();
        assert!(format!("{err:#}").contains("failed to load catalog"));
    }

    #[test]
    fn zero_quantity_is_refused_before_touching_stock() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = r#"[{"id":1,"name":"Bread","price":10,"stock":5}]"#;
        fs::write(dir.path().join("items.json"), catalog).unwrap();

        let (_, out) = run(dir.path(), "a 1 0 0 q\n");

        assert!(out.contains("Quantity must be at least 1."));
        assert!(out.contains("Cart is empty. Transaction cancelled."));
        assert_eq!(fs::read_to_string(dir.path().join("items.json")).unwrap(), catalog);
    }

    #[test]
    fn oversized_quantity_is_not_reported_as_too_small() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = r#"[{"id":1,"name":"Bread","price":10,"stock":5}]"#;
        fs::write(dir.path().join("items.json"), catalog).unwrap();

        let (_, out) = run(dir.path(), "a 1 5000000000 0 q\n");

        assert!(out.contains("Quantity is too large."));
        assert!(!out.contains("Quantity must be at least 1."));
        assert_eq!(fs::read_to_string(dir.path().join("items.json")).unwrap(), catalog);
    }
}
