//! Checkout session: the transaction engine.
//!
//! A `TransactionSession` owns the catalog loaded at `begin` and the cart
//! built by the operator. It reconciles the two on every operation:
//!
//! ```text
//! begin ──► Browsing ──select_item / remove_line──► Browsing
//!              │
//!           finalize
//!              ▼
//!          Finalizing ──empty cart──► Abandoned
//!              │
//!              └──────────────────► Committed
//! ```
//!
//! `Browsing` is the session value itself; `finalize` consumes it, so no
//! operation can run after the cart has been turned into a report.
//!
//! ## Stock accounting
//!
//! Stock is taken out of the catalog when an item is selected and put back
//! when its line is removed, and the catalog is saved after each of those
//! steps. Abandoning a session does not give back stock that is still in the
//! cart.
//!
//! ## Persistence failures
//!
//! Saves are best-effort. A failed save is logged and returned inside the
//! outcome as [`WriteStatus::Failed`]; the in-memory catalog and cart keep
//! the change and the session carries on.

use chrono::NaiveDateTime;
use thiserror::Error;

use pos_core::{DomainError, DomainResult, ItemId};
use pos_inventory::Catalog;
use pos_sales::{Cart, CartLine, Report};

use crate::store::{CatalogStore, SalesLedger, StoreError};

/// Failure to start a session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The catalog could not be loaded.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The loaded items do not form a valid catalog.
    #[error("catalog rejected: {0}")]
    Domain(#[from] DomainError),
}

/// Lifecycle position of a checkout.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SessionState {
    Browsing,
    Finalizing,
    Committed,
    Abandoned,
}

/// Outcome of a best-effort write.
#[derive(Debug)]
pub enum WriteStatus {
    Saved,
    Failed(StoreError),
}

impl WriteStatus {
    fn record(result: Result<(), StoreError>, what: &'static str) -> Self {
        match result {
            Ok(()) => Self::Saved,
            Err(err) => {
                tracing::error!(target: "pos::session", error = %err, "failed to persist {what}");
                Self::Failed(err)
            }
        }
    }

    pub fn is_saved(&self) -> bool {
        matches!(self, Self::Saved)
    }

    pub fn error(&self) -> Option<&StoreError> {
        match self {
            Self::Saved => None,
            Self::Failed(err) => Some(err),
        }
    }
}

/// Result of a successful `select_item`.
#[derive(Debug)]
pub struct Selection {
    /// 0-based position of the line that received the units.
    pub line_index: usize,
    /// Quantity on that line after the merge.
    pub line_quantity: u32,
    /// Catalog stock left for the item.
    pub remaining_stock: u32,
    pub catalog_write: WriteStatus,
}

/// Result of a successful `remove_line`.
#[derive(Debug)]
pub struct Removal {
    pub line: CartLine,
    /// Catalog stock for the item after restitution.
    pub restored_stock: u32,
    pub catalog_write: WriteStatus,
}

/// A committed sale.
#[derive(Debug)]
pub struct Sale {
    pub report: Report,
    pub occurred_at: NaiveDateTime,
    pub catalog_write: WriteStatus,
    pub ledger_write: WriteStatus,
}

/// How a session ended.
#[derive(Debug)]
pub enum Completion {
    Committed(Sale),
    Abandoned,
}

impl Completion {
    pub fn state(&self) -> SessionState {
        match self {
            Self::Committed(_) => SessionState::Committed,
            Self::Abandoned => SessionState::Abandoned,
        }
    }
}

/// One checkout, from catalog load to report.
#[derive(Debug)]
pub struct TransactionSession<'s, C: ?Sized, L: ?Sized> {
    catalog_store: &'s C,
    ledger: &'s L,
    catalog: Catalog,
    cart: Cart,
}

impl<'s, C, L> TransactionSession<'s, C, L>
where
    C: CatalogStore + ?Sized,
    L: SalesLedger + ?Sized,
{
    /// Load the catalog and open an empty cart.
    ///
    /// A session cannot run without its catalog, so load failures are
    /// returned rather than tolerated.
    pub fn begin(catalog_store: &'s C, ledger: &'s L) -> Result<Self, SessionError> {
        let catalog = Catalog::new(catalog_store.load()?)?;
        tracing::debug!(
            target: "pos::session",
            items = catalog.len(),
            units = catalog.total_stock(),
            "session started"
        );
        Ok(Self {
            catalog_store,
            ledger,
            catalog,
            cart: Cart::new(),
        })
    }

    pub fn state(&self) -> SessionState {
        SessionState::Browsing
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Move `quantity` units of `id` from the catalog into the cart.
    ///
    /// Fails with `NotFound`, `OutOfStock`, `InsufficientStock` or
    /// `Validation` (zero quantity); on failure neither catalog nor cart
    /// changes.
    pub fn select_item(&mut self, id: ItemId, quantity: u32) -> DomainResult<Selection> {
        let snapshot = self.catalog.reserve(id, quantity).inspect_err(|err| {
            tracing::warn!(target: "pos::session", item = %id, quantity, error = %err, "selection rejected");
        })?;
        let remaining_stock = snapshot.stock;

        let line_index = match self.cart.add_or_merge(snapshot, quantity) {
            Ok(idx) => idx,
            Err(err) => {
                self.catalog.restock(id, quantity)?;
                return Err(err);
            }
        };
        let line_quantity = self.cart.lines()[line_index].quantity;

        let catalog_write = self.persist_catalog();
        tracing::debug!(
            target: "pos::session",
            item = %id,
            quantity,
            line_quantity,
            remaining_stock,
            "item selected"
        );

        Ok(Selection {
            line_index,
            line_quantity,
            remaining_stock,
            catalog_write,
        })
    }

    /// Remove the cart line at the 0-based `index` and return its units to
    /// the catalog.
    ///
    /// Fails with `InvalidLineIndex` when `index` is outside the cart, leaving
    /// both cart and catalog unchanged.
    pub fn remove_line(&mut self, index: usize) -> DomainResult<Removal> {
        let (id, quantity) = {
            let line = self.cart.line(index).inspect_err(|err| {
                tracing::warn!(target: "pos::session", index, error = %err, "removal rejected");
            })?;
            (line.item_id(), line.quantity)
        };

        let restored_stock = self.catalog.restock(id, quantity)?;
        let line = self.cart.remove_at(index)?;
        let catalog_write = self.persist_catalog();
        tracing::debug!(
            target: "pos::session",
            item = %id,
            quantity,
            restored_stock,
            "line removed"
        );

        Ok(Removal {
            line,
            restored_stock,
            catalog_write,
        })
    }

    /// Close the session.
    ///
    /// An empty cart abandons the session without touching either store.
    /// Otherwise the catalog is saved, the cart becomes a `Report` stamped
    /// with `occurred_at`, and the report is appended to the ledger.
    pub fn finalize(self, occurred_at: NaiveDateTime) -> Completion {
        tracing::debug!(target: "pos::session", state = ?SessionState::Finalizing, lines = self.cart.len());

        if self.cart.is_empty() {
            tracing::info!(target: "pos::session", "empty cart; transaction abandoned");
            return Completion::Abandoned;
        }

        let catalog_write = self.persist_catalog();
        let report = Report::from_cart(self.cart, occurred_at);
        let ledger_write = WriteStatus::record(self.ledger.append(&report), "sales report");

        tracing::info!(
            target: "pos::session",
            date = %report.date,
            lines = report.items_sold.len(),
            units = report.units_sold(),
            total = report.total_sales,
            "transaction committed"
        );

        Completion::Committed(Sale {
            report,
            occurred_at,
            catalog_write,
            ledger_write,
        })
    }

    fn persist_catalog(&self) -> WriteStatus {
        WriteStatus::record(self.catalog_store.save(self.catalog.items()), "catalog")
    }
}
