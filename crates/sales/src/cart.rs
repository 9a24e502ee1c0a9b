use serde::{Deserialize, Serialize};

use pos_core::{DomainError, DomainResult, ItemId, ValueObject};
use pos_inventory::Item;

/// Cart line: an item snapshot and how many units of it were taken.
///
/// The snapshot is a copy made when the line was created; catalog changes
/// afterwards never reach it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    #[serde(alias = "Item")]
    pub item: Item,
    #[serde(alias = "Quantity")]
    pub quantity: u32,
}

impl CartLine {
    pub fn item_id(&self) -> ItemId {
        self.item.id
    }

    pub fn subtotal(&self) -> f64 {
        self.item.price * f64::from(self.quantity)
    }
}

impl ValueObject for CartLine {}

/// Insertion-ordered lines, at most one per item id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `quantity` units of `item`, merging into an existing line for the
    /// same id. Returns the 0-based index of the affected line.
    ///
    /// Stock is not checked here.
    pub fn add_or_merge(&mut self, item: Item, quantity: u32) -> DomainResult<usize> {
        if quantity == 0 {
            return Err(DomainError::validation("quantity must be positive"));
        }

        if let Some(pos) = self.lines.iter().position(|l| l.item.id == item.id) {
            let line = &mut self.lines[pos];
            line.quantity = line.quantity.checked_add(quantity).ok_or_else(|| {
                DomainError::invariant(format!("quantity overflow for item {}", item.id))
            })?;
            return Ok(pos);
        }

        self.lines.push(CartLine { item, quantity });
        Ok(self.lines.len() - 1)
    }

    /// Remove the line at the 0-based `index` and hand it back.
    pub fn remove_at(&mut self, index: usize) -> DomainResult<CartLine> {
        self.check_index(index)?;
        Ok(self.lines.remove(index))
    }

    pub fn line(&self, index: usize) -> DomainResult<&CartLine> {
        self.check_index(index)?;
        Ok(&self.lines[index])
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn total(&self) -> f64 {
        self.lines.iter().map(CartLine::subtotal).sum()
    }

    pub fn into_lines(self) -> Vec<CartLine> {
        self.lines
    }

    fn check_index(&self, index: usize) -> DomainResult<()> {
        if index >= self.lines.len() {
            return Err(DomainError::InvalidLineIndex {
                index,
                len: self.lines.len(),
            });
        }
        Ok(())
    }
}
