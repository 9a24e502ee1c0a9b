//! The authoritative item list for one session.
//!
//! All stock mutation goes through the id → position index built at
//! construction; items are never copied out and written back.

use std::collections::HashMap;

use pos_core::{DomainError, DomainResult, ItemId};

use crate::item::Item;

#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    items: Vec<Item>,
    index: HashMap<ItemId, usize>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate ids and invalid items.
    pub fn new(items: Vec<Item>) -> DomainResult<Self> {
        let mut index = HashMap::with_capacity(items.len());
        for (pos, item) in items.iter().enumerate() {
            item.validate()?;
            if index.insert(item.id, pos).is_some() {
                return Err(DomainError::invariant(format!(
                    "duplicate item id {} in catalog",
                    item.id
                )));
            }
        }
        Ok(Self { items, index })
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.index.get(&id).map(|&pos| &self.items[pos])
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Units on hand across every item.
    pub fn total_stock(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.stock)).sum()
    }

    /// Take `quantity` units of `id` out of stock.
    ///
    /// Returns a snapshot of the item after the decrement. On error the
    /// catalog is unchanged.
    pub fn reserve(&mut self, id: ItemId, quantity: u32) -> DomainResult<Item> {
        let pos = self.position(id)?;
        let item = &mut self.items[pos];

        if !item.is_in_stock() {
            return Err(DomainError::OutOfStock(id));
        }
        if quantity == 0 {
            return Err(DomainError::validation("quantity must be positive"));
        }
        if quantity > item.stock {
            return Err(DomainError::InsufficientStock {
                id,
                requested: quantity,
                available: item.stock,
            });
        }

        item.stock -= quantity;
        Ok(item.clone())
    }

    /// Return `quantity` units of `id` to stock. Returns the new stock level.
    pub fn restock(&mut self, id: ItemId, quantity: u32) -> DomainResult<u32> {
        let pos = self.position(id)?;
        let item = &mut self.items[pos];
        item.stock = item
            .stock
            .checked_add(quantity)
            .ok_or_else(|| DomainError::invariant(format!("stock overflow for item {id}")))?;
        Ok(item.stock)
    }

    pub fn into_items(self) -> Vec<Item> {
        self.items
    }

    fn position(&self, id: ItemId) -> DomainResult<usize> {
        self.index
            .get(&id)
            .copied()
            .ok_or_else(|| DomainError::not_found(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(v: u64) -> ItemId {
        ItemId::new(v).unwrap()
    }

    fn item(v: u64, name: &str, price: f64, stock: u32) -> Item {
        Item::new(id(v), name, price, stock).unwrap()
    }

    fn bread_and_milk() -> Catalog {
        Catalog::new(vec![item(1, "Bread", 10.0, 5), item(2, "Milk", 15.0, 2)]).unwrap()
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = Catalog::new(vec![item(1, "Bread", 10.0, 5), item(1, "Rye", 12.0, 1)])
            .unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation(msg) if msg.contains("duplicate")));
    }

    #[test]
    fn lookup_by_id_follows_index() {
        let catalog = bread_and_milk();
        assert_eq!(catalog.get(id(2)).map(|i| i.name.as_str()), Some("Milk"));
        assert!(catalog.get(id(3)).is_none());
    }

    #[test]
    fn reserve_decrements_in_place() {
        let mut catalog = bread_and_milk();
        let snapshot = catalog.reserve(id(1), 3).unwrap();
        assert_eq!(snapshot.stock, 2);
        assert_eq!(catalog.get(id(1)).unwrap().stock, 2);
        assert_eq!(catalog.items()[0].stock, 2);
    }

    #[test]
    fn reserve_unknown_id_is_not_found() {
        let mut catalog = bread_and_milk();
        assert_eq!(catalog.reserve(id(9), 1), Err(DomainError::NotFound(id(9))));
    }

    #[test]
    fn reserve_empty_item_is_out_of_stock() {
        let mut catalog = Catalog::new(vec![item(3, "Eggs", 2.0, 0)]).unwrap();
        assert_eq!(catalog.reserve(id(3), 1), Err(DomainError::OutOfStock(id(3))));
    }

    #[test]
    fn reserve_more_than_available_leaves_stock_unchanged() {
        let mut catalog = bread_and_milk();
        let before = catalog.clone();
        let err = catalog.reserve(id(2), 5).unwrap_err();
        assert_eq!(
            err,
            DomainError::InsufficientStock {
                id: id(2),
                requested: 5,
                available: 2
            }
        );
        assert_eq!(catalog, before);
    }

    #[test]
    fn reserve_zero_is_validation_error() {
        let mut catalog = bread_and_milk();
        assert!(matches!(
            catalog.reserve(id(1), 0),
            Err(DomainError::Validation(_))
        ));
        assert_eq!(catalog.get(id(1)).unwrap().stock, 5);
    }

    #[test]
    fn reserve_exact_stock_empties_item() {
        let mut catalog = bread_and_milk();
        catalog.reserve(id(2), 2).unwrap();
        assert_eq!(catalog.get(id(2)).unwrap().stock, 0);
        assert_eq!(catalog.reserve(id(2), 1), Err(DomainError::OutOfStock(id(2))));
    }

    #[test]
    fn restock_overflow_is_invariant_violation() {
        let mut catalog = Catalog::new(vec![item(1, "Bread", 1.0, u32::MAX)]).unwrap();
        assert!(matches!(
            catalog.restock(id(1), 1),
            Err(DomainError::InvariantViolation(_))
        ));
        assert_eq!(catalog.get(id(1)).unwrap().stock, u32::MAX);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: reserving then restocking the same quantity is the identity.
            #[test]
            fn reserve_then_restock_conserves_stock(stock in 1u32..1_000, qty in 1u32..1_000) {
                let mut catalog = Catalog::new(vec![item(1, "Bread", 10.0, stock)]).unwrap();
                match catalog.reserve(id(1), qty) {
                    Ok(_) => {
                        prop_assert!(qty <= stock);
                        let restored = catalog.restock(id(1), qty).unwrap();
                        prop_assert_eq!(restored, stock);
                    }
                    Err(DomainError::InsufficientStock { available, .. }) => {
                        prop_assert!(qty > stock);
                        prop_assert_eq!(available, stock);
                        prop_assert_eq!(catalog.get(id(1)).unwrap().stock, stock);
                    }
                    Err(other) => prop_assert!(false, "unexpected error {other:?}"),
                }
            }
        }
    }
}
