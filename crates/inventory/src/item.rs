use serde::{Deserialize, Serialize};

use pos_core::{DomainError, DomainResult, Entity, ItemId};

/// A sellable catalog entry.
///
/// `price` is a plain currency amount (no minor-unit scaling); `stock` counts
/// units on hand and cannot go negative by construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub price: f64,
    pub stock: u32,
}

impl Item {
    pub fn new(id: ItemId, name: impl Into<String>, price: f64, stock: u32) -> DomainResult<Self> {
        let item = Self {
            id,
            name: name.into(),
            price,
            stock,
        };
        item.validate()?;
        Ok(item)
    }

    /// Check the invariants the type system does not carry.
    pub fn validate(&self) -> DomainResult<()> {
        if !self.price.is_finite() {
            return Err(DomainError::validation(format!(
                "item {}: price must be a finite number",
                self.id
            )));
        }
        if self.price < 0.0 {
            return Err(DomainError::validation(format!(
                "item {}: price cannot be negative",
                self.id
            )));
        }
        Ok(())
    }

    pub fn is_in_stock(&self) -> bool {
        self.stock > 0
    }
}

impl Entity for Item {
    type Id = ItemId;

    fn id(&self) -> Self::Id {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(v: u64) -> ItemId {
        ItemId::new(v).unwrap()
    }

    #[test]
    fn negative_price_is_rejected() {
        let err = Item::new(id(1), "Bread", -1.0, 5).unwrap_err();
        assert!(matches!(err, DomainError::Validation(msg) if msg.contains("negative")));
    }

    #[test]
    fn nan_price_is_rejected() {
        assert!(Item::new(id(1), "Bread", f64::NAN, 5).is_err());
    }

    #[test]
    fn deserializes_catalog_shape() {
        let item: Item =
            serde_json::from_str(r#"{"id":1,"name":"Bread","price":10,"stock":5}"#).unwrap();
        assert_eq!(item.id, id(1));
        assert_eq!(item.name, "Bread");
        assert_eq!(item.price, 10.0);
        assert_eq!(item.stock, 5);
    }

    #[test]
    fn negative_stock_fails_to_deserialize() {
        let res = serde_json::from_str::<Item>(r#"{"id":1,"name":"Bread","price":10,"stock":-1}"#);
        assert!(res.is_err());
    }

    #[test]
    fn zero_id_fails_to_deserialize() {
        let res = serde_json::from_str::<Item>(r#"{"id":0,"name":"Bread","price":10,"stock":1}"#);
        assert!(res.is_err());
    }
}
