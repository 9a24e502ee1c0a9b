//! Record of one finished sale.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use pos_core::ValueObject;

use crate::cart::{Cart, CartLine};

/// Format of [`Report::date`], day first.
pub const REPORT_DATE_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// One committed transaction as it is stored in the sales ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    #[serde(alias = "Date")]
    pub date: String,
    #[serde(alias = "ItemsSold")]
    pub items_sold: Vec<CartLine>,
    #[serde(alias = "TotalSales")]
    pub total_sales: f64,
}

impl Report {
    /// Consume a cart into a report stamped with `occurred_at`.
    ///
    /// `total_sales` is `cart.total()`, computed before the lines move.
    pub fn from_cart(cart: Cart, occurred_at: NaiveDateTime) -> Self {
        let total_sales = cart.total();
        Self {
            date: occurred_at.format(REPORT_DATE_FORMAT).to_string(),
            items_sold: cart.into_lines(),
            total_sales,
        }
    }

    pub fn units_sold(&self) -> u64 {
        self.items_sold.iter().map(|l| u64::from(l.quantity)).sum()
    }
}

impl ValueObject for Report {}

/// Sum of every report's total, oldest first.
pub fn grand_total(reports: &[Report]) -> f64 {
    reports.iter().map(|r| r.total_sales).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pos_core::ItemId;
    use pos_inventory::Item;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 7)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    fn cart_of(lines: &[(u64, &str, f64, u32)]) -> Cart {
        let mut cart = Cart::new();
        for (id, name, price, qty) in lines {
            let item = Item::new(ItemId::new(*id).unwrap(), *name, *price, 10).unwrap();
            cart.add_or_merge(item, *qty).unwrap();
        }
        cart
    }

    #[test]
    fn report_total_equals_cart_total() {
        let cart = cart_of(&[(1, "Bread", 10.0, 3), (2, "Milk", 15.5, 2)]);
        let expected = cart.total();
        let report = Report::from_cart(cart, at(9, 5, 1));

        assert_eq!(report.total_sales, expected);
        assert_eq!(
            report.total_sales,
            report.items_sold.iter().map(CartLine::subtotal).sum::<f64>()
        );
        assert_eq!(report.units_sold(), 5);
    }

    #[test]
    fn date_is_day_first() {
        let report = Report::from_cart(cart_of(&[(1, "Bread", 10.0, 1)]), at(9, 5, 1));
        assert_eq!(report.date, "07/03/2024 09:05:01");
    }

    #[test]
    fn serializes_camel_case_fields() {
        let report = Report::from_cart(cart_of(&[(1, "Bread", 10.0, 1)]), at(9, 5, 1));
        let json = serde_json::to_value(&report).unwrap();
        assert!(json.get("itemsSold").is_some());
        assert_eq!(json["totalSales"], 10.0);
        assert_eq!(json["itemsSold"][0]["quantity"], 1);
        assert_eq!(json["itemsSold"][0]["item"]["name"], "Bread");
    }

    #[test]
    fn reads_legacy_capitalised_fields() {
        let raw = r#"{
            "Date": "01/02/2024 10:00:00",
            "ItemsSold": [{"Item": {"id": 2, "name": "Milk", "price": 15, "stock": 0}, "Quantity": 2}],
            "TotalSales": 30
        }"#;
        let report: Report = serde_json::from_str(raw).unwrap();
        assert_eq!(report.date, "01/02/2024 10:00:00");
        assert_eq!(report.items_sold.len(), 1);
        assert_eq!(report.total_sales, 30.0);
    }

    #[test]
    fn grand_total_sums_reports() {
        let a = Report::from_cart(cart_of(&[(1, "Bread", 10.0, 1)]), at(9, 0, 0));
        let b = Report::from_cart(cart_of(&[(2, "Milk", 15.0, 2)]), at(10, 0, 0));
        assert_eq!(grand_total(&[a, b]), 40.0);
        assert_eq!(grand_total(&[]), 0.0);
    }
}
