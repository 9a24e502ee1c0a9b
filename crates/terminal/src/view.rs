//! Screen rendering.

use std::io::{self, Write};

use pos_core::DomainError;
use pos_infra::receipt::format_amount;
use pos_inventory::Item;
use pos_sales::{Cart, Report, grand_total};

pub fn main_menu<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "===== MENU =====")?;
    writeln!(out, "[a] Cashier")?;
    writeln!(out, "[b] Purchase history")?;
    writeln!(out, "[q] Quit")
}

pub fn catalog<W: Write>(out: &mut W, items: &[Item]) -> io::Result<()> {
    writeln!(out, "===== ITEMS =====")?;
    for item in items {
        writeln!(
            out,
            "{}. {} - {} (Stock: {})",
            item.id,
            item.name,
            format_amount(item.price),
            item.stock
        )?;
    }
    writeln!(out, "=================")
}

/// Cart with 1-based line numbers, the numbering the operator types back.
pub fn cart<W: Write>(out: &mut W, cart: &Cart) -> io::Result<()> {
    if cart.is_empty() {
        return writeln!(out, "Cart is empty.");
    }
    writeln!(out, "--- Current cart ---")?;
    for (i, line) in cart.lines().iter().enumerate() {
        writeln!(
            out,
            "[{}] {} x{} = {}",
            i + 1,
            line.item.name,
            line.quantity,
            format_amount(line.subtotal())
        )?;
    }
    writeln!(out, "--------------------")
}

pub fn summary<W: Write>(out: &mut W, report: &Report) -> io::Result<()> {
    writeln!(out, "===== SUMMARY =====")?;
    for line in &report.items_sold {
        writeln!(
            out,
            "{} x{} = {}",
            line.item.name,
            line.quantity,
            format_amount(line.subtotal())
        )?;
    }
    writeln!(out)?;
    writeln!(out, "TOTAL: {}", format_amount(report.total_sales))
}

pub fn history<W: Write>(out: &mut W, reports: &[Report]) -> io::Result<()> {
    if reports.is_empty() {
        return writeln!(out, "No purchase history yet.");
    }

    writeln!(out, "Total sales: {}", format_amount(grand_total(reports)))?;
    writeln!(out, "--------------------------------")?;
    for report in reports {
        for line in &report.items_sold {
            writeln!(
                out,
                "{} ({}) x{} - [{}]",
                report.date,
                line.item.name,
                line.quantity,
                format_amount(line.subtotal())
            )?;
        }
        writeln!(out)?;
    }
    writeln!(out, "--------------------------------")
}

/// Operator-facing wording for a rejected cart operation.
pub fn describe(err: &DomainError) -> String {
    match err {
        DomainError::NotFound(_) => "Item ID not found!".to_string(),
        DomainError::OutOfStock(_) => "Out of stock!".to_string(),
        DomainError::InsufficientStock { available, .. } => {
            format!("Not enough stock! Only {available} left.")
        }
        DomainError::InvalidLineIndex { .. } => "Invalid cart line number!".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pos_core::ItemId;

    fn render(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn bread() -> Item {
        Item::new(ItemId::new(1).unwrap(), "Bread", 10.0, 5).unwrap()
    }

    #[test]
    fn cart_numbers_lines_from_one() {
        let mut c = Cart::new();
        c.add_or_merge(bread(), 2).unwrap();
        let text = render(|out| cart(out, &c));
        assert!(text.contains("[1] Bread x2 = Rp 20"));
    }

    #[test]
    fn empty_history_has_notice() {
        assert_eq!(
            render(|out| history(out, &[])),
            "No purchase history yet.\n"
        );
    }

    #[test]
    fn catalog_lists_stock() {
        let text = render(|out| catalog(out, &[bread()]));
        assert!(text.contains("1. Bread - Rp 10 (Stock: 5)"));
    }

    #[test]
    fn insufficient_stock_names_available_units() {
        let err = DomainError::InsufficientStock {
            id: ItemId::new(2).unwrap(),
            requested: 5,
            available: 2,
        };
        assert_eq!(describe(&err), "Not enough stock! Only 2 left.");
    }
}
