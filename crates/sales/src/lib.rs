//! Sales domain module.
//!
//! This crate contains the cart built during one checkout and the report a
//! finished checkout leaves behind, implemented purely as deterministic domain
//! logic (no IO, no terminal, no storage).

pub mod cart;
pub mod report;

pub use cart::{Cart, CartLine};
pub use report::{REPORT_DATE_FORMAT, Report, grand_total};
