//! `pos-terminal`
//!
//! **Responsibility:** interactive front end over the checkout engine.
//!
//! The terminal is a **thin shell**: it asks for input, calls
//! `TransactionSession`, and prints what happened. It is generic over its
//! input and output streams so the whole menu can be driven from tests.

pub mod app;
pub mod input;
pub mod view;

pub use app::Terminal;
pub use input::Prompter;
