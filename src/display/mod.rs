//! Display formatting for terminal output
//!
//! Provides utilities for formatting expenses as tables and detail blocks.

pub mod expense;

pub use expense::{format_expense_details, format_expense_row, format_expense_table, truncate};
