//! Core data models for gastos
//!
//! Expense records, their identifiers and the value types they are built from.

pub mod category;
pub mod date;
pub mod expense;
pub mod ids;
pub mod money;

pub use category::{Category, CategoryList, DEFAULT_CATEGORY, PREDEFINED};
pub use date::ExpenseDate;
pub use expense::{Expense, ExpensePatch};
pub use ids::{ExpenseId, IdScheme};
pub use money::Money;
