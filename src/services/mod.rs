//! Service layer for gastos
//!
//! The service layer provides validated operations on top of the store:
//! text input coercion, CRUD, search and fake-data generation.

pub mod expense;
pub mod generator;

pub use expense::{
    parse_amount, parse_date, parse_id, CreateExpenseInput, ExpenseService, UpdateExpenseInput,
};
pub use generator::generate;
