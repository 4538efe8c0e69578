//! gastos - Terminal-based personal expense tracker
//!
//! This library provides the core functionality for the gastos application:
//! an in-memory expense store persisted to JSON, CSV or line-delimited JSON,
//! with a numbered console menu, one-shot subcommands and a full-screen TUI.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Path resolution and runtime settings
//! - `error`: Custom error types
//! - `models`: Core data models (expenses, money, dates, categories, ids)
//! - `storage`: In-memory store and file formats
//! - `services`: Validation of raw input and fake data generation
//! - `reports`: Category summary and charts
//! - `display`: Terminal formatting
//! - `cli`: One-shot commands and the console menu
//! - `tui`: Full-screen interface
//!
//! # Example
//!
//! ```rust,ignore
//! use gastos::models::IdScheme;
//! use gastos::storage::Storage;
//!
//! let mut storage = Storage::open("gastos.json", IdScheme::Sequential)?;
//! println!("{} expenses", storage.store().len());
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod logging;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;
pub mod tui;

pub use error::{ExpenseError, ExpenseResult};
