//! Configuration module for gastos
//!
//! This module provides:
//! - Path resolution for the data file, log file and chart exports
//! - Runtime settings built from defaults and command-line flags

pub mod paths;
pub mod settings;

pub use paths::ExpensePaths;
pub use settings::Settings;
