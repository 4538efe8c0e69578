//! CLI command handlers
//!
//! This module contains the one-shot commands and the numbered console menu,
//! bridging clap argument parsing and terminal input with the service layer.

pub mod expense;
pub mod menu;
pub mod prompt;
pub mod report;
pub mod transfer;

pub use expense::{handle_expense_command, ExpenseCommands};
pub use menu::{run_console, Menu, MenuChoice};
pub use prompt::Prompter;
pub use report::{handle_report_command, ReportCommands};
pub use transfer::{handle_transfer_command, TransferCommands};
