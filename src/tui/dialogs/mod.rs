//! Dialog modules for the TUI
//!
//! Each action of the main screen opens exactly one of these modals.

pub mod chart_select;
pub mod confirm;
pub mod expense;
pub mod help;
pub mod prompt;
pub mod save;
