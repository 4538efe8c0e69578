//! Terminal User Interface module
//!
//! Full-screen interface built on ratatui: a sidebar of actions, the
//! expense table with live search, chart views and the dialogs for data
//! entry.

pub mod app;
pub mod event;
pub mod handler;
pub mod terminal;

// Views
pub mod views;

// Widgets
pub mod widgets;

// Dialogs
pub mod dialogs;

// Layout
pub mod layout;

pub use app::App;
pub use terminal::run_tui;
