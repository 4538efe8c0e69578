//! Path management for gastos
//!
//! Everything lives next to the data file: the log written by the TUI and
//! the default destination of exported charts.
//!
//! ## Path Resolution Order
//!
//! 1. `--file` flag
//! 2. `GASTOS_FILE` environment variable
//! 3. `gastos.json` in the working directory

use std::path::{Path, PathBuf};

use crate::reports::chart::ChartKind;

/// Default data file name
pub const DEFAULT_DATA_FILE: &str = "gastos.json";

/// Log file used while the full-screen UI owns the terminal
pub const LOG_FILE: &str = "gastos.log";

/// Manages all paths used by gastos
#[derive(Debug, Clone)]
pub struct ExpensePaths {
    data_file: PathBuf,
}

impl ExpensePaths {
    /// Create paths around a data file
    pub fn new(data_file: impl Into<PathBuf>) -> Self {
        Self {
            data_file: data_file.into(),
        }
    }

    /// Get the data file
    pub fn data_file(&self) -> &Path {
        &self.data_file
    }

    /// Directory holding the data file (`.` for a bare file name)
    pub fn base_dir(&self) -> PathBuf {
        match self.data_file.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    /// Get the path to the log file
    pub fn log_file(&self) -> PathBuf {
        self.base_dir().join(LOG_FILE)
    }

    /// Default export path for a chart
    pub fn chart_file(&self, kind: ChartKind) -> PathBuf {
        self.base_dir().join(format!("grafico_{}.svg", kind.file_stem()))
    }
}

impl Default for ExpensePaths {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_FILE)
    }
}
