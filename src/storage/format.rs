//! Supported data file formats

use std::fmt;
use std::path::Path;

use crate::error::{ExpenseError, ExpenseResult};

/// Format of a data file, chosen by extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum FileFormat {
    /// Object keyed by id (the primary format)
    #[default]
    Json,
    /// `id,fecha,categoria,descripcion,monto` rows
    Csv,
    /// One JSON object per line
    Txt,
}

impl FileFormat {
    pub const ALL: [FileFormat; 3] = [FileFormat::Json, FileFormat::Csv, FileFormat::Txt];

    /// Detect the format from the file extension (case-insensitive)
    pub fn from_path(path: &Path) -> ExpenseResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match ext.as_deref() {
            Some("json") => Ok(Self::Json),
            Some("csv") => Ok(Self::Csv),
            Some("txt") => Ok(Self::Txt),
            _ => Err(ExpenseError::UnsupportedFormat(path.display().to_string())),
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Txt => "txt",
        }
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => write!(f, "JSON"),
            Self::Csv => write!(f, "CSV"),
            Self::Txt => write!(f, "TXT"),
        }
    }
}
