//! File I/O utilities with atomic writes
//!
//! Data files are written to a temporary sibling and renamed over the target,
//! so a failed save never leaves a half-written file behind.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::error::{ExpenseError, ExpenseResult};

/// Read a whole file as text, returning `None` if it doesn't exist
pub fn read_optional<P: AsRef<Path>>(path: P) -> ExpenseResult<Option<String>> {
    let path = path.as_ref();

    if !path.exists() {
        return Ok(None);
    }

    fs::read_to_string(path)
        .map(Some)
        .map_err(|e| ExpenseError::Storage(format!("Failed to read {}: {}", path.display(), e)))
}

/// Temporary sibling used while writing `path`
fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Write a file atomically (write to temp, then rename)
///
/// `write` receives a buffered writer over the temporary file.
pub fn write_atomic<P, F>(path: P, write: F) -> ExpenseResult<()>
where
    P: AsRef<Path>,
    F: FnOnce(&mut BufWriter<File>) -> ExpenseResult<()>,
{
    let path = path.as_ref();

    // Ensure parent directory exists
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            ExpenseError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    let temp_path = temp_path_for(path);

    let result = (|| {
        let file = File::create(&temp_path)
            .map_err(|e| ExpenseError::Storage(format!("Failed to create temp file: {}", e)))?;

        let mut writer = BufWriter::new(file);
        write(&mut writer)?;

        writer
            .flush()
            .map_err(|e| ExpenseError::Storage(format!("Failed to flush data: {}", e)))?;

        // Sync to disk before rename
        writer
            .get_ref()
            .sync_all()
            .map_err(|e| ExpenseError::Storage(format!("Failed to sync data: {}", e)))?;

        fs::rename(&temp_path, path)
            .map_err(|e| ExpenseError::Storage(format!("Failed to rename temp file: {}", e)))
    })();

    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    result
}

/// Serialize pretty JSON with four-space indentation
pub fn to_writer_pretty4<W: Write, T: Serialize + ?Sized>(
    writer: W,
    data: &T,
) -> ExpenseResult<()> {
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(writer, formatter);
    data.serialize(&mut ser)
        .map_err(|e| ExpenseError::Storage(format!("Failed to serialize data: {}", e)))
}
