//! Storage layer for gastos
//!
//! Loads and saves the expense store as JSON, CSV or line-delimited JSON,
//! with atomic writes and automatic directory creation. [`Storage`] ties a
//! store to the file it came from.

pub mod csv;
pub mod file_io;
pub mod format;
pub mod json;
pub mod record;
pub mod store;
pub mod txt;

pub use file_io::{read_optional, write_atomic};
pub use format::FileFormat;
pub use record::{ParsedRecords, RawCsvRow, RawExpense};
pub use store::ExpenseStore;

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::error::ExpenseResult;
use crate::models::{ExpenseId, IdScheme};

/// Outcome of loading a file into a fresh store
#[derive(Debug, Clone)]
pub struct LoadReport {
    pub store: ExpenseStore,
    /// Records dropped for missing or invalid required fields
    pub skipped: usize,
    /// False when the file did not exist (the store is then empty)
    pub existed: bool,
}

/// Outcome of appending a file to the current store
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub added: Vec<ExpenseId>,
    pub skipped: usize,
}

/// Parse a file without touching any store; `None` if it doesn't exist
pub fn read_records(path: &Path) -> ExpenseResult<Option<ParsedRecords>> {
    let format = FileFormat::from_path(path)?;
    let text = match read_optional(path)? {
        Some(text) => text,
        None => return Ok(None),
    };

    let parsed = match format {
        FileFormat::Json => json::parse(&text)?,
        FileFormat::Csv => csv::parse(text.as_bytes())?,
        FileFormat::Txt => txt::parse(&text)?,
    };
    Ok(Some(parsed))
}

/// Load a file into a new store
///
/// Keyed records keep their ids; the rest get fresh ones afterwards, so they
/// never collide with a key from the file.
pub fn load(path: &Path, scheme: IdScheme) -> ExpenseResult<LoadReport> {
    let mut store = ExpenseStore::new(scheme);

    let parsed = match read_records(path)? {
        Some(parsed) => parsed,
        None => {
            info!(path = %path.display(), "data file not found, starting empty");
            return Ok(LoadReport {
                store,
                skipped: 0,
                existed: false,
            });
        }
    };

    let mut skipped = parsed.skipped;
    for (id, expense) in parsed.keyed {
        if let Err(e) = store.insert_with_id(id, expense) {
            warn!(error = %e, "skipping record");
            skipped += 1;
        }
    }
    for expense in parsed.fresh {
        store.insert(expense);
    }

    info!(
        path = %path.display(),
        records = store.len(),
        skipped,
        "loaded expenses"
    );
    Ok(LoadReport {
        store,
        skipped,
        existed: true,
    })
}

/// Overwrite `path` with the full store in the given format
pub fn save(store: &ExpenseStore, path: &Path, format: FileFormat) -> ExpenseResult<()> {
    write_atomic(path, |writer| match format {
        FileFormat::Json => json::write(store, writer),
        FileFormat::Csv => csv::write(store, &mut *writer),
        FileFormat::Txt => txt::write(store, writer),
    })?;
    info!(path = %path.display(), %format, records = store.len(), "saved expenses");
    Ok(())
}

/// The expense store together with the file it is bound to
#[derive(Debug)]
pub struct Storage {
    path: PathBuf,
    store: ExpenseStore,
    dirty: bool,
    last_skipped: usize,
    existed: bool,
}

impl Storage {
    /// Load `path` (or start empty when it doesn't exist)
    pub fn open(path: impl Into<PathBuf>, scheme: IdScheme) -> ExpenseResult<Self> {
        let path = path.into();
        let report = load(&path, scheme)?;
        Ok(Self {
            path,
            store: report.store,
            dirty: false,
            last_skipped: report.skipped,
            existed: report.existed,
        })
    }

    /// An unsaved, empty store bound to `path`
    pub fn in_memory(path: impl Into<PathBuf>, scheme: IdScheme) -> Self {
        Self {
            path: path.into(),
            store: ExpenseStore::new(scheme),
            dirty: false,
            last_skipped: 0,
            existed: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Format of the current file
    pub fn format(&self) -> ExpenseResult<FileFormat> {
        FileFormat::from_path(&self.path)
    }

    pub fn store(&self) -> &ExpenseStore {
        &self.store
    }

    /// Mutable access; marks the data as changed
    pub fn store_mut(&mut self) -> &mut ExpenseStore {
        self.dirty = true;
        &mut self.store
    }

    /// Whether there are changes since the last load or save
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Records skipped by the last load
    pub fn last_skipped(&self) -> usize {
        self.last_skipped
    }

    /// Whether the file existed at the last load
    pub fn file_existed(&self) -> bool {
        self.existed
    }

    /// Replace the store with the file contents
    ///
    /// On error the in-memory store is left as it was.
    pub fn reload(&mut self) -> ExpenseResult<LoadReport> {
        let report = load(&self.path, self.store.scheme())?;
        self.store = report.store.clone();
        self.dirty = false;
        self.last_skipped = report.skipped;
        self.existed = report.existed;
        Ok(report)
    }

    /// Write the store to the current file
    pub fn save(&mut self) -> ExpenseResult<()> {
        let format = self.format()?;
        save(&self.store, &self.path, format)?;
        self.dirty = false;
        self.existed = true;
        Ok(())
    }

    /// Write the store to `path`, which becomes the current file
    pub fn save_as(&mut self, path: impl Into<PathBuf>, format: FileFormat) -> ExpenseResult<()> {
        let path = path.into();
        save(&self.store, &path, format)?;
        self.path = path;
        self.dirty = false;
        self.existed = true;
        Ok(())
    }

    /// Write a copy of the store elsewhere without changing the current file
    pub fn export(&self, path: &Path, format: FileFormat) -> ExpenseResult<()> {
        save(&self.store, path, format)
    }

    /// Append every record of `path` with fresh ids
    pub fn import(&mut self, path: &Path) -> ExpenseResult<ImportReport> {
        let parsed = read_records(path)?.ok_or_else(|| {
            crate::error::ExpenseError::Storage(format!("File not found: {}", path.display()))
        })?;
        let skipped = parsed.skipped;
        let records = parsed.into_records();

        let store = self.store_mut();
        let added: Vec<ExpenseId> = records.into_iter().map(|e| store.insert(e)).collect();

        info!(path = %path.display(), added = added.len(), skipped, "imported expenses");
        Ok(ImportReport { added, skipped })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Expense, ExpenseDate, Money};
    use tempfile::TempDir;

    fn expense(category: &str, cents: i64, description: &str) -> Expense {
        Expense::new(
            Category::new(category),
            Money::from_cents(cents),
            ExpenseDate::from_ymd(2024, 4, 15).unwrap(),
            description,
        )
    }

    fn sample_store(scheme: IdScheme) -> ExpenseStore {
        let mut store = ExpenseStore::new(scheme);
        store.insert(expense("Comida", 1250, "Almuerzo"));
        store.insert(expense("Transporte", 300, "Bus, ida y vuelta"));
        store.insert(expense("Mascotas", 4599, ""));
        store
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let report = load(&temp_dir.path().join("gastos.json"), IdScheme::Sequential).unwrap();
        assert!(report.store.is_empty());
        assert!(!report.existed);
        assert_eq!(report.skipped, 0);
    }

    #[test]
    fn test_json_roundtrip_equal_store() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("gastos.json");
        let store = sample_store(IdScheme::Sequential);

        save(&store, &path, FileFormat::Json).unwrap();
        let report = load(&path, IdScheme::Sequential).unwrap();

        assert!(report.existed);
        assert_eq!(report.store, store);
        assert_eq!(report.store.next_id(), ExpenseId::Seq(4));
    }

    #[test]
    fn test_uuid_roundtrip_equal_store() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("gastos.json");
        let store = sample_store(IdScheme::Uuid);

        save(&store, &path, FileFormat::Json).unwrap();
        let report = load(&path, IdScheme::Uuid).unwrap();
        assert_eq!(report.store, store);
    }

    #[test]
    fn test_every_format_preserves_count() {
        let temp_dir = TempDir::new().unwrap();
        let store = sample_store(IdScheme::Sequential);

        for format in FileFormat::ALL {
            let path = temp_dir
                .path()
                .join(format!("gastos.{}", format.extension()));
            save(&store, &path, format).unwrap();
            let report = load(&path, IdScheme::Sequential).unwrap();
            assert_eq!(report.store.len(), store.len(), "format {}", format);
            assert_eq!(report.skipped, 0);

            let loaded: Vec<_> = report.store.iter().map(|(_, e)| e.clone()).collect();
            let original: Vec<_> = store.iter().map(|(_, e)| e.clone()).collect();
            assert_eq!(loaded, original, "format {}", format);
        }
    }

    #[test]
    fn test_next_id_after_loading_sparse_ids() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("gastos.json");
        std::fs::write(
            &path,
            r#"{
                "1": {"categoria": "Comida", "descripcion": "", "fecha": "01/01/2024", "monto": 1},
                "3": {"categoria": "Comida", "descripcion": "", "fecha": "01/01/2024", "monto": 1},
                "7": {"categoria": "Comida", "descripcion": "", "fecha": "01/01/2024", "monto": 1}
            }"#,
        )
        .unwrap();

        let report = load(&path, IdScheme::Sequential).unwrap();
        assert_eq!(report.store.next_id(), ExpenseId::Seq(8));
    }

    #[test]
    fn test_malformed_entry_does_not_drop_the_rest() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("gastos.json");
        std::fs::write(
            &path,
            r#"{
                "1": {"categoria": "Comida", "descripcion": "Pan", "fecha": "01/01/2024", "monto": 2},
                "2": {"categoria": "Hogar", "descripcion": "Luz", "fecha": "02/01/2024", "monto": 30},
                "3": null
            }"#,
        )
        .unwrap();

        let report = load(&path, IdScheme::Sequential).unwrap();
        assert_eq!(report.store.len(), 2);
        assert_eq!(report.skipped, 1);
        assert_eq!(
            report.store.get(&ExpenseId::Seq(2)).unwrap().description,
            "Luz"
        );
        assert_eq!(report.store.next_id(), ExpenseId::Seq(4));
    }

    #[test]
    fn test_largest_key_is_not_reused() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("gastos.json");
        std::fs::write(
            &path,
            r#"{"18446744073709551615": {"fecha": "01/01/2024", "monto": 1, "descripcion": "original"}}"#,
        )
        .unwrap();

        let mut storage = Storage::open(&path, IdScheme::Sequential).unwrap();
        let id = storage.store_mut().insert(expense("Comida", 500, "nuevo"));
        assert_ne!(id, ExpenseId::Seq(u64::MAX));
        assert_eq!(storage.store().len(), 2);
        assert_eq!(
            storage.store().get(&ExpenseId::Seq(u64::MAX)).unwrap().description,
            "original"
        );
    }

    #[test]
    fn test_duplicate_keys_after_parsing_are_skipped() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("gastos.json");
        std::fs::write(
            &path,
            r#"{
                "1": {"fecha": "01/01/2024", "monto": 1},
                "01": {"fecha": "02/01/2024", "monto": 2}
            }"#,
        )
        .unwrap();

        let report = load(&path, IdScheme::Sequential).unwrap();
        assert_eq!(report.store.len(), 1);
        assert_eq!(report.skipped, 1);
    }

    #[test]
    fn test_unsupported_extension() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("gastos.xml");
        assert!(load(&path, IdScheme::Sequential).is_err());
    }

    #[test]
    fn test_reload_failure_keeps_store() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("gastos.json");
        let mut storage = Storage::open(&path, IdScheme::Sequential).unwrap();
        storage.store_mut().insert(expense("Comida", 100, ""));
        storage.save().unwrap();

        std::fs::write(&path, "{ broken").unwrap();
        assert!(storage.reload().is_err());
        assert_eq!(storage.store().len(), 1);
    }

    #[test]
    fn test_save_as_changes_current_file() {
        let temp_dir = TempDir::new().unwrap();
        let mut storage =
            Storage::open(temp_dir.path().join("gastos.json"), IdScheme::Sequential).unwrap();
        storage.store_mut().insert(expense("Comida", 100, ""));
        assert!(storage.is_dirty());

        let csv_path = temp_dir.path().join("export").join("gastos.csv");
        storage.save_as(&csv_path, FileFormat::Csv).unwrap();

        assert_eq!(storage.path(), csv_path.as_path());
        assert!(!storage.is_dirty());
        assert!(csv_path.exists());
    }

    #[test]
    fn test_import_appends_with_fresh_ids() {
        let temp_dir = TempDir::new().unwrap();
        let other = temp_dir.path().join("otros.json");
        save(&sample_store(IdScheme::Sequential), &other, FileFormat::Json).unwrap();

        let mut storage =
            Storage::open(temp_dir.path().join("gastos.json"), IdScheme::Sequential).unwrap();
        storage.store_mut().insert(expense("Salud", 100, ""));

        let report = storage.import(&other).unwrap();
        assert_eq!(
            report.added,
            vec![ExpenseId::Seq(2), ExpenseId::Seq(3), ExpenseId::Seq(4)]
        );
        assert_eq!(storage.store().len(), 4);
    }

    #[test]
    fn test_import_missing_file_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let mut storage = Storage::in_memory(temp_dir.path().join("gastos.json"), IdScheme::Sequential);
        assert!(storage.import(&temp_dir.path().join("nada.csv")).is_err());
        assert!(storage.store().is_empty());
    }
}
