//! JSON codec
//!
//! The primary file is an object keyed by id:
//!
//! ```json
//! {
//!     "1": {
//!         "categoria": "Comida",
//!         "descripcion": "Almuerzo",
//!         "fecha": "05/03/2024",
//!         "monto": 12.5
//!     }
//! }
//! ```
//!
//! A bare array of records, or a single record object, is also accepted;
//! those records get fresh ids.

use std::collections::BTreeMap;
use std::io::Write;

use serde_json::{Map, Value};

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Expense, ExpenseId};
use crate::storage::file_io::to_writer_pretty4;
use crate::storage::record::{ParsedRecords, RawExpense, RejectReason};
use crate::storage::store::ExpenseStore;

/// Parse a JSON document
pub fn parse(text: &str) -> ExpenseResult<ParsedRecords> {
    let document: Value = serde_json::from_str(text)?;
    let mut parsed = ParsedRecords::default();

    match document {
        Value::Object(map) if !is_single_record(&map) => {
            let mut entries: Vec<(ExpenseId, Value)> = Vec::with_capacity(map.len());
            for (key, value) in map {
                match ExpenseId::parse(&key) {
                    Some(id) => entries.push((id, value)),
                    None => parsed.skip(
                        format_args!("key '{}'", key),
                        &RejectReason::Malformed("empty id".into()),
                    ),
                }
            }
            entries.sort_by(|a, b| a.0.cmp(&b.0));

            for (id, value) in entries {
                match RawExpense::from_value(value).and_then(RawExpense::into_expense) {
                    Ok(expense) => parsed.keyed.push((id, expense)),
                    Err(reason) => parsed.skip(format_args!("id {}", id), &reason),
                }
            }
        }
        Value::Object(map) => {
            let record = Value::Object(map);
            match RawExpense::from_value(record).and_then(RawExpense::into_expense) {
                Ok(expense) => parsed.fresh.push(expense),
                Err(reason) => parsed.skip("single record", &reason),
            }
        }
        Value::Array(items) => {
            for (index, item) in items.into_iter().enumerate() {
                match RawExpense::from_value(item).and_then(RawExpense::into_expense) {
                    Ok(expense) => parsed.fresh.push(expense),
                    Err(reason) => parsed.skip(format_args!("element {}", index), &reason),
                }
            }
        }
        other => {
            return Err(ExpenseError::Storage(format!(
                "Expected an object or an array of expenses, found {}",
                kind_of(&other)
            )))
        }
    }

    Ok(parsed)
}

/// Field names a record may carry, in either spelling
const RECORD_FIELDS: [&str; 8] = [
    "fecha",
    "date",
    "monto",
    "amount",
    "categoria",
    "category",
    "descripcion",
    "description",
];

/// A bare record names at least one record field and nests no objects.
/// Anything else, the empty object included, is a keyed mapping whose
/// malformed entries are skipped one by one.
fn is_single_record(map: &Map<String, Value>) -> bool {
    map.keys().any(|key| RECORD_FIELDS.contains(&key.as_str()))
        && !map.values().any(Value::is_object)
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Write the whole store as a keyed object, in id order
pub fn write<W: Write>(store: &ExpenseStore, writer: &mut W) -> ExpenseResult<()> {
    let mapping: BTreeMap<&ExpenseId, &Expense> = store.iter().collect();
    to_writer_pretty4(&mut *writer, &mapping)?;
    writer.write_all(b"\n")?;
    Ok(())
}
