//! Line-delimited JSON codec
//!
//! One compact JSON object per line, id first. Blank lines are ignored and
//! rows get fresh ids when loaded.

use std::io::Write;

use serde::Serialize;
use serde_json::Value;

use crate::error::ExpenseResult;
use crate::models::{Expense, ExpenseId};
use crate::storage::record::{ParsedRecords, RawExpense, RejectReason};
use crate::storage::store::ExpenseStore;

#[derive(Serialize)]
struct Line<'a> {
    id: &'a ExpenseId,
    #[serde(flatten)]
    expense: &'a Expense,
}

/// Parse one record per non-blank line
pub fn parse(text: &str) -> ExpenseResult<ParsedRecords> {
    let mut parsed = ParsedRecords::default();

    for (index, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let position = format!("line {}", index + 1);
        let record = serde_json::from_str::<Value>(line)
            .map_err(|e| RejectReason::Malformed(e.to_string()))
            .and_then(RawExpense::from_value)
            .and_then(RawExpense::into_expense);
        match record {
            Ok(expense) => parsed.fresh.push(expense),
            Err(reason) => parsed.skip(position, &reason),
        }
    }

    Ok(parsed)
}

/// Write the whole store in insertion order
pub fn write<W: Write>(store: &ExpenseStore, writer: &mut W) -> ExpenseResult<()> {
    for (id, expense) in store.iter() {
        serde_json::to_writer(&mut *writer, &Line { id, expense })?;
        writer.write_all(b"\n")?;
    }
    Ok(())
}
