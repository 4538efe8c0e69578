//! CSV codec
//!
//! Header `id,fecha,categoria,descripcion,monto`. English header names are
//! accepted on read. Rows always get fresh ids when loaded.

use std::io::{Read, Write};

use crate::error::ExpenseResult;
use crate::storage::record::{ParsedRecords, RawCsvRow, RejectReason};
use crate::storage::store::ExpenseStore;

pub const HEADER: [&str; 5] = ["id", "fecha", "categoria", "descripcion", "monto"];

/// Parse CSV rows from a reader
pub fn parse<R: Read>(reader: R) -> ExpenseResult<ParsedRecords> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    // Normalize header case so "Fecha" and "MONTO" match
    let headers = reader.headers()?.clone();
    let lowered: csv::StringRecord = headers.iter().map(|h| h.to_lowercase()).collect();
    reader.set_headers(lowered);

    let mut parsed = ParsedRecords::default();
    for (index, row) in reader.deserialize::<RawCsvRow>().enumerate() {
        // Line 1 is the header
        let line = index + 2;
        match row {
            Ok(row) => match row.into_expense() {
                Ok(expense) => parsed.fresh.push(expense),
                Err(reason) => parsed.skip(format_args!("line {}", line), &reason),
            },
            Err(e) => parsed.skip(
                format_args!("line {}", line),
                &RejectReason::Malformed(e.to_string()),
            ),
        }
    }
    Ok(parsed)
}

/// Write the whole store in insertion order
pub fn write<W: Write>(store: &ExpenseStore, writer: W) -> ExpenseResult<()> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(HEADER)?;

    for (id, expense) in store.iter() {
        writer.write_record([
            id.to_string(),
            expense.date.to_string(),
            expense.category.to_string(),
            expense.description.clone(),
            expense.amount.to_plain_string(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}
