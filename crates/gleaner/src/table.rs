//! The CSV table store.
//!
//! Harvested record sets are persisted as delimited text: a header row with
//! the canonical column names, one row per record, identifier column first.
//! Reading goes the other way — the first column of every row comes back as
//! a string, in row order, with no numeric coercion that could drop the
//! leading structure of older identifiers.

use super::*;
use crate::record::{PaperRecord, COLUMNS};

/// File extension identifying table files.
pub const TABLE_EXTENSION: &str = "csv";

/// Serializes a record set as delimited text at `path`.
///
/// The header row is written even for an empty record set, so an empty
/// harvest still produces a readable table. Creates or overwrites the file.
pub fn write_records(records: &[PaperRecord], path: &Path) -> Result<()> {
  let mut writer = csv::WriterBuilder::new().has_headers(false).from_path(path)?;
  writer.write_record(COLUMNS)?;
  for record in records {
    writer.serialize(record)?;
  }
  writer.flush()?;
  Ok(())
}

/// Reads the identifier column of the table file at `path`.
///
/// The first column of every data row is returned as a string, preserving
/// row order.
///
/// # Errors
///
/// Returns [`GleanerError::MalformedTable`] when the file has no header
/// row, no first column, or rows the CSV parser rejects.
pub fn read_identifiers(path: &Path) -> Result<Vec<String>> {
  let mut reader =
    csv::ReaderBuilder::new().flexible(true).from_path(path).map_err(|e| malformed(path, e))?;

  let headers = reader.headers().map_err(|e| malformed(path, e))?;
  if headers.get(0).map_or(true, |column| column.is_empty()) {
    return Err(malformed(path, "missing header row or identifier column"));
  }

  let mut identifiers = Vec::new();
  for row in reader.records() {
    let row = row.map_err(|e| malformed(path, e))?;
    identifiers.push(row.get(0).unwrap_or("").to_owned());
  }
  Ok(identifiers)
}

/// Lists every table file directly inside `directory`.
///
/// Matching is by file extension; the order is whatever the file system
/// lists and must not be relied upon.
pub fn discover_tables(directory: &Path) -> Result<Vec<PathBuf>> {
  let mut tables = Vec::new();
  for entry in std::fs::read_dir(directory)? {
    let entry = entry?;
    let path = entry.path();
    if path.extension().map_or(false, |ext| ext == TABLE_EXTENSION) {
      tables.push(path);
    }
  }
  Ok(tables)
}

/// Wraps any per-file failure with the path it occurred on.
fn malformed(path: &Path, reason: impl ToString) -> GleanerError {
  GleanerError::MalformedTable { path: path.to_path_buf(), reason: reason.to_string() }
}
