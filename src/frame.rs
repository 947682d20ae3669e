//! Table helpers shared by the dbs and LI-7000 readers.
//!
//! Thin wrappers around polars for the few table operations the readers
//! need: loading tab-delimited text, renaming to a fixed vocabulary, and
//! pulling typed values out of a column.

use crate::error::{KoolstofError, Result};
use polars::prelude::*;
use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Load a tab-delimited file with a header row.
///
/// `skip_rows` lines above the header are ignored; cells equal to
/// `null_value` become missing. Columns named in `text_columns` are read as
/// strings whatever their contents look like, so identifiers such as `007`
/// keep their leading zeros.
pub fn read_tab_delimited(
    path: &Path,
    skip_rows: usize,
    null_value: Option<&str>,
    text_columns: &[&str],
) -> Result<DataFrame> {
    let text = decode_text(std::fs::read(path)?);
    let null_values = null_value.map(|marker| NullValues::AllColumnsSingle(marker.into()));

    let header: Vec<&str> = text
        .lines()
        .nth(skip_rows)
        .map(|line| line.split('\t').collect())
        .unwrap_or_default();
    let overwrite: Schema = text_columns
        .iter()
        .filter(|column| header.contains(*column))
        .map(|column| (PlSmallStr::from(*column), DataType::String))
        .collect();

    let frame = CsvReadOptions::default()
        .with_has_header(true)
        .with_skip_rows(skip_rows)
        .with_infer_schema_length(None)
        .with_schema_overwrite((!overwrite.is_empty()).then(|| Arc::new(overwrite)))
        .map_parse_options(|opts| {
            opts.with_separator(b'\t')
                .with_null_values(null_values.clone())
                .with_truncate_ragged_lines(true)
        })
        .into_reader_with_file_handle(Cursor::new(text.into_bytes()))
        .finish()?;

    debug!(
        "Read {} rows x {} columns from {}",
        frame.height(),
        frame.width(),
        path.display()
    );

    Ok(frame)
}

/// Decode file contents as UTF-8, or as latin-1 when they are not valid
/// UTF-8. The instrument software writes latin-1 units such as `µ` (0xB5).
pub fn decode_text(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => err.into_bytes().into_iter().map(char::from).collect(),
    }
}

/// Rename every column found in `mapping`; absent headers are skipped
pub fn rename_columns(frame: &mut DataFrame, mapping: &[(&str, &str)]) -> Result<()> {
    for (from, to) in mapping {
        if frame.get_column_index(from).is_some() {
            frame.rename(from, (*to).into())?;
        }
    }
    Ok(())
}

/// Drop headerless columns that hold no values.
///
/// A trailing tab on every line yields one of these.
pub fn drop_blank_columns(frame: &mut DataFrame) -> Result<Vec<String>> {
    let blank: Vec<String> = frame
        .get_columns()
        .iter()
        .filter(|column| is_unnamed(column.name().as_str()) && column.null_count() == column.len())
        .map(|column| column.name().to_string())
        .collect();

    for name in &blank {
        frame.drop_in_place(name)?;
    }
    Ok(blank)
}

/// Headers polars generates for empty header cells
fn is_unnamed(name: &str) -> bool {
    let name = name.trim();
    name.is_empty()
        || name
            .strip_prefix("column_")
            .is_some_and(|n| !n.is_empty() && n.chars().all(|c| c.is_ascii_digit()))
}

/// Fail with the file path when a required column is absent
pub fn require_column(frame: &DataFrame, column: &str, path: &Path) -> Result<()> {
    if frame.get_column_index(column).is_none() {
        return Err(KoolstofError::MissingColumn {
            column: column.to_string(),
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

/// Column values as strings, whatever type polars inferred
pub fn column_strings(frame: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
    let column = frame.column(name)?.cast(&DataType::String)?;
    let values = column
        .str()?
        .into_iter()
        .map(|value| value.map(str::to_string))
        .collect();
    Ok(values)
}

/// Column values as floats
pub fn column_f64(frame: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    let column = frame.column(name)?.cast(&DataType::Float64)?;
    let values = column.f64()?.into_iter().collect();
    Ok(values)
}
