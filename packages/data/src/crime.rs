//! Wide crime table loader.
//!
//! The CSV has three identifier columns (borough, major category,
//! subcategory) followed by one count column per month. Identifier headers
//! are recognised by [`IdentifierColumn::from_header`], which also applies
//! the `MajorText`/`MinorText` renames; every other header is a month.
//!
//! Polars reads every cell as text with the header as the first row, so
//! header problems and bad counts can be reported against the file itself.

use std::fs::File;
use std::io::{Cursor, Read};
use std::path::Path;

use polars::prelude::*;
use safecity_crime_models::{IdentifierColumn, WideCrimeTable};

use crate::DataError;

/// Loads the wide crime table from `path`.
///
/// Returns `None` if the file is missing, empty, or malformed. The cause is
/// logged; it never propagates to the caller.
#[must_use]
pub fn load_crime_data(path: &Path) -> Option<WideCrimeTable> {
    match read_crime_file(path) {
        Ok(table) => {
            log::info!(
                "Loaded {} crime rows with {} month columns from {}",
                table.len(),
                table.months().len(),
                path.display()
            );
            Some(table)
        }
        Err(e) => {
            log::error!("Failed to load crime data from {}: {e}", path.display());
            None
        }
    }
}

fn read_crime_file(path: &Path) -> Result<WideCrimeTable, DataError> {
    if !path.is_file() {
        return Err(DataError::MissingFile {
            path: path.to_path_buf(),
        });
    }

    let file = File::open(path)?;
    if file.metadata()?.len() == 0 {
        return Err(DataError::EmptyFile {
            what: path.display().to_string(),
        });
    }

    parse_crime_csv(file)
}

/// Column layout resolved from the header row.
struct HeaderLayout {
    /// `(identifier, column index)` in table order.
    identifiers: Vec<(IdentifierColumn, usize)>,
    /// `(column index, month label)` in file order.
    months: Vec<(usize, String)>,
}

impl HeaderLayout {
    fn resolve(headers: &[String]) -> Result<Self, DataError> {
        let mut found: Vec<(IdentifierColumn, usize)> = Vec::new();
        let mut months: Vec<(usize, String)> = Vec::new();

        for (idx, header) in headers.iter().enumerate() {
            let label = header.trim();

            if let Some(column) = IdentifierColumn::from_header(label) {
                if found.iter().any(|(c, _)| *c == column) {
                    return Err(DataError::MalformedRow {
                        message: format!(
                            "header: {column} is given more than once (again as {label:?})"
                        ),
                    });
                }
                found.push((column, idx));
                continue;
            }

            if label.is_empty() {
                return Err(DataError::MalformedRow {
                    message: format!("header: column {} has no name", idx + 1),
                });
            }
            if months.iter().any(|(_, m)| m == label) {
                return Err(DataError::MalformedRow {
                    message: format!("header: month column {label} appears more than once"),
                });
            }
            months.push((idx, label.to_string()));
        }

        let identifiers = IdentifierColumn::all()
            .iter()
            .map(|column| {
                found
                    .iter()
                    .find(|(c, _)| c == column)
                    .copied()
                    .ok_or_else(|| DataError::MissingColumn {
                        column: column.to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            identifiers,
            months,
        })
    }
}

/// Parses a wide crime CSV from any reader.
///
/// # Errors
///
/// Returns [`DataError`] if the input has no header, lacks an identifier
/// column, repeats a column, has rows wider than the header, contains a
/// count that is not a non-negative whole number, or holds counts whose
/// total does not fit in a `u64`.
pub fn parse_crime_csv<R: Read>(mut reader: R) -> Result<WideCrimeTable, DataError> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(DataError::EmptyFile {
            what: "crime CSV has no header row".to_string(),
        });
    }

    let raw = CsvReadOptions::default()
        .with_has_header(false)
        .with_infer_schema_length(Some(0))
        .into_reader_with_file_handle(Cursor::new(bytes))
        .finish()?;

    let headers = raw
        .get_columns()
        .iter()
        .map(|c| -> PolarsResult<String> { Ok(c.str()?.get(0).unwrap_or_default().to_string()) })
        .collect::<PolarsResult<Vec<String>>>()?;
    if headers.iter().all(|h| h.trim().is_empty()) {
        return Err(DataError::EmptyFile {
            what: "crime CSV has no header row".to_string(),
        });
    }

    let layout = HeaderLayout::resolve(&headers)?;
    let body = raw.slice(1, raw.height().saturating_sub(1));
    let source = body.get_columns();

    let mut columns = Vec::with_capacity(layout.identifiers.len() + layout.months.len());
    for (column, idx) in &layout.identifiers {
        let values: Vec<String> = source[*idx]
            .str()?
            .into_iter()
            .map(|cell| cell.unwrap_or_default().trim().to_string())
            .collect();
        columns.push(Column::new(column.column_name().into(), values));
    }

    let mut total: u64 = 0;
    for (idx, month) in &layout.months {
        let counts = source[*idx]
            .str()?
            .into_iter()
            .enumerate()
            .map(|(row, cell)| {
                let cell = cell.unwrap_or_default().trim();
                let line = line_number(row);
                let count = parse_count(cell).ok_or_else(|| DataError::InvalidCount {
                    value: cell.to_string(),
                    month: month.clone(),
                    line,
                })?;
                total = total
                    .checked_add(count)
                    .ok_or_else(|| DataError::CountOverflow {
                        month: month.clone(),
                        line,
                    })?;
                Ok(count)
            })
            .collect::<Result<Vec<u64>, DataError>>()?;
        columns.push(Column::new(month.as_str().into(), counts));
    }

    let rows = body.height();
    let months = layout.months.into_iter().map(|(_, m)| m).collect();
    let table = WideCrimeTable::new(DataFrame::new(columns)?, months)?;
    if table.len() < rows {
        log::warn!(
            "{} duplicate identifier rows were merged by adding their counts",
            rows - table.len()
        );
    }

    Ok(table)
}

/// 1-based file line of a data row, counting the header as line 1.
fn line_number(row: usize) -> u64 {
    u64::try_from(row).map_or(u64::MAX, |r| r.saturating_add(2))
}

/// Parses one count cell. Empty cells count as zero; whole-valued floats
/// such as `"12.0"` are accepted.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss,
    clippy::float_cmp
)]
fn parse_count(cell: &str) -> Option<u64> {
    if cell.is_empty() {
        return Some(0);
    }
    if let Ok(n) = cell.parse::<u64>() {
        return Some(n);
    }
    let value = cell.parse::<f64>().ok()?;
    if value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value <= u64::MAX as f64 {
        Some(value as u64)
    } else {
        None
    }
}
