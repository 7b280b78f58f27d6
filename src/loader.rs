//! Raw dataset loading.
//!
//! Loading happens in three passes over a small file:
//!
//! 1. a structural pass with the `csv` reader that checks the header and
//!    the field count of every row, so shape problems are reported with a
//!    line number instead of a Polars parse error;
//! 2. a typed read with Polars, which infers integer, float, boolean and
//!    string columns from content;
//! 3. a check of the dataset's required key columns, coercing numeric key
//!    columns that are entirely empty.

use crate::dataset::{DatasetKind, RequiredColumn, ValueKind};
use crate::error::{EtlError, Result};
use polars::prelude::*;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Rows sampled by Polars to infer column types.
const INFER_SCHEMA_ROWS: usize = 10_000;

/// Load a raw CSV file for `kind`.
///
/// # Errors
///
/// - [`EtlError::NotFound`] if `path` does not exist
/// - [`EtlError::MalformedInput`] for a missing header, a row whose field
///   count differs from the header, or an absent / non-numeric key column
pub fn load_dataset(path: &Path, kind: DatasetKind) -> Result<DataFrame> {
    let df = read_csv_frame(path)?;
    let df = conform_required_columns(df, path, kind.required_columns())?;

    tracing::debug!(
        "Loaded {} from {}: {} rows, {} columns",
        kind,
        path.display(),
        df.height(),
        df.width()
    );

    Ok(df)
}

/// Read any well-formed CSV file with a header row into a frame.
///
/// # Errors
///
/// See [`load_dataset`]; no column requirements are applied here.
pub fn read_csv_frame(path: &Path) -> Result<DataFrame> {
    if !path.exists() {
        return Err(EtlError::NotFound {
            path: path.to_path_buf(),
        });
    }

    check_shape(path)?;

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(INFER_SCHEMA_ROWS))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;

    Ok(df)
}

/// Check the header and per-row field counts.
fn check_shape(path: &Path) -> Result<()> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(|e| EtlError::malformed(path, e.to_string()))?;

    let headers = reader
        .headers()
        .map_err(|e| EtlError::malformed(path, e.to_string()))?
        .clone();

    if headers.is_empty() || headers.iter().all(|h| h.trim().is_empty()) {
        return Err(EtlError::malformed(path, "missing header row"));
    }

    let mut seen = HashSet::new();
    for name in &headers {
        if !seen.insert(name) {
            return Err(EtlError::malformed(
                path,
                format!("duplicate column '{name}' in header"),
            ));
        }
    }

    for record in reader.records() {
        let record = record.map_err(|e| EtlError::malformed(path, e.to_string()))?;
        if record.len() != headers.len() {
            let line = record.position().map_or(0, csv::Position::line);
            return Err(EtlError::malformed(
                path,
                format!(
                    "line {line} has {} fields, header has {}",
                    record.len(),
                    headers.len()
                ),
            ));
        }
    }

    Ok(())
}

/// Make sure every required column exists with a usable type.
pub(crate) fn conform_required_columns(
    mut df: DataFrame,
    path: &Path,
    required: &[RequiredColumn],
) -> Result<DataFrame> {
    for column in required {
        let Ok(existing) = df.column(column.name) else {
            return Err(EtlError::malformed(
                path,
                format!("missing required column '{}'", column.name),
            ));
        };

        let coerced = match column.kind {
            ValueKind::Any => None,
            ValueKind::Integer | ValueKind::Number => {
                coerce_numeric(existing.as_materialized_series(), column, path)?
            }
            ValueKind::Text => {
                if existing.dtype() == &DataType::String {
                    None
                } else {
                    Some(existing.as_materialized_series().cast(&DataType::String)?)
                }
            }
        };

        if let Some(series) = coerced {
            df.with_column(series)?;
        }
    }

    Ok(df)
}

fn coerce_numeric(series: &Series, column: &RequiredColumn, path: &Path) -> Result<Option<Series>> {
    let dtype = series.dtype();

    if dtype.is_integer() || dtype.is_float() {
        return Ok(None);
    }

    // Columns with no values at all are inferred as text.
    if series.null_count() == series.len() {
        return Ok(Some(series.cast(&DataType::Int64)?));
    }

    Err(non_numeric(path, column))
}

fn non_numeric(path: &Path, column: &RequiredColumn) -> EtlError {
    let expected = if column.kind == ValueKind::Integer {
        "integer"
    } else {
        "numeric"
    };
    EtlError::malformed(
        path,
        format!("column '{}' must be {expected}", column.name),
    )
}

/// Find the raw file for `kind` in `raw_dir`.
///
/// Candidates are `.csv` files whose name contains the dataset slug; the
/// first one in file-name order wins.
///
/// # Errors
///
/// [`EtlError::NotFound`] if the directory is missing or holds no candidate.
pub fn find_raw_file(raw_dir: &Path, kind: DatasetKind) -> Result<PathBuf> {
    if !raw_dir.is_dir() {
        return Err(EtlError::NotFound {
            path: raw_dir.to_path_buf(),
        });
    }

    let mut candidates = std::fs::read_dir(raw_dir)?
        .filter_map(std::result::Result::ok)
        .filter(|entry| entry.path().is_file())
        .filter(|entry| kind.matches_raw_file(&entry.file_name().to_string_lossy()))
        .map(|entry| entry.path())
        .collect::<Vec<_>>();
    candidates.sort();

    candidates.into_iter().next().ok_or_else(|| EtlError::NotFound {
        path: raw_dir.join(format!("*{}*.csv", kind.slug())),
    })
}
