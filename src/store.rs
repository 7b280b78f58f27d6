//! The processed-data store: one CSV per dataset at a well-known path.
//!
//! Readers of the store must cope with a dataset that has never been
//! processed, so [`read_processed`] reports absence as `None`.

use crate::dataset::DatasetKind;
use crate::error::{Result, ResultExt as _};
use crate::loader::read_csv_frame;
use polars::prelude::*;
use std::path::{Path, PathBuf};

pub fn processed_path(processed_dir: &Path, kind: DatasetKind) -> PathBuf {
    processed_dir.join(kind.processed_file_name())
}

/// Write `df` as the processed file for `kind`, creating the directory if needed.
///
/// Missing values are written as empty fields.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be created or the frame
/// cannot be serialized.
pub fn write_processed(
    processed_dir: &Path,
    kind: DatasetKind,
    df: &mut DataFrame,
) -> Result<PathBuf> {
    std::fs::create_dir_all(processed_dir).with_context(|| {
        format!(
            "Failed to create processed directory {}",
            processed_dir.display()
        )
    })?;

    let path = processed_path(processed_dir, kind);
    let file = std::fs::File::create(&path)
        .with_context(|| format!("Failed to create {}", path.display()))?;

    CsvWriter::new(file)
        .include_header(true)
        .with_null_value(String::new())
        .finish(df)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(path)
}

/// Read the processed file for `kind`, or `None` if it does not exist.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be parsed.
pub fn read_processed(processed_dir: &Path, kind: DatasetKind) -> Result<Option<DataFrame>> {
    let path = processed_path(processed_dir, kind);
    if !path.exists() {
        return Ok(None);
    }
    read_csv_frame(&path).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_then_read() -> Result<()> {
        let dir = TempDir::new()?;
        let processed = dir.path().join("processed");
        let mut df = df!(
            "Year" => [2015_i64, 2016],
            "Ministry" => ["Culture", "Culture"],
            "YoY_Budget_Growth" => [None, Some(7.14)]
        )?;

        let path = write_processed(&processed, DatasetKind::GovernmentFunding, &mut df)?;
        assert_eq!(path, processed.join("government_funding_processed.csv"));

        let text = std::fs::read_to_string(&path)?;
        assert_eq!(
            text,
            "Year,Ministry,YoY_Budget_Growth\n2015,Culture,\n2016,Culture,7.14\n"
        );

        let back = read_processed(&processed, DatasetKind::GovernmentFunding)?;
        let back = back.ok_or_else(|| crate::error::EtlError::Config("missing".to_owned()))?;
        assert_eq!(back.height(), 2);
        assert_eq!(back.column("YoY_Budget_Growth")?.null_count(), 1);
        Ok(())
    }

    #[test]
    fn test_absent_file_reads_as_none() -> Result<()> {
        let dir = TempDir::new()?;
        assert!(read_processed(dir.path(), DatasetKind::ArtForms)?.is_none());
        Ok(())
    }
}
