//! Batch execution: load, transform and store each dataset independently.

use super::report::{BatchSummary, DatasetReport};
use crate::config::EtlConfig;
use crate::dataset::DatasetKind;
use crate::error::{Result, ResultExt as _};
use crate::loader::{find_raw_file, load_dataset};
use crate::store::write_processed;
use crate::transform;
use chrono::Local;
use std::path::Path;
use std::time::Instant;

/// Load `input`, apply the derivation for `kind` and write the processed file.
///
/// # Errors
///
/// Returns the loader's [`crate::error::EtlError::NotFound`] or
/// [`crate::error::EtlError::MalformedInput`], the transform's error, or a
/// write failure. No processed file is written unless every step succeeds.
pub fn process_file(
    kind: DatasetKind,
    input: &Path,
    processed_dir: &Path,
) -> Result<DatasetReport> {
    let start = Instant::now();
    tracing::info!("Processing {} from {}", kind.display_name(), input.display());

    let df = load_dataset(input, kind)?;
    let rows_before = df.height();
    let columns_before = df.width();

    let mut df = transform::apply(kind, df)
        .with_context(|| format!("Failed to transform {}", input.display()))?;

    let output = write_processed(processed_dir, kind, &mut df)?;

    let report = DatasetReport {
        kind,
        input: input.to_path_buf(),
        output,
        rows_before,
        columns_before,
        rows_after: df.height(),
        columns_after: df.width(),
        duration: start.elapsed(),
        finished_at: Local::now(),
    };
    tracing::info!("{}", report.summary());

    Ok(report)
}

/// Discover the raw file for `kind` under the configured raw directory and
/// process it.
///
/// # Errors
///
/// [`crate::error::EtlError::NotFound`] when no raw file exists; otherwise as
/// [`process_file`].
pub fn process_dataset(config: &EtlConfig, kind: DatasetKind) -> Result<DatasetReport> {
    let input = find_raw_file(&config.raw_dir, kind)?;
    process_file(kind, &input, &config.processed_dir)
}

/// Process each of `kinds` in order. A failure in one dataset never stops the
/// others.
pub fn run_batch(config: &EtlConfig, kinds: &[DatasetKind]) -> BatchSummary<DatasetReport> {
    tracing::info!(
        "Starting batch of {} dataset(s): raw {}, processed {}",
        kinds.len(),
        config.raw_dir.display(),
        config.processed_dir.display()
    );

    let mut summary = BatchSummary::new();
    for &kind in kinds {
        summary.record(kind, process_dataset(config, kind));
    }

    tracing::info!(
        "Batch finished: {} processed, {} skipped, {} failed",
        summary.processed(),
        summary.skipped(),
        summary.failed()
    );
    summary
}
