//! Per-dataset reports and batch summaries.

use crate::dataset::DatasetKind;
use crate::error::{EtlError, Result};
use chrono::{DateTime, Local};
use std::path::PathBuf;
use std::time::Duration;

/// Report generated after one dataset is processed.
#[derive(Debug, Clone)]
pub struct DatasetReport {
    pub kind: DatasetKind,

    /// Raw file that was read
    pub input: PathBuf,

    /// Processed file that was written
    pub output: PathBuf,

    /// Number of rows before processing
    pub rows_before: usize,

    /// Number of columns before processing
    pub columns_before: usize,

    /// Number of rows after processing
    pub rows_after: usize,

    /// Number of columns after processing
    pub columns_after: usize,

    /// Time taken for load, transform and write
    pub duration: Duration,

    pub finished_at: DateTime<Local>,
}

impl DatasetReport {
    pub fn summary(&self) -> String {
        format!(
            "{}: {} rows ({} → {}), {} columns ({} → {}), {:.2}s → {}",
            self.kind.display_name(),
            change(self.rows_before, self.rows_after),
            self.rows_before,
            self.rows_after,
            change(self.columns_before, self.columns_after),
            self.columns_before,
            self.columns_after,
            self.duration.as_secs_f64(),
            self.output.display()
        )
    }
}

/// Report generated after one dataset is appended to the warehouse.
#[derive(Debug, Clone)]
pub struct UploadReport {
    pub kind: DatasetKind,
    /// Fully qualified remote table.
    pub table: String,
    pub rows: usize,
    pub duration: Duration,
}

impl UploadReport {
    pub fn summary(&self) -> String {
        format!(
            "{}: {} rows appended to {} in {:.2}s",
            self.kind.display_name(),
            self.rows,
            self.table,
            self.duration.as_secs_f64()
        )
    }
}

fn change(before: usize, after: usize) -> &'static str {
    match after.cmp(&before) {
        std::cmp::Ordering::Greater => "added",
        std::cmp::Ordering::Less => "removed",
        std::cmp::Ordering::Equal => "unchanged",
    }
}

/// What happened to one dataset in a batch.
#[derive(Debug)]
pub enum DatasetOutcome<R> {
    Processed(R),
    /// The input was absent.
    Skipped(EtlError),
    Failed(EtlError),
}

impl<R> DatasetOutcome<R> {
    /// Classify a result: a missing input skips the dataset, any other error fails it.
    pub fn from_result(result: Result<R>) -> Self {
        match result {
            Ok(report) => Self::Processed(report),
            Err(err) if err.is_not_found() => Self::Skipped(err),
            Err(err) => Self::Failed(err),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Processed(_) => "processed",
            Self::Skipped(_) => "skipped",
            Self::Failed(_) => "failed",
        }
    }
}

/// Outcomes of every dataset in a batch, in run order.
#[derive(Debug)]
pub struct BatchSummary<R> {
    outcomes: Vec<(DatasetKind, DatasetOutcome<R>)>,
}

impl<R> Default for BatchSummary<R> {
    fn default() -> Self {
        Self {
            outcomes: Vec::new(),
        }
    }
}

impl<R> BatchSummary<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the result for `kind`, logging skips as warnings and failures
    /// as errors.
    pub fn record(&mut self, kind: DatasetKind, result: Result<R>) {
        let outcome = DatasetOutcome::from_result(result);
        match &outcome {
            DatasetOutcome::Processed(_) => {}
            DatasetOutcome::Skipped(err) => {
                tracing::warn!("Skipping {}: {err}", kind.display_name());
            }
            DatasetOutcome::Failed(err) => {
                tracing::error!("Failed to process {}: {err}", kind.display_name());
            }
        }
        self.outcomes.push((kind, outcome));
    }

    pub fn outcomes(&self) -> &[(DatasetKind, DatasetOutcome<R>)] {
        &self.outcomes
    }

    pub fn outcome(&self, kind: DatasetKind) -> Option<&DatasetOutcome<R>> {
        self.outcomes
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, outcome)| outcome)
    }

    pub fn processed(&self) -> usize {
        self.count(|o| matches!(o, DatasetOutcome::Processed(_)))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, DatasetOutcome::Skipped(_)))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, DatasetOutcome::Failed(_)))
    }

    fn count(&self, pred: impl Fn(&DatasetOutcome<R>) -> bool) -> usize {
        self.outcomes.iter().filter(|(_, o)| pred(o)).count()
    }

    /// No dataset failed. Skipped datasets do not count against the batch.
    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }

    /// One line per dataset followed by the totals.
    pub fn summary(&self) -> String {
        let mut lines: Vec<String> = self
            .outcomes
            .iter()
            .map(|(kind, outcome)| {
                let detail = match outcome {
                    DatasetOutcome::Processed(_) => String::new(),
                    DatasetOutcome::Skipped(err) | DatasetOutcome::Failed(err) => {
                        format!(" ({err})")
                    }
                };
                format!("  {:<20} {}{detail}", kind.slug(), outcome.label())
            })
            .collect();
        lines.push(format!(
            "{} processed, {} skipped, {} failed",
            self.processed(),
            self.skipped(),
            self.failed()
        ));
        lines.join("\n")
    }
}
