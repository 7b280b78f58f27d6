//! Batch driver for the dashboard datasets.
//!
//! Each dataset runs through the same three stages:
//!
//! 1. **Load**: discover the raw CSV under `raw_dir` and validate its shape
//! 2. **Transform**: append the dataset's derived columns
//! 3. **Store**: write `<slug>_processed.csv` under `processed_dir`
//!
//! Datasets are isolated from each other. A missing raw file skips its
//! dataset, any other error fails it, and the batch carries on either way.
//!
//! ```no_run
//! use heritage_etl::config::EtlConfig;
//! use heritage_etl::dataset::DatasetKind;
//! use heritage_etl::pipeline::run_batch;
//!
//! let config = EtlConfig::load(None)?;
//! let summary = run_batch(&config, &DatasetKind::ALL);
//! println!("{}", summary.summary());
//! # Ok::<(), heritage_etl::error::EtlError>(())
//! ```

pub mod executor;
pub mod report;

pub use executor::{process_dataset, process_file, run_batch};
pub use report::{BatchSummary, DatasetOutcome, DatasetReport, UploadReport};
