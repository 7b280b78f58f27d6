//! # heritage-etl
//!
//! Batch ETL for the tourism and cultural heritage dashboard. Four raw CSV
//! exports are validated, enriched with derived columns and written to a
//! processed store that the dashboard and the warehouse sink read from.
//!
//! | Dataset | Derived columns |
//! |---|---|
//! | tourism statistics | `Total_Visitors`, `International_Percentage` |
//! | cultural sites | `Region`, `Popularity` |
//! | art forms | `Tourism_Potential_Score`, `Recognition_Score`, `Cultural_Significance` |
//! | government funding | `Actual_Utilization_Crores`, `YoY_Budget_Growth` |
//!
//! ## Quick Start
//!
//! ```no_run
//! use heritage_etl::config::EtlConfig;
//! use heritage_etl::dataset::DatasetKind;
//! use heritage_etl::pipeline::process_dataset;
//!
//! let config = EtlConfig::load(None)?;
//! let report = process_dataset(&config, DatasetKind::GovernmentFunding)?;
//! println!("{}", report.summary());
//! # Ok::<(), heritage_etl::error::EtlError>(())
//! ```
//!
//! ## Core Modules
//!
//! - [`dataset`]: the dataset catalogue and column names
//! - [`loader`]: raw file discovery and shape validation
//! - [`transform`]: per-dataset derivations
//! - [`store`]: processed file layout
//! - [`pipeline`]: the batch driver and its reports
//! - [`warehouse`]: PostgreSQL sink for processed files
//! - [`config`], [`logging`], [`error`]: ambient plumbing

#![warn(clippy::all, rust_2018_idioms)]

pub mod config;
pub mod dataset;
pub mod error;
pub mod loader;
pub mod logging;
pub mod pipeline;
pub mod store;
pub mod transform;
pub mod warehouse;
