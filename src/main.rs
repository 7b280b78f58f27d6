//! # heritage-etl entry point
//!
//! ```text
//! main()
//!   │
//!   ├─> Parse CLI arguments (clap)
//!   ├─> Initialize logging (console only if the log dir is unavailable)
//!   ├─> Load configuration
//!   │
//!   ├─> process: run the batch synchronously
//!   └─> upload:  create a Tokio runtime and drive the warehouse sink
//! ```
//!
//! Exit status is 1 when any dataset failed and 0 otherwise. A dataset whose
//! input is missing is skipped and does not change the exit status.

#![warn(clippy::all, rust_2018_idioms)]
#![expect(clippy::print_stdout, clippy::print_stderr)] // CLI output goes to the terminal

mod cli;

use clap::Parser as _;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();

    if let Err(err) = heritage_etl::logging::init() {
        heritage_etl::logging::init_console();
        tracing::warn!("File logging unavailable, logging to console only: {err}");
    }

    match cli::run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            tracing::error!("{err:#}");
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
