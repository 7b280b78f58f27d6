//! Logging setup for the heritage ETL.
//!
//! Log lines go to stderr and to rotating files in the platform data
//! directory:
//!
//! - `heritage-etl.<date>.log`: everything the filter lets through
//! - `warnings.<date>.log`: warnings and errors only
//!
//! Both files rotate daily and the last 10 are kept. The level defaults to
//! `info` and can be changed with `RUST_LOG`.
//!
//! ```no_run
//! heritage_etl::logging::init().expect("Failed to initialize logging");
//! tracing::info!("Batch started");
//! ```

use crate::error::{EtlError, Result, ResultExt as _};
use std::path::{Path, PathBuf};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    EnvFilter, Layer as _, fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _,
};

const APP_DIR: &str = "heritage-etl";
const RETAINED_FILES: usize = 10;

/// Log directory under the platform data directory, created if missing.
///
/// - Windows: `%APPDATA%/heritage-etl/logs`
/// - macOS: `~/Library/Application Support/heritage-etl/logs`
/// - Linux: `~/.local/share/heritage-etl/logs`
pub fn get_log_dir() -> Result<PathBuf> {
    let base_dir = dirs::data_dir()
        .ok_or_else(|| EtlError::Config("Failed to determine data directory".to_owned()))?;

    let log_dir = base_dir.join(APP_DIR).join("logs");

    if !log_dir.exists() {
        std::fs::create_dir_all(&log_dir)
            .with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;
    }

    Ok(log_dir)
}

fn env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

fn appender(log_dir: &Path, prefix: &str) -> Result<RollingFileAppender> {
    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .max_log_files(RETAINED_FILES)
        .filename_prefix(prefix)
        .filename_suffix("log")
        .build(log_dir)
        .map_err(|e| EtlError::Config(format!("Failed to create {prefix} log appender: {e}")))
}

/// Install console and file logging.
///
/// # Errors
///
/// Returns an error if the log directory or a file appender cannot be
/// created. Nothing is installed in that case; see [`init_console`].
pub fn init() -> Result<PathBuf> {
    let log_dir = get_log_dir()?;
    let all_logs_appender = appender(&log_dir, APP_DIR)?;
    let warn_logs_appender = appender(&log_dir, "warnings")?;

    let console_layer = fmt::layer()
        .compact()
        .with_target(false)
        .with_writer(std::io::stderr);

    let all_logs_layer = fmt::layer()
        .with_target(true)
        .with_line_number(true)
        .with_file(true)
        .with_ansi(false)
        .with_writer(all_logs_appender);

    let warn_logs_layer = fmt::layer()
        .with_target(true)
        .with_line_number(true)
        .with_file(true)
        .with_ansi(false)
        .with_writer(warn_logs_appender)
        .with_filter(EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(env_filter("info"))
        .with(console_layer)
        .with(all_logs_layer)
        .with(warn_logs_layer)
        .init();

    tracing::debug!("Logging initialized, log directory: {}", log_dir.display());

    Ok(log_dir)
}

/// Console-only logging, used when [`init`] fails.
pub fn init_console() {
    tracing_subscriber::registry()
        .with(env_filter("info"))
        .with(
            fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}
