//! Error types for the heritage ETL.
//!
//! Every fallible library operation returns [`Result<T>`], whose error type
//! [`EtlError`] separates the failures the batch driver treats differently:
//!
//! - [`EtlError::NotFound`]: the input is absent, the dataset is skipped.
//! - [`EtlError::MalformedInput`] and [`EtlError::UnknownCategory`]: the
//!   dataset's transform is aborted, other datasets carry on.
//! - everything else: library, I/O, warehouse or configuration failures.
//!
//! Context added with [`ResultExt`] wraps the original error instead of
//! flattening it to a string, so [`EtlError::root`] still reports the
//! underlying variant:
//!
//! ```
//! use heritage_etl::error::{EtlError, Result, ResultExt as _};
//! use std::path::PathBuf;
//!
//! fn load() -> Result<()> {
//!     Err(EtlError::NotFound { path: PathBuf::from("data/raw/art_forms.csv") })
//! }
//!
//! let err = load().context("Loading art forms").unwrap_err();
//! assert!(err.is_not_found());
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for ETL operations.
#[derive(Debug, Error)]
pub enum EtlError {
    /// Input file or directory does not exist.
    #[error("Input not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// Header or row shape is wrong, or a required key column is unusable.
    #[error("Malformed input {}: {reason}", path.display())]
    MalformedInput { path: PathBuf, reason: String },

    /// A categorical value has no entry in the transform's lookup table.
    #[error("Unknown category '{value}' in column '{column}'")]
    UnknownCategory { column: String, value: String },

    /// Polars failed to read, compute or write a frame.
    #[error("Data processing error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// I/O errors outside of Polars (directory listing, file creation).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Warehouse connection or statement failure.
    #[error("Warehouse error: {0}")]
    Warehouse(#[from] sqlx::Error),

    /// Configuration could not be read or parsed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Another error with a description of what was being attempted.
    #[error("{context}: {source}")]
    Context {
        context: String,
        #[source]
        source: Box<EtlError>,
    },
}

impl EtlError {
    pub fn malformed(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::MalformedInput {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn unknown_category(column: impl Into<String>, value: impl Into<String>) -> Self {
        Self::UnknownCategory {
            column: column.into(),
            value: value.into(),
        }
    }

    /// The innermost error, looking through any [`EtlError::Context`] layers.
    pub fn root(&self) -> &Self {
        let mut current = self;
        while let Self::Context { source, .. } = current {
            current = source;
        }
        current
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self.root(), Self::NotFound { .. })
    }
}

impl From<serde_json::Error> for EtlError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(format!("JSON error: {err}"))
    }
}

/// Result type alias for ETL operations.
pub type Result<T> = std::result::Result<T, EtlError>;

/// Extension trait to add context to results.
pub trait ResultExt<T> {
    /// Add context to an error.
    fn context(self, msg: impl Into<String>) -> Result<T>;

    /// Add context using a closure (lazy evaluation).
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<EtlError>,
{
    fn context(self, msg: impl Into<String>) -> Result<T> {
        self.map_err(|e| EtlError::Context {
            context: msg.into(),
            source: Box::new(e.into()),
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| EtlError::Context {
            context: f(),
            source: Box::new(e.into()),
        })
    }
}
