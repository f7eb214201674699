//! Error types for table I/O.

use std::path::PathBuf;

use polars::prelude::PolarsError;
use thiserror::Error;

/// Errors raised while loading or persisting a table.
#[derive(Debug, Error)]
pub enum CleanError {
    /// The source file does not exist.
    #[error("File not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    /// The file extension is neither CSV nor Parquet.
    #[error("Unsupported file format: '{0}'. Supported formats: csv, parquet")]
    UnsupportedFormat(String),

    /// Polars failed to read or decode the source.
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: PolarsError,
    },

    /// Polars failed to encode or write the destination.
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: PolarsError,
    },

    /// The destination file could not be created.
    #[error("Failed to create output file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
