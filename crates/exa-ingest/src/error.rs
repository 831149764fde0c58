//! Error types for dataset loading.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading a dataset.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Input file not found.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File exceeds the size limit.
    #[error("file {path} is {size} bytes, larger than the {max_size} byte limit")]
    FileTooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },

    /// File encoding is not supported.
    #[error("unsupported encoding {encoding} in {path}, save the file as UTF-8")]
    UnsupportedEncoding {
        path: PathBuf,
        encoding: &'static str,
    },

    /// File extension is not a supported format.
    #[error("unsupported file format '{extension}' for {path}, expected .csv or .json")]
    UnsupportedFormat { path: PathBuf, extension: String },

    // === Parsing Errors ===
    /// Failed to parse CSV with Polars.
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    /// CSV file has no header row.
    #[error("CSV file is empty: {path}")]
    EmptyCsv { path: PathBuf },

    /// JSON file is not an array of objects.
    #[error("invalid JSON dataset {path}: {message}")]
    InvalidJson { path: PathBuf, message: String },

    // === DataFrame Errors ===
    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl IngestError {
    /// Maps an open or metadata failure, keeping "not found" distinct.
    pub(crate) fn from_io(path: &std::path::Path, error: std::io::Error) -> Self {
        if error.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            Self::FileRead {
                path: path.to_path_buf(),
                source: error,
            }
        }
    }
}

impl From<polars::prelude::PolarsError> for IngestError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
