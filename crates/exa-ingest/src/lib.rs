//! Dataset loading for Excel Analytics.
//!
//! Files are dispatched on their extension:
//! - `.csv` is read with Polars (single header row, schema inferred from the
//!   first 100 rows)
//! - `.json` must hold an array of flat objects
//!
//! Both readers reject files over [`MAX_FILE_SIZE`] and UTF-16 input.

pub mod csv;
mod error;
pub mod json;

use std::path::Path;

use exa_model::Dataset;
use tracing::info;

pub use csv::{MAX_FILE_SIZE, any_to_scalar, read_csv_dataset};
pub use error::{IngestError, Result};
pub use json::{parse_json_rows, read_json_dataset};

/// Loads a dataset from a `.csv` or `.json` file.
pub fn load_dataset(path: &Path) -> Result<Dataset> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let dataset = match extension.as_str() {
        "csv" => read_csv_dataset(path)?,
        "json" => read_json_dataset(path)?,
        _ => {
            return Err(IngestError::UnsupportedFormat {
                path: path.to_path_buf(),
                extension,
            });
        }
    };
    info!(
        path = %path.display(),
        rows = dataset.len(),
        columns = dataset.column_count(),
        "dataset loaded"
    );
    Ok(dataset)
}
