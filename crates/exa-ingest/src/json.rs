//! JSON loading: a top-level array of flat objects.

use std::path::Path;

use exa_model::{Dataset, Row, Scalar};
use serde_json::Value;
use tracing::debug;

use crate::csv::{MAX_FILE_SIZE, check_file_size_with_limit, validate_encoding};
use crate::error::{IngestError, Result};

/// Reads a JSON file holding an array of row objects.
///
/// Nested arrays and objects are kept as their JSON text.
pub fn read_json_dataset(path: &Path) -> Result<Dataset> {
    check_file_size_with_limit(path, MAX_FILE_SIZE)?;
    validate_encoding(path)?;
    let content = std::fs::read_to_string(path).map_err(|e| IngestError::from_io(path, e))?;
    let dataset = parse_json_rows(&content).map_err(|message| IngestError::InvalidJson {
        path: path.to_path_buf(),
        message,
    })?;
    debug!(
        path = %path.display(),
        rows = dataset.len(),
        columns = dataset.column_count(),
        "loaded JSON"
    );
    Ok(dataset)
}

/// Parses JSON text into a dataset, describing the first problem found.
///
/// Columns follow the order keys first appear in the file.
pub fn parse_json_rows(content: &str) -> std::result::Result<Dataset, String> {
    let value: Value =
        serde_json::from_str(content.trim_start_matches('\u{feff}')).map_err(|e| e.to_string())?;
    let Value::Array(items) = value else {
        return Err("expected a top-level array of objects".to_string());
    };

    let mut columns: Vec<String> = Vec::new();
    let mut rows = Vec::with_capacity(items.len());
    for (idx, item) in items.into_iter().enumerate() {
        let Value::Object(object) = item else {
            return Err(format!("element {idx} is not an object"));
        };
        for key in object.keys() {
            if !columns.contains(key) {
                columns.push(key.clone());
            }
        }
        let row: Row = object
            .into_iter()
            .map(|(key, value)| (key, value_to_scalar(value)))
            .collect();
        rows.push(row);
    }
    Ok(Dataset::new(columns, rows))
}

fn value_to_scalar(value: Value) -> Scalar {
    match value {
        Value::Null => Scalar::Null,
        Value::Bool(b) => Scalar::Bool(b),
        Value::Number(n) => n.as_f64().map_or(Scalar::Null, Scalar::Number),
        Value::String(s) => Scalar::Text(s),
        nested @ (Value::Array(_) | Value::Object(_)) => Scalar::Text(nested.to_string()),
    }
}
