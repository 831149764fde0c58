//! CSV loading through Polars.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use exa_model::{Dataset, Row, Scalar};
use polars::prelude::*;
use tracing::debug;

use crate::error::{IngestError, Result};

/// Maximum file size for loading (500 MB default).
pub const MAX_FILE_SIZE: u64 = 500 * 1024 * 1024;

/// Rows Polars inspects to infer column dtypes.
const INFER_SCHEMA_ROWS: usize = 100;

/// Check file size against a limit.
pub fn check_file_size_with_limit(path: &Path, max_size: u64) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|e| IngestError::from_io(path, e))?;
    if metadata.len() > max_size {
        return Err(IngestError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size,
        });
    }
    Ok(())
}

/// Rejects UTF-16 files. UTF-8 with or without BOM is accepted.
pub fn validate_encoding(path: &Path) -> Result<()> {
    let mut file = File::open(path).map_err(|e| IngestError::from_io(path, e))?;
    let mut buffer = [0u8; 2];
    let bytes_read = file.read(&mut buffer).map_err(|e| IngestError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    if bytes_read == 2 {
        let encoding = match buffer {
            [0xFF, 0xFE] => Some("UTF-16 LE"),
            [0xFE, 0xFF] => Some("UTF-16 BE"),
            _ => None,
        };
        if let Some(encoding) = encoding {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding,
            });
        }
    }
    Ok(())
}

/// Returns true when the file has a non-blank first line.
fn has_header_line(path: &Path) -> Result<bool> {
    let file = File::open(path).map_err(|e| IngestError::from_io(path, e))?;
    let mut first = String::new();
    BufReader::new(file)
        .read_line(&mut first)
        .map_err(|e| IngestError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
    Ok(!first.trim_start_matches('\u{feff}').trim().is_empty())
}

/// Reads a CSV file with a single header row into a DataFrame.
pub fn read_csv_frame(path: &Path) -> Result<DataFrame> {
    check_file_size_with_limit(path, MAX_FILE_SIZE)?;
    validate_encoding(path)?;
    if !has_header_line(path)? {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }

    let parse_error = |e: PolarsError| IngestError::CsvParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    };
    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(INFER_SCHEMA_ROWS))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(parse_error)?
        .finish()
        .map_err(parse_error)
}

/// Reads a CSV file into a dataset, keeping the header order.
///
/// A header-only file yields a dataset with columns and no rows.
pub fn read_csv_dataset(path: &Path) -> Result<Dataset> {
    let df = read_csv_frame(path)?;
    let dataset = frame_to_dataset(&df)?;
    debug!(
        path = %path.display(),
        rows = dataset.len(),
        columns = dataset.column_count(),
        "loaded CSV"
    );
    Ok(dataset)
}

/// Converts every cell of a DataFrame into a row map.
pub fn frame_to_dataset(df: &DataFrame) -> Result<Dataset> {
    let columns: Vec<String> = df
        .get_column_names()
        .into_iter()
        .map(|name| name.to_string())
        .collect();

    let mut rows = vec![Row::new(); df.height()];
    for (name, column) in columns.iter().zip(df.get_columns()) {
        for (idx, row) in rows.iter_mut().enumerate() {
            row.insert(name.clone(), any_to_scalar(column.get(idx)?));
        }
    }
    Ok(Dataset::new(columns, rows))
}

/// Converts a Polars cell into a [`Scalar`].
pub fn any_to_scalar(value: AnyValue<'_>) -> Scalar {
    match value {
        AnyValue::Null => Scalar::Null,
        AnyValue::Boolean(b) => Scalar::Bool(b),
        AnyValue::Int8(v) => Scalar::Number(f64::from(v)),
        AnyValue::Int16(v) => Scalar::Number(f64::from(v)),
        AnyValue::Int32(v) => Scalar::Number(f64::from(v)),
        AnyValue::Int64(v) => Scalar::Number(v as f64),
        AnyValue::UInt8(v) => Scalar::Number(f64::from(v)),
        AnyValue::UInt16(v) => Scalar::Number(f64::from(v)),
        AnyValue::UInt32(v) => Scalar::Number(f64::from(v)),
        AnyValue::UInt64(v) => Scalar::Number(v as f64),
        AnyValue::Float32(v) => Scalar::Number(f64::from(v)),
        AnyValue::Float64(v) => Scalar::Number(v),
        AnyValue::String(s) => Scalar::text(s),
        AnyValue::StringOwned(s) => Scalar::text(s.as_str()),
        other => {
            let s = other.to_string();
            // Display quotes string-like values
            match s.strip_prefix('"').and_then(|rest| rest.strip_suffix('"')) {
                Some(inner) => Scalar::text(inner),
                None => Scalar::Text(s),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    fn create_temp_csv(content: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content).unwrap();
        file
    }

    #[test]
    fn test_read_csv_dataset_types() {
        let file = create_temp_csv(b"name,amount,active\nwidget,12.5,true\ngadget,,false\n");
        let dataset = read_csv_dataset(file.path()).unwrap();

        assert_eq!(dataset.columns, vec!["name", "amount", "active"]);
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.value(0, "name"), &Scalar::text("widget"));
        assert_eq!(dataset.value(0, "amount"), &Scalar::Number(12.5));
        assert_eq!(dataset.value(1, "amount"), &Scalar::Null);
        assert_eq!(dataset.value(1, "active"), &Scalar::Bool(false));
    }

    #[test]
    fn test_header_only_file() {
        let file = create_temp_csv(b"a,b\n");
        let dataset = read_csv_dataset(file.path()).unwrap();
        assert_eq!(dataset.columns, vec!["a", "b"]);
        assert!(dataset.is_empty());
    }

    #[test]
    fn test_empty_file() {
        let file = create_temp_csv(b"");
        let result = read_csv_dataset(file.path());
        assert!(matches!(result, Err(IngestError::EmptyCsv { .. })));
    }

    #[test]
    fn test_utf16_rejected() {
        let file = create_temp_csv(&[0xFF, 0xFE, b'a', 0x00]);
        let result = validate_encoding(file.path());
        assert!(matches!(
            result,
            Err(IngestError::UnsupportedEncoding {
                encoding: "UTF-16 LE",
                ..
            })
        ));
    }

    #[test]
    fn test_size_limit() {
        let file = create_temp_csv(b"a,b\n1,2\n");
        let result = check_file_size_with_limit(file.path(), 4);
        assert!(matches!(result, Err(IngestError::FileTooLarge { .. })));
    }

    #[test]
    fn test_any_to_scalar() {
        assert_eq!(any_to_scalar(AnyValue::Int64(3)), Scalar::Number(3.0));
        assert_eq!(any_to_scalar(AnyValue::String("x")), Scalar::text("x"));
        assert_eq!(any_to_scalar(AnyValue::Null), Scalar::Null);
    }
}
