//! Loading datasets from files on disk.

use std::io::Write;

use exa_ingest::{IngestError, load_dataset};
use exa_model::Scalar;
use tempfile::Builder;

fn temp_file(suffix: &str, content: &str) -> tempfile::NamedTempFile {
    let mut file = Builder::new().suffix(suffix).tempfile().expect("create temp file");
    file.write_all(content.as_bytes()).expect("write temp file");
    file
}

#[test]
fn loads_csv_by_extension() {
    let file = temp_file(".csv", "region,sales\nnorth,10\nsouth,20\n");
    let dataset = load_dataset(file.path()).expect("load csv");
    assert_eq!(dataset.columns, vec!["region", "sales"]);
    assert_eq!(dataset.len(), 2);
    assert_eq!(dataset.value(1, "sales"), &Scalar::Number(20.0));
}

#[test]
fn extension_match_ignores_case() {
    let file = temp_file(".JSON", r#"[{"x": "a"}]"#);
    let dataset = load_dataset(file.path()).expect("load json");
    assert_eq!(dataset.value(0, "x"), &Scalar::text("a"));
}

#[test]
fn json_columns_follow_the_file() {
    let file = temp_file(".json", r#"[{"sales": 10, "region": "north", "month": "Jan"}]"#);
    let dataset = load_dataset(file.path()).expect("load json");
    assert_eq!(dataset.columns, vec!["sales", "region", "month"]);
}

#[test]
fn rejects_unknown_extension() {
    let file = temp_file(".xlsx", "binary");
    let err = load_dataset(file.path()).unwrap_err();
    assert!(matches!(
        err,
        IngestError::UnsupportedFormat { ref extension, .. } if extension == "xlsx"
    ));
}

#[test]
fn missing_file_is_reported() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let err = load_dataset(&dir.path().join("absent.csv")).unwrap_err();
    assert!(matches!(err, IngestError::FileNotFound { .. }));
}

#[test]
fn invalid_json_names_the_file() {
    let file = temp_file(".json", "{not json");
    let err = load_dataset(file.path()).unwrap_err();
    assert!(matches!(err, IngestError::InvalidJson { .. }));
    assert!(err.to_string().contains(&file.path().display().to_string()));
}
