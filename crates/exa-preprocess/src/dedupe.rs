//! Duplicate row removal.
//!
//! The first occurrence of a row is kept. Later rows with the same key are
//! dropped, where the key depends on the strategy:
//! - `strict`: canonical JSON of the whole row
//! - `key_columns`: canonical JSON of the auto-detected key columns
//! - `fuzzy`: lowercased, whitespace-free values joined in header order

use std::collections::BTreeSet;

use exa_analysis::analyze_dataset;
use exa_model::{Dataset, DuplicateStrategy, Row, Scalar};
use tracing::debug;

/// Removes duplicate rows and returns how many were dropped.
///
/// # Errors
///
/// Returns an error if a row key cannot be serialized.
pub fn remove_duplicates(
    data: &mut Dataset,
    strategy: DuplicateStrategy,
    key_column_threshold: f64,
) -> serde_json::Result<usize> {
    let key_columns = match strategy {
        DuplicateStrategy::KeyColumns => detect_key_columns(data, key_column_threshold),
        DuplicateStrategy::Strict | DuplicateStrategy::Fuzzy => Vec::new(),
    };

    let mut seen = BTreeSet::new();
    let mut keep = Vec::with_capacity(data.len());
    for row in &data.rows {
        let key = match strategy {
            DuplicateStrategy::Strict => serde_json::to_string(row)?,
            DuplicateStrategy::KeyColumns => {
                let values: Vec<Scalar> = key_columns
                    .iter()
                    .map(|c| row.get(c).cloned().unwrap_or_default())
                    .collect();
                serde_json::to_string(&values)?
            }
            DuplicateStrategy::Fuzzy => fuzzy_key(row, &data.columns),
        };
        keep.push(seen.insert(key));
    }

    let before = data.len();
    let mut flags = keep.into_iter();
    data.rows.retain(|_| flags.next().unwrap_or(true));
    Ok(before - data.len())
}

/// Columns whose uniqueness ratio exceeds the threshold.
///
/// Falls back to every column when none qualify.
pub fn detect_key_columns(data: &Dataset, threshold: f64) -> Vec<String> {
    let keys: Vec<String> = analyze_dataset(data)
        .into_iter()
        .filter(|p| p.unique_ratio > threshold)
        .map(|p| p.name)
        .collect();
    if keys.is_empty() {
        debug!("no key columns detected, comparing all columns");
        data.columns.clone()
    } else {
        debug!(key_columns = ?keys, "detected key columns");
        keys
    }
}

fn fuzzy_key(row: &Row, columns: &[String]) -> String {
    columns
        .iter()
        .map(|c| {
            row.get(c)
                .map(ToString::to_string)
                .unwrap_or_default()
                .to_lowercase()
                .split_whitespace()
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("|")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset(columns: &[&str], rows: &[&[&str]]) -> Dataset {
        let rows = rows
            .iter()
            .map(|cells| {
                columns
                    .iter()
                    .zip(cells.iter())
                    .map(|(c, v)| ((*c).to_string(), Scalar::text(*v)))
                    .collect()
            })
            .collect();
        Dataset::new(columns.iter().map(|c| (*c).to_string()).collect(), rows)
    }

    #[test]
    fn test_strict_keeps_first_occurrence() {
        let mut data = dataset(&["a", "b"], &[&["1", "x"], &["2", "y"], &["1", "x"]]);
        assert_eq!(remove_duplicates(&mut data, DuplicateStrategy::Strict, 0.9).unwrap(), 1);
        assert_eq!(data.len(), 2);
        assert_eq!(data.value(1, "a"), &Scalar::text("2"));
    }

    #[test]
    fn test_strict_distinguishes_case() {
        let mut data = dataset(&["a"], &[&["Foo"], &["foo"]]);
        assert_eq!(remove_duplicates(&mut data, DuplicateStrategy::Strict, 0.9).unwrap(), 0);
    }

    #[test]
    fn test_fuzzy_ignores_case_and_spaces() {
        let mut data = dataset(&["a", "b"], &[&["New York", "x"], &["newyork", "X"]]);
        assert_eq!(remove_duplicates(&mut data, DuplicateStrategy::Fuzzy, 0.9).unwrap(), 1);
        assert_eq!(data.value(0, "a"), &Scalar::text("New York"));
    }

    #[test]
    fn test_key_columns() {
        // "id" is unique enough to be a key, "note" is not
        let mut data = dataset(
            &["id", "note"],
            &[
                &["1", "a"],
                &["2", "a"],
                &["3", "b"],
                &["4", "b"],
                &["5", "a"],
                &["6", "a"],
                &["7", "b"],
                &["8", "b"],
                &["9", "a"],
                &["10", "a"],
                &["10", "b"],
            ],
        );
        assert_eq!(detect_key_columns(&data, 0.9), vec!["id".to_string()]);
        assert_eq!(
            remove_duplicates(&mut data, DuplicateStrategy::KeyColumns, 0.9).unwrap(),
            1
        );
        assert_eq!(data.len(), 10);
    }

    #[test]
    fn test_key_columns_fallback_to_all() {
        let data = dataset(&["a", "b"], &[&["x", "y"], &["x", "y"]]);
        assert_eq!(detect_key_columns(&data, 0.9), vec!["a", "b"]);
    }
}
