//! Tabular dataset: header order plus rows.

use serde::{Deserialize, Serialize};

use crate::scalar::{NULL_SCALAR, Row, Scalar};

/// An in-memory table.
///
/// `columns` is the header order. Every tie-break in the pipeline that talks
/// about "iteration order" follows it. Rows may be ragged; a missing key reads
/// as null.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

impl Dataset {
    /// Builds a dataset with an explicit header order.
    ///
    /// Keys found in rows but missing from `columns` are appended in first
    /// seen order.
    pub fn new(columns: Vec<String>, rows: Vec<Row>) -> Self {
        let mut dataset = Self { columns, rows };
        dataset.absorb_row_keys();
        dataset
    }

    /// Builds a dataset whose header order is the union of row keys.
    pub fn from_rows(rows: Vec<Row>) -> Self {
        Self::new(Vec::new(), rows)
    }

    fn absorb_row_keys(&mut self) {
        for row in &self.rows {
            for key in row.keys() {
                if !self.columns.iter().any(|c| c == key) {
                    self.columns.push(key.clone());
                }
            }
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Cell at `(row, column)`, null when the row or key is absent.
    pub fn value(&self, row: usize, column: &str) -> &Scalar {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .unwrap_or(&NULL_SCALAR)
    }

    /// All cells of one column in row order, nulls included.
    pub fn column_values(&self, column: &str) -> Vec<Scalar> {
        self.rows
            .iter()
            .map(|row| row.get(column).cloned().unwrap_or_default())
            .collect()
    }
}
