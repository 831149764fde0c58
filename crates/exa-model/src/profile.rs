//! Column profiles produced by the column analyzer.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::scalar::Scalar;

/// Detected data type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Numeric,
    Date,
    Boolean,
    Categorical,
    Text,
    Empty,
}

impl ColumnType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Numeric => "numeric",
            Self::Date => "date",
            Self::Boolean => "boolean",
            Self::Categorical => "categorical",
            Self::Text => "text",
            Self::Empty => "empty",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Analytical role of a column in a chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnRole {
    /// Quantity plotted on a value axis.
    Measure,
    /// Label or grouping key.
    Dimension,
    /// Time axis.
    Temporal,
    None,
}

impl ColumnRole {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Measure => "measure",
            Self::Dimension => "dimension",
            Self::Temporal => "temporal",
            Self::None => "none",
        }
    }
}

impl fmt::Display for ColumnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Occurrence count of one category value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub value: String,
    pub count: usize,
}

/// Inferred type, role, and quality metadata for one column.
///
/// Derived from the rows passed to the analyzer and never cached; a profile
/// describes exactly the snapshot it was computed from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnProfile {
    pub name: String,
    #[serde(rename = "type")]
    pub column_type: ColumnType,
    pub role: ColumnRole,
    /// `(completeness + min(2 * unique_ratio, 1)) / 2`, in `[0, 1]`.
    pub quality: f64,
    pub total_count: usize,
    pub non_null_count: usize,
    pub unique_count: usize,
    pub unique_ratio: f64,
    pub completeness: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub median: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub std_dev: Option<f64>,
    /// Most frequent non-null value, first occurrence wins ties.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<Scalar>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub top_categories: Vec<CategoryCount>,
}

impl ColumnProfile {
    /// Profile of a column with no usable values.
    pub fn empty(name: &str, total_count: usize) -> Self {
        Self {
            name: name.to_string(),
            column_type: ColumnType::Empty,
            role: ColumnRole::None,
            quality: 0.0,
            total_count,
            non_null_count: 0,
            unique_count: 0,
            unique_ratio: 0.0,
            completeness: 0.0,
            mean: None,
            median: None,
            min: None,
            max: None,
            std_dev: None,
            mode: None,
            top_categories: Vec::new(),
        }
    }

    pub fn is_numeric(&self) -> bool {
        self.column_type == ColumnType::Numeric
    }

    /// Time axis candidate: temporal role or date type.
    pub fn is_temporal(&self) -> bool {
        self.role == ColumnRole::Temporal || self.column_type == ColumnType::Date
    }

    /// Grouping candidate: categorical or boolean type.
    pub fn is_categorical(&self) -> bool {
        matches!(
            self.column_type,
            ColumnType::Categorical | ColumnType::Boolean
        )
    }
}
