//! Preprocessing results and validation reports.

use serde::{Deserialize, Serialize};

use crate::dataset::Dataset;
use crate::scalar::Row;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueSeverity {
    Error,
    Warning,
}

/// A data issue found during validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationIssue {
    /// Stable issue code (e.g., "EMPTY_DATASET").
    pub code: String,
    pub message: String,
    pub severity: IssueSeverity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    /// False when any error-severity issue was raised.
    pub is_consistent: bool,
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn from_issues(issues: Vec<ValidationIssue>) -> Self {
        let is_consistent = !issues
            .iter()
            .any(|issue| issue.severity == IssueSeverity::Error);
        Self {
            is_consistent,
            issues,
        }
    }

    pub fn error_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|issue| issue.severity == IssueSeverity::Error)
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|issue| issue.severity == IssueSeverity::Warning)
            .count()
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }
}

/// Quality percentages, each in `[0, 100]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct QualityReport {
    pub score: f64,
    pub completeness: f64,
    pub consistency: f64,
}

/// Counters collected across preprocessing stages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreprocessingStats {
    pub rows_processed: usize,
    pub missing_values_handled: usize,
    pub duplicates_removed: usize,
    pub data_types_normalized: usize,
    pub outliers_treated: usize,
}

/// Output of one preprocessing call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreprocessingResult {
    pub data: Vec<Row>,
    pub columns: Vec<String>,
    pub original_count: usize,
    pub processed_count: usize,
    pub stats: PreprocessingStats,
    pub validation: ValidationReport,
    pub quality: QualityReport,
}

impl PreprocessingResult {
    /// Cleaned rows with their header order, ready for chart configuration.
    pub fn into_dataset(self) -> Dataset {
        Dataset::new(self.columns, self.data)
    }
}
