//! Post-processing validation and quality scoring.
//!
//! A cell is type-consistent when it is null or matches its column type:
//! numeric columns hold finite numbers, date columns hold parseable date
//! strings, boolean columns hold booleans. Text and categorical columns
//! accept anything.

use exa_analysis::parse::parse_date;
use exa_analysis::{analyze_dataset, stats};
use exa_model::{
    ColumnProfile, ColumnType, Dataset, IssueSeverity, QualityReport, Scalar, ValidationIssue,
    ValidationReport,
};
use tracing::warn;

/// A numeric range wider than this multiple of `|mean|` is flagged.
pub const LARGE_RANGE_FACTOR: f64 = 1000.0;

pub const EMPTY_DATASET: &str = "EMPTY_DATASET";
pub const TYPE_INCONSISTENCY: &str = "TYPE_INCONSISTENCY";
pub const LARGE_RANGE: &str = "LARGE_RANGE";

fn is_consistent(value: &Scalar, column_type: ColumnType) -> bool {
    if value.is_null() {
        return true;
    }
    match column_type {
        ColumnType::Numeric => value.as_number().is_some_and(f64::is_finite),
        ColumnType::Date => value.as_text().is_some_and(|s| parse_date(s).is_some()),
        ColumnType::Boolean => value.as_bool().is_some(),
        ColumnType::Categorical | ColumnType::Text | ColumnType::Empty => true,
    }
}

/// Validates the processed data and scores its quality.
///
/// Empty data yields an error issue and a zero score; everything else only
/// produces warnings.
pub fn validate(data: &Dataset) -> (ValidationReport, QualityReport) {
    if data.is_empty() {
        let issue = ValidationIssue {
            code: EMPTY_DATASET.to_string(),
            message: "no data rows remaining after preprocessing".to_string(),
            severity: IssueSeverity::Error,
            column: None,
            count: None,
        };
        warn!(code = EMPTY_DATASET, "{}", issue.message);
        return (
            ValidationReport::from_issues(vec![issue]),
            QualityReport::default(),
        );
    }

    let profiles = analyze_dataset(data);
    let mut issues = Vec::new();
    let mut cells = 0usize;
    let mut non_null = 0usize;
    let mut consistent = 0usize;

    for profile in &profiles {
        let mut inconsistent = 0u64;
        for row in &data.rows {
            let value = row.get(&profile.name).unwrap_or(&Scalar::Null);
            cells += 1;
            if !value.is_null() {
                non_null += 1;
            }
            if is_consistent(value, profile.column_type) {
                consistent += 1;
            } else {
                inconsistent += 1;
            }
        }

        if inconsistent > 0 {
            issues.push(ValidationIssue {
                code: TYPE_INCONSISTENCY.to_string(),
                message: format!(
                    "{inconsistent} values do not match type {}",
                    profile.column_type
                ),
                severity: IssueSeverity::Warning,
                column: Some(profile.name.clone()),
                count: Some(inconsistent),
            });
        }
        if let Some(issue) = large_range_issue(profile) {
            issues.push(issue);
        }
    }

    for issue in &issues {
        warn!(code = %issue.code, column = ?issue.column, "{}", issue.message);
    }

    let total = cells.max(1) as f64;
    let completeness = non_null as f64 / total * 100.0;
    let consistency = consistent as f64 / total * 100.0;
    let quality = QualityReport {
        score: stats::round2((completeness + consistency) / 2.0),
        completeness: stats::round2(completeness),
        consistency: stats::round2(consistency),
    };
    (ValidationReport::from_issues(issues), quality)
}

fn large_range_issue(profile: &ColumnProfile) -> Option<ValidationIssue> {
    let (mean, min, max) = (profile.mean?, profile.min?, profile.max?);
    if mean == 0.0 || max - min <= LARGE_RANGE_FACTOR * mean.abs() {
        return None;
    }
    Some(ValidationIssue {
        code: LARGE_RANGE.to_string(),
        message: format!("range {} is unusually large for mean {}", max - min, mean),
        severity: IssueSeverity::Warning,
        column: Some(profile.name.clone()),
        count: None,
    })
}
