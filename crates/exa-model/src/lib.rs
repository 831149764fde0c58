//! Data model for the Excel Analytics pipeline.
//!
//! Every value here is request scoped: datasets, profiles, reports, and chart
//! configurations are built fresh for each pipeline call and never shared.

pub mod chart;
pub mod dataset;
pub mod error;
pub mod options;
pub mod profile;
pub mod report;
pub mod scalar;

pub use chart::{
    AutoSelections, ChartAnalysis, ChartConfiguration, ChartConfigurationResult, ChartMetadata,
    ChartRecommendation, ChartType, DataPattern, Distribution, DistributionShape, HistogramBin,
    Relationship, RelationshipType, Suitability,
};
pub use dataset::Dataset;
pub use error::{ModelError, Result};
pub use options::{
    DuplicateStrategy, MissingValueStrategy, OutlierStrategy, PipelineConfig, PreprocessOptions,
    UserPreferences,
};
pub use profile::{CategoryCount, ColumnProfile, ColumnRole, ColumnType};
pub use report::{
    IssueSeverity, PreprocessingResult, PreprocessingStats, QualityReport, ValidationIssue,
    ValidationReport,
};
pub use scalar::{Row, Scalar, format_number};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_report_counts() {
        let report = ValidationReport::from_issues(vec![
            ValidationIssue {
                code: "EMPTY_DATASET".to_string(),
                message: "no data rows remaining after preprocessing".to_string(),
                severity: IssueSeverity::Error,
                column: None,
                count: None,
            },
            ValidationIssue {
                code: "TYPE_INCONSISTENCY".to_string(),
                message: "2 values do not match type numeric".to_string(),
                severity: IssueSeverity::Warning,
                column: Some("price".to_string()),
                count: Some(2),
            },
        ]);
        assert!(!report.is_consistent);
        assert_eq!(report.error_count(), 1);
        assert_eq!(report.warning_count(), 1);
        assert!(report.has_errors());
    }

    #[test]
    fn warnings_only_report_is_consistent() {
        let report = ValidationReport::from_issues(vec![ValidationIssue {
            code: "LARGE_RANGE".to_string(),
            message: "range is unusually large".to_string(),
            severity: IssueSeverity::Warning,
            column: Some("amount".to_string()),
            count: None,
        }]);
        assert!(report.is_consistent);
    }

    #[test]
    fn chart_recommendation_serializes_type_field() {
        let rec = ChartRecommendation {
            chart_type: ChartType::Bar,
            title: ChartType::Bar.title().to_string(),
            rank: 1,
            priority: 5,
            weight: 0.4,
            confidence: 0.4,
            suitability: Suitability::Fair,
        };
        let json = serde_json::to_value(&rec).expect("serialize recommendation");
        assert_eq!(json["type"], "bar");
        assert_eq!(json["suitability"], "fair");
        assert_eq!(json["priority"], 5);
    }

    #[test]
    fn chart_type_names_round_trip() {
        for chart in ChartType::ALL {
            assert_eq!(chart.as_str().parse::<ChartType>(), Ok(chart));
            assert_eq!(ChartType::ALL[chart.index()], chart);
        }
    }
}
