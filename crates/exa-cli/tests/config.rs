//! Config file loading.

use std::io::Write;

use exa_cli::config::load_config;
use exa_model::{ChartType, DuplicateStrategy, MissingValueStrategy, OutlierStrategy};
use insta::assert_snapshot;
use tempfile::NamedTempFile;

fn config_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp file");
    file.write_all(content.as_bytes()).expect("write config");
    file
}

#[test]
fn partial_config_keeps_defaults() {
    let file = config_file(
        r#"{
            "preprocess": { "missingValueStrategy": "median", "handleOutliers": true },
            "chart": { "avoidChartTypes": ["pie"] }
        }"#,
    );
    let config = load_config(Some(file.path())).expect("load config");

    assert_eq!(
        config.preprocess.missing_value_strategy,
        MissingValueStrategy::Median
    );
    assert_eq!(config.preprocess.duplicate_strategy, DuplicateStrategy::Strict);
    assert!(config.preprocess.handle_outliers);
    assert_eq!(config.preprocess.outlier_strategy, OutlierStrategy::Iqr);
    assert_eq!(config.preprocess.iqr_multiplier, 1.5);
    assert_eq!(config.chart.avoid_chart_types, vec![ChartType::Pie]);
    assert!(config.chart.preferred_chart_types.is_empty());
}

#[test]
fn empty_object_is_default() {
    let file = config_file("{}");
    let config = load_config(Some(file.path())).expect("load config");
    assert_eq!(config, exa_model::PipelineConfig::default());
}

#[test]
fn out_of_range_threshold_is_rejected() {
    let file = config_file(r#"{ "preprocess": { "keyColumnThreshold": 1.5 } }"#);
    let err = load_config(Some(file.path())).expect_err("invalid config");
    assert_snapshot!(
        err.root_cause(),
        @"invalid option keyColumnThreshold: must be in (0, 1], got 1.5"
    );
}

#[test]
fn malformed_config_names_the_file() {
    let file = config_file("preprocess: median");
    let err = load_config(Some(file.path())).expect_err("malformed config");
    assert!(err.to_string().starts_with("parse config file"));
}
