//! Configuration options for preprocessing and chart configuration.
//!
//! Every field has a stated default so partial configuration is resolved
//! once, at the entry point, instead of through scattered fallbacks.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::chart::ChartType;
use crate::error::{ModelError, Result};

/// How null cells are filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingValueStrategy {
    /// Median for numeric columns, mode otherwise.
    #[default]
    Auto,
    Mean,
    Median,
    Mode,
    /// Currently fills with the column mean, the same as `Mean`.
    Interpolate,
}

impl MissingValueStrategy {
    pub const ALL: [Self; 5] = [
        Self::Auto,
        Self::Mean,
        Self::Median,
        Self::Mode,
        Self::Interpolate,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Mean => "mean",
            Self::Median => "median",
            Self::Mode => "mode",
            Self::Interpolate => "interpolate",
        }
    }
}

/// How duplicate rows are recognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateStrategy {
    /// Exact equality of every field.
    #[default]
    Strict,
    /// Equality restricted to auto-detected key columns.
    KeyColumns,
    /// Case and whitespace insensitive equality of all values.
    Fuzzy,
}

impl DuplicateStrategy {
    pub const ALL: [Self; 3] = [Self::Strict, Self::KeyColumns, Self::Fuzzy];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Strict => "strict",
            Self::KeyColumns => "key_columns",
            Self::Fuzzy => "fuzzy",
        }
    }
}

/// How outliers are bounded and treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutlierStrategy {
    /// IQR fences, values capped to the fence.
    #[default]
    Iqr,
    /// Mean plus or minus `std_threshold` standard deviations, values capped.
    Std,
    /// IQR fences, values capped.
    Cap,
    /// IQR fences, rows holding an outlier are dropped.
    Remove,
}

impl OutlierStrategy {
    pub const ALL: [Self; 4] = [Self::Iqr, Self::Std, Self::Cap, Self::Remove];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Iqr => "iqr",
            Self::Std => "std",
            Self::Cap => "cap",
            Self::Remove => "remove",
        }
    }
}

macro_rules! impl_named_variant {
    ($ty:ty, $kind:literal) => {
        impl FromStr for $ty {
            type Err = ModelError;

            fn from_str(s: &str) -> Result<Self> {
                let needle = s.trim();
                Self::ALL
                    .into_iter()
                    .find(|v| v.as_str().eq_ignore_ascii_case(needle))
                    .ok_or_else(|| ModelError::UnknownVariant {
                        kind: $kind,
                        value: s.to_string(),
                    })
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

impl_named_variant!(MissingValueStrategy, "missing value strategy");
impl_named_variant!(DuplicateStrategy, "duplicate strategy");
impl_named_variant!(OutlierStrategy, "outlier strategy");
impl_named_variant!(ChartType, "chart type");

/// Options for the preprocessing pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PreprocessOptions {
    pub missing_value_strategy: MissingValueStrategy,
    pub duplicate_strategy: DuplicateStrategy,
    /// Outlier treatment only runs when set.
    pub handle_outliers: bool,
    pub outlier_strategy: OutlierStrategy,
    /// Fence distance in IQRs for the IQR based strategies.
    pub iqr_multiplier: f64,
    /// Distance in standard deviations for the `std` strategy.
    pub std_threshold: f64,
    /// Minimum uniqueness ratio for a column to count as a key column.
    pub key_column_threshold: f64,
}

impl Default for PreprocessOptions {
    fn default() -> Self {
        Self {
            missing_value_strategy: MissingValueStrategy::Auto,
            duplicate_strategy: DuplicateStrategy::Strict,
            handle_outliers: false,
            outlier_strategy: OutlierStrategy::Iqr,
            iqr_multiplier: 1.5,
            std_threshold: 3.0,
            key_column_threshold: 0.9,
        }
    }
}

impl PreprocessOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_missing_value_strategy(mut self, strategy: MissingValueStrategy) -> Self {
        self.missing_value_strategy = strategy;
        self
    }

    #[must_use]
    pub fn with_duplicate_strategy(mut self, strategy: DuplicateStrategy) -> Self {
        self.duplicate_strategy = strategy;
        self
    }

    /// Enables outlier handling with the given strategy.
    #[must_use]
    pub fn with_outliers(mut self, strategy: OutlierStrategy) -> Self {
        self.handle_outliers = true;
        self.outlier_strategy = strategy;
        self
    }

    /// Checks numeric thresholds.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidOption`] for a non-finite or out of range
    /// threshold.
    pub fn validate(&self) -> Result<()> {
        if !(self.iqr_multiplier.is_finite() && self.iqr_multiplier > 0.0) {
            return Err(ModelError::InvalidOption {
                field: "iqrMultiplier",
                reason: format!("must be a positive number, got {}", self.iqr_multiplier),
            });
        }
        if !(self.std_threshold.is_finite() && self.std_threshold > 0.0) {
            return Err(ModelError::InvalidOption {
                field: "stdThreshold",
                reason: format!("must be a positive number, got {}", self.std_threshold),
            });
        }
        if !(self.key_column_threshold > 0.0 && self.key_column_threshold <= 1.0) {
            return Err(ModelError::InvalidOption {
                field: "keyColumnThreshold",
                reason: format!("must be in (0, 1], got {}", self.key_column_threshold),
            });
        }
        Ok(())
    }
}

/// Chart type preferences supplied by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserPreferences {
    /// Each listed type gains a fixed boost.
    pub preferred_chart_types: Vec<ChartType>,
    /// Each listed type has its weight halved.
    pub avoid_chart_types: Vec<ChartType>,
}

impl UserPreferences {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn prefer(mut self, chart: ChartType) -> Self {
        self.preferred_chart_types.push(chart);
        self
    }

    #[must_use]
    pub fn avoid(mut self, chart: ChartType) -> Self {
        self.avoid_chart_types.push(chart);
        self
    }
}

/// Combined configuration, as loaded from a config file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub preprocess: PreprocessOptions,
    pub chart: UserPreferences,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = PreprocessOptions::default();
        assert_eq!(options.missing_value_strategy, MissingValueStrategy::Auto);
        assert_eq!(options.duplicate_strategy, DuplicateStrategy::Strict);
        assert!(!options.handle_outliers);
        assert_eq!(options.outlier_strategy, OutlierStrategy::Iqr);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_parse_strategy_names() {
        assert_eq!(
            "key_columns".parse::<DuplicateStrategy>(),
            Ok(DuplicateStrategy::KeyColumns)
        );
        assert_eq!(
            "Median".parse::<MissingValueStrategy>(),
            Ok(MissingValueStrategy::Median)
        );
        let err = "zscore".parse::<OutlierStrategy>().unwrap_err();
        assert_eq!(err.to_string(), "unknown outlier strategy 'zscore'");
    }

    #[test]
    fn test_validate_rejects_bad_thresholds() {
        let mut options = PreprocessOptions::default();
        options.iqr_multiplier = 0.0;
        assert!(matches!(
            options.validate(),
            Err(ModelError::InvalidOption {
                field: "iqrMultiplier",
                ..
            })
        ));

        let mut options = PreprocessOptions::default();
        options.key_column_threshold = 1.5;
        assert!(options.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let options: PreprocessOptions =
            serde_json::from_str(r#"{"duplicateStrategy":"fuzzy"}"#).unwrap();
        assert_eq!(options.duplicate_strategy, DuplicateStrategy::Fuzzy);
        assert_eq!(options.missing_value_strategy, MissingValueStrategy::Auto);
        assert!((options.iqr_multiplier - 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_unknown_strategy_in_json_fails() {
        let result: std::result::Result<PreprocessOptions, _> =
            serde_json::from_str(r#"{"missingValueStrategy":"guess"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_pipeline_config_json() {
        let config: PipelineConfig = serde_json::from_str(
            r#"{"preprocess":{"handleOutliers":true},"chart":{"avoidChartTypes":["pie"]}}"#,
        )
        .unwrap();
        assert!(config.preprocess.handle_outliers);
        assert_eq!(config.chart.avoid_chart_types, vec![ChartType::Pie]);
        assert!(config.chart.preferred_chart_types.is_empty());
    }
}
