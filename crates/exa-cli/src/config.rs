//! Pipeline configuration files and command line overrides.
//!
//! A config file is JSON shaped like [`PipelineConfig`]; every field is
//! optional and falls back to its default. Flags given on the command line
//! win over the file.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use exa_model::{
    ChartType, DuplicateStrategy, MissingValueStrategy, OutlierStrategy, PipelineConfig,
    PreprocessOptions, UserPreferences,
};
use tracing::debug;

/// Loads the config file, or the defaults when no path is given.
pub fn load_config(path: Option<&Path>) -> Result<PipelineConfig> {
    let Some(path) = path else {
        return Ok(PipelineConfig::default());
    };
    let content = fs::read_to_string(path)
        .with_context(|| format!("read config file {}", path.display()))?;
    let config: PipelineConfig = serde_json::from_str(&content)
        .with_context(|| format!("parse config file {}", path.display()))?;
    config
        .preprocess
        .validate()
        .with_context(|| format!("invalid preprocess options in {}", path.display()))?;
    debug!(path = %path.display(), "loaded config file");
    Ok(config)
}

/// Preprocessing flags that override the config file.
#[derive(Debug, Clone, Default)]
pub struct PreprocessOverrides {
    pub missing_values: Option<MissingValueStrategy>,
    pub duplicates: Option<DuplicateStrategy>,
    pub handle_outliers: bool,
    pub outlier_strategy: Option<OutlierStrategy>,
}

impl PreprocessOverrides {
    /// Applies the flags on top of `options`.
    ///
    /// Naming an outlier strategy implies `--handle-outliers`.
    pub fn apply(&self, mut options: PreprocessOptions) -> PreprocessOptions {
        if let Some(strategy) = self.missing_values {
            options.missing_value_strategy = strategy;
        }
        if let Some(strategy) = self.duplicates {
            options.duplicate_strategy = strategy;
        }
        if let Some(strategy) = self.outlier_strategy {
            options = options.with_outliers(strategy);
        } else if self.handle_outliers {
            options.handle_outliers = true;
        }
        options
    }
}

/// Adds command line chart preferences to the configured ones, skipping
/// types already listed.
pub fn merge_preferences(
    mut prefs: UserPreferences,
    prefer: &[ChartType],
    avoid: &[ChartType],
) -> UserPreferences {
    for &chart in prefer {
        if !prefs.preferred_chart_types.contains(&chart) {
            prefs.preferred_chart_types.push(chart);
        }
    }
    for &chart in avoid {
        if !prefs.avoid_chart_types.contains(&chart) {
            prefs.avoid_chart_types.push(chart);
        }
    }
    prefs
}
