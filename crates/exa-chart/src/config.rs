//! Binding recommendations to concrete columns.
//!
//! Column lists are ordered by descending quality (ties keep header order)
//! and the first column of the right class wins each slot. A chart type whose
//! required columns are missing produces no configuration.

use exa_analysis::stats::sturges_bins;
use exa_model::{ChartConfiguration, ChartRecommendation, ChartType, ColumnProfile};

use crate::recommend::ColumnGroups;

/// Only this many top recommendations are materialized.
pub const MAX_CONFIGURATIONS: usize = 5;

const BUBBLE_DIMENSIONS: usize = 3;
const RADAR_DIMENSIONS: usize = 6;

/// Profiles sorted by descending quality, stable.
pub fn by_quality(profiles: &[ColumnProfile]) -> Vec<&ColumnProfile> {
    let mut sorted: Vec<&ColumnProfile> = profiles.iter().collect();
    sorted.sort_by(|a, b| b.quality.total_cmp(&a.quality));
    sorted
}

fn names(columns: &[&ColumnProfile], limit: usize) -> Vec<String> {
    columns.iter().take(limit).map(|p| p.name.clone()).collect()
}

fn name_at(columns: &[&ColumnProfile], index: usize) -> Option<String> {
    columns.get(index).map(|p| p.name.clone())
}

/// Configurations for the top recommendations, in recommendation order.
pub fn build_configurations(
    recommendations: &[ChartRecommendation],
    groups: &ColumnGroups<'_>,
) -> Vec<ChartConfiguration> {
    recommendations
        .iter()
        .take(MAX_CONFIGURATIONS)
        .filter_map(|rec| build_configuration(rec, groups))
        .collect()
}

/// Binds one recommendation, or None when its columns are not available.
pub fn build_configuration(
    recommendation: &ChartRecommendation,
    groups: &ColumnGroups<'_>,
) -> Option<ChartConfiguration> {
    let numeric = &groups.numeric;
    let categorical = &groups.categorical;
    let mut config = ChartConfiguration {
        chart_type: recommendation.chart_type,
        title: String::new(),
        x_axis: None,
        y_axis: None,
        group_by: None,
        bins: None,
        dimensions: Vec::new(),
        confidence: recommendation.confidence,
    };

    match recommendation.chart_type {
        ChartType::Bar | ChartType::Box => {
            let x = name_at(categorical, 0)?;
            let y = name_at(numeric, 0)?;
            config.title = format!("{y} by {x}");
            config.group_by = name_at(categorical, 1);
            config.x_axis = Some(x);
            config.y_axis = Some(y);
        }
        ChartType::Pie => {
            let x = name_at(categorical, 0)?;
            let y = name_at(numeric, 0)?;
            config.title = format!("{y} share by {x}");
            config.x_axis = Some(x);
            config.y_axis = Some(y);
        }
        ChartType::Line | ChartType::Area => {
            let x = name_at(&groups.temporal, 0).or_else(|| name_at(categorical, 0))?;
            let y = name_at(numeric, 0)?;
            config.title = format!("{y} over {x}");
            config.x_axis = Some(x);
            config.y_axis = Some(y);
        }
        ChartType::Scatter => {
            let x = name_at(numeric, 0)?;
            let y = name_at(numeric, 1)?;
            config.title = format!("{y} vs {x}");
            config.x_axis = Some(x);
            config.y_axis = Some(y);
        }
        ChartType::Bubble => {
            if numeric.len() < 2 {
                return None;
            }
            config.dimensions = names(numeric, BUBBLE_DIMENSIONS);
            config.title = config.dimensions.join(" / ");
        }
        ChartType::Histogram => {
            let column = numeric.first()?;
            config.title = format!("Distribution of {}", column.name);
            config.bins = Some(sturges_bins(column.non_null_count));
            config.x_axis = Some(column.name.clone());
        }
        ChartType::Radar => {
            if numeric.len() < 3 {
                return None;
            }
            config.dimensions = names(numeric, RADAR_DIMENSIONS);
            config.group_by = name_at(categorical, 0);
            config.title = format!("{} profile", config.dimensions.join(", "));
        }
    }
    Some(config)
}
