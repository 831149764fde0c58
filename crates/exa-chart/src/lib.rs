//! Smart chart configuration for the Excel Analytics pipeline.
//!
//! Profiles the columns of a dataset, scores pairwise relationships, ranks
//! chart types by accumulated weight, and binds the best candidates to
//! concrete columns.
//!
//! # Example
//!
//! ```ignore
//! use exa_chart::configure;
//! use exa_model::{ChartType, UserPreferences};
//!
//! let preferences = UserPreferences::new().avoid(ChartType::Pie);
//! let result = configure(rows, &preferences)?;
//! if let Some(best) = result.configurations.first() {
//!     println!("{}: {:?} x {:?}", best.title, best.x_axis, best.y_axis);
//! }
//! ```

pub mod config;
mod error;
pub mod recommend;
pub mod weights;

use std::collections::BTreeMap;

use exa_analysis::{analyze_dataset, analyze_relationships, describe_numeric_columns};
use exa_model::{
    AutoSelections, ChartAnalysis, ChartConfiguration, ChartConfigurationResult, ChartMetadata,
    ChartRecommendation, Dataset, Relationship, Row, UserPreferences,
};
use tracing::{info, info_span};

pub use error::{ChartError, Result};
pub use weights::ChartWeights;

use crate::config::{build_configurations, by_quality};
use crate::recommend::{ColumnGroups, detect_patterns, recommendations, score};

/// Configures charts for rows whose header order is the union of their keys.
///
/// A [`Row`] keeps its keys sorted, so columns come out in alphabetical
/// order. Call [`configure_dataset`] when the file's column order matters.
///
/// # Errors
///
/// Returns [`ChartError::EmptyDataset`] when there are no rows and
/// [`ChartError::NoColumns`] when the rows carry no columns.
pub fn configure(
    rows: Vec<Row>,
    preferences: &UserPreferences,
) -> Result<ChartConfigurationResult> {
    configure_dataset(&Dataset::from_rows(rows), preferences)
}

/// Configures charts for a dataset with an explicit header order.
///
/// # Errors
///
/// See [`configure`].
pub fn configure_dataset(
    dataset: &Dataset,
    preferences: &UserPreferences,
) -> Result<ChartConfigurationResult> {
    let span = info_span!("configure", rows = dataset.len(), columns = dataset.column_count());
    let _guard = span.enter();

    if dataset.is_empty() {
        return Err(ChartError::EmptyDataset);
    }
    if dataset.columns.is_empty() {
        return Err(ChartError::NoColumns);
    }

    let profiles = analyze_dataset(dataset);
    let relationships = analyze_relationships(dataset, &profiles);
    let distributions = describe_numeric_columns(dataset, &profiles);

    let groups = ColumnGroups::new(by_quality(&profiles));
    let patterns = detect_patterns(&groups);
    let weights = score(&groups, &patterns, &relationships, preferences);
    let recommendations = recommendations(&weights);
    let configurations = build_configurations(&recommendations, &groups);

    let data_quality_score =
        profiles.iter().map(|p| p.quality).sum::<f64>() / profiles.len() as f64;
    let mean_confidence = if recommendations.is_empty() {
        0.0
    } else {
        recommendations.iter().map(|r| r.confidence).sum::<f64>() / recommendations.len() as f64
    };
    let metadata = ChartMetadata {
        data_size: dataset.len(),
        column_count: dataset.column_count(),
        data_quality_score,
        confidence_score: (mean_confidence + data_quality_score) / 2.0,
    };

    let auto_selections = auto_select(&recommendations, &configurations, &relationships);
    info!(
        recommendations = recommendations.len(),
        configurations = configurations.len(),
        top = ?auto_selections.chart_type,
        confidence = metadata.confidence_score,
        "chart configuration complete"
    );

    let mut data_types = BTreeMap::new();
    for profile in &profiles {
        *data_types.entry(profile.column_type).or_insert(0) += 1;
    }

    Ok(ChartConfigurationResult {
        analysis: ChartAnalysis {
            columns: profiles,
            patterns,
            relationships,
            data_types,
            distributions,
        },
        recommendations,
        configurations,
        auto_selections,
        metadata,
    })
}

/// The first materialized configuration, or the top recommendation alone.
fn auto_select(
    recommendations: &[ChartRecommendation],
    configurations: &[ChartConfiguration],
    relationships: &[Relationship],
) -> AutoSelections {
    let top_relationship = relationships.first().cloned();
    match configurations.first() {
        Some(config) => AutoSelections {
            chart_type: Some(config.chart_type),
            x_axis: config.x_axis.clone(),
            y_axis: config.y_axis.clone(),
            group_by: config.group_by.clone(),
            top_relationship,
        },
        None => AutoSelections {
            chart_type: recommendations.first().map(|r| r.chart_type),
            top_relationship,
            ..AutoSelections::default()
        },
    }
}
