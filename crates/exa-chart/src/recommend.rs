//! Chart type scoring.
//!
//! Weights are accumulated in three independent passes, then adjusted by
//! user preferences:
//! 1. **Patterns**: which column classes occur together
//! 2. **Relationships**: each scored pair boosts its suggested chart
//! 3. **Column counts**: numeric-typed columns, whatever their role
//!
//! Preferred types gain a fixed boost; avoided types are halved.

use exa_analysis::ColumnClass;
use exa_model::{
    ChartRecommendation, ChartType, ColumnProfile, ColumnType, DataPattern, Relationship,
    Suitability, UserPreferences,
};
use tracing::debug;

use crate::weights::ChartWeights;

const PREFERRED_BOOST: f64 = 0.2;
const AVOIDED_FACTOR: f64 = 0.5;
const RELATIONSHIP_FACTOR: f64 = 0.5;

/// Columns split by class, each list in the order given.
#[derive(Debug, Default)]
pub struct ColumnGroups<'a> {
    pub temporal: Vec<&'a ColumnProfile>,
    pub numeric: Vec<&'a ColumnProfile>,
    pub categorical: Vec<&'a ColumnProfile>,
    /// Columns typed numeric, including numeric years or months.
    pub numeric_typed: usize,
}

impl<'a> ColumnGroups<'a> {
    pub fn new<I>(profiles: I) -> Self
    where
        I: IntoIterator<Item = &'a ColumnProfile>,
    {
        let mut groups = Self::default();
        for profile in profiles {
            if profile.column_type == ColumnType::Numeric {
                groups.numeric_typed += 1;
            }
            match ColumnClass::of(profile) {
                ColumnClass::Temporal => groups.temporal.push(profile),
                ColumnClass::Numeric => groups.numeric.push(profile),
                ColumnClass::Categorical => groups.categorical.push(profile),
                ColumnClass::Other => {}
            }
        }
        groups
    }
}

/// Structural patterns present in the column set.
pub fn detect_patterns(groups: &ColumnGroups<'_>) -> Vec<DataPattern> {
    let has_numeric = !groups.numeric.is_empty();
    let mut patterns = Vec::new();
    if !groups.temporal.is_empty() && has_numeric {
        patterns.push(DataPattern::TimeSeries);
    }
    if !groups.categorical.is_empty() && has_numeric {
        patterns.push(DataPattern::CategoricalComparison);
    }
    if groups.numeric.len() >= 2 {
        patterns.push(DataPattern::MultiNumeric);
    }
    if groups.categorical.len() >= 2 {
        patterns.push(DataPattern::MultiCategorical);
    }
    patterns
}

/// Scores every chart type for the given analysis.
pub fn score(
    groups: &ColumnGroups<'_>,
    patterns: &[DataPattern],
    relationships: &[Relationship],
    preferences: &UserPreferences,
) -> ChartWeights {
    let mut weights = ChartWeights::new();

    for pattern in patterns {
        match pattern {
            DataPattern::TimeSeries => {
                weights.add(ChartType::Line, 0.4);
                weights.add(ChartType::Area, 0.3);
            }
            DataPattern::CategoricalComparison => {
                weights.add(ChartType::Bar, 0.4);
                weights.add(ChartType::Pie, 0.2);
            }
            DataPattern::MultiNumeric => {
                weights.add(ChartType::Scatter, 0.3);
                weights.add(ChartType::Bubble, 0.2);
            }
            DataPattern::MultiCategorical => {
                weights.add(ChartType::Radar, 0.2);
                weights.add(ChartType::Box, 0.2);
            }
        }
    }

    for relationship in relationships {
        if let Some(chart) = relationship.recommendation {
            weights.add(chart, RELATIONSHIP_FACTOR * relationship.strength);
        }
    }

    match groups.numeric_typed {
        0 => {}
        1 => weights.add(ChartType::Histogram, 0.3),
        _ => weights.add(ChartType::Scatter, 0.2),
    }

    for chart in &preferences.preferred_chart_types {
        weights.add(*chart, PREFERRED_BOOST);
    }
    for chart in &preferences.avoid_chart_types {
        weights.scale(*chart, AVOIDED_FACTOR);
    }

    debug!(weights = ?weights.ranked(), "chart weights");
    weights
}

/// Turns ranked weights into recommendations.
///
/// Priority is 5 for the first entry and drops by one per position down to 1.
pub fn recommendations(weights: &ChartWeights) -> Vec<ChartRecommendation> {
    weights
        .ranked()
        .into_iter()
        .enumerate()
        .map(|(index, (chart, weight))| ChartRecommendation {
            chart_type: chart,
            title: chart.title().to_string(),
            rank: index + 1,
            priority: u8::try_from(5usize.saturating_sub(index).max(1)).unwrap_or(1),
            weight,
            confidence: weight.min(1.0),
            suitability: Suitability::from_weight(weight),
        })
        .collect()
}
