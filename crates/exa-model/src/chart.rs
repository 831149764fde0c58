//! Chart recommendation, configuration, and analysis types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::profile::{ColumnProfile, ColumnType};

/// Chart types the configurator can recommend.
///
/// Declaration order is the tie-break order for equal weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    Bar,
    Line,
    Area,
    Scatter,
    Pie,
    Histogram,
    Bubble,
    Radar,
    Box,
}

impl ChartType {
    pub const ALL: [Self; 9] = [
        Self::Bar,
        Self::Line,
        Self::Area,
        Self::Scatter,
        Self::Pie,
        Self::Histogram,
        Self::Bubble,
        Self::Radar,
        Self::Box,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bar => "bar",
            Self::Line => "line",
            Self::Area => "area",
            Self::Scatter => "scatter",
            Self::Pie => "pie",
            Self::Histogram => "histogram",
            Self::Bubble => "bubble",
            Self::Radar => "radar",
            Self::Box => "box",
        }
    }

    /// Display title used for recommendations and configurations.
    pub fn title(self) -> &'static str {
        match self {
            Self::Bar => "Bar Chart",
            Self::Line => "Line Chart",
            Self::Area => "Area Chart",
            Self::Scatter => "Scatter Plot",
            Self::Pie => "Pie Chart",
            Self::Histogram => "Histogram",
            Self::Bubble => "Bubble Chart",
            Self::Radar => "Radar Chart",
            Self::Box => "Box Plot",
        }
    }

    /// Position in [`ChartType::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Coarse label for a recommendation weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Suitability {
    Excellent,
    Good,
    Fair,
}

impl Suitability {
    pub fn from_weight(weight: f64) -> Self {
        if weight >= 0.8 {
            Self::Excellent
        } else if weight >= 0.5 {
            Self::Good
        } else {
            Self::Fair
        }
    }
}

/// A ranked chart suggestion before axis binding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartRecommendation {
    #[serde(rename = "type")]
    pub chart_type: ChartType,
    pub title: String,
    /// 1 for the best recommendation.
    pub rank: usize,
    /// 5 for the best recommendation, decreasing, never below 1.
    pub priority: u8,
    pub weight: f64,
    /// `min(weight, 1)`.
    pub confidence: f64,
    pub suitability: Suitability,
}

/// A recommendation resolved into concrete column bindings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartConfiguration {
    #[serde(rename = "type")]
    pub chart_type: ChartType,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_axis: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_axis: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bins: Option<usize>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dimensions: Vec<String>,
    pub confidence: f64,
}

/// Kind of pairwise column relationship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipType {
    /// Numeric against numeric.
    Correlation,
    /// Categorical against numeric.
    GroupComparison,
    /// Temporal against numeric.
    TimeSeries,
}

/// A scored relationship between two columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relationship {
    /// Axis-side column: the categorical or temporal one when kinds differ.
    pub column_a: String,
    pub column_b: String,
    pub relationship_type: RelationshipType,
    pub strength: f64,
    /// Signed Pearson coefficient for correlations.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correlation: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<ChartType>,
}

/// Structural pattern detected across the column set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataPattern {
    /// A temporal column next to a numeric one.
    TimeSeries,
    /// A categorical column next to a numeric one.
    CategoricalComparison,
    /// Two or more numeric columns.
    MultiNumeric,
    /// Two or more categorical columns.
    MultiCategorical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistributionShape {
    Symmetric,
    RightSkewed,
    LeftSkewed,
}

/// One equal-width histogram bucket, `[start, end)` except the last which is closed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

/// Summary statistics of one numeric column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Distribution {
    pub column: String,
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    pub q1: f64,
    pub q3: f64,
    pub skewness: f64,
    pub shape: DistributionShape,
    /// Sturges-binned histogram of the column.
    pub histogram: Vec<HistogramBin>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartAnalysis {
    pub columns: Vec<ColumnProfile>,
    pub patterns: Vec<DataPattern>,
    pub relationships: Vec<Relationship>,
    /// Number of columns per detected type.
    pub data_types: BTreeMap<ColumnType, usize>,
    pub distributions: Vec<Distribution>,
}

/// The configurator's single best pick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoSelections {
    pub chart_type: Option<ChartType>,
    pub x_axis: Option<String>,
    pub y_axis: Option<String>,
    pub group_by: Option<String>,
    pub top_relationship: Option<Relationship>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartMetadata {
    pub data_size: usize,
    pub column_count: usize,
    /// Mean column quality, in `[0, 1]`.
    pub data_quality_score: f64,
    /// Average of mean recommendation confidence and data quality.
    pub confidence_score: f64,
}

/// Full output of one chart configuration call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartConfigurationResult {
    pub analysis: ChartAnalysis,
    pub recommendations: Vec<ChartRecommendation>,
    pub configurations: Vec<ChartConfiguration>,
    pub auto_selections: AutoSelections,
    pub metadata: ChartMetadata,
}
