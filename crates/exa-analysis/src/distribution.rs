//! Per-column distribution summaries for numeric columns.

use exa_model::{ColumnProfile, Dataset, Distribution, DistributionShape};

use crate::parse::scalar_to_number;
use crate::stats::{NumericSample, sturges_bins};

/// Skewness magnitude below which a distribution reads as symmetric.
const SYMMETRIC_SKEW_LIMIT: f64 = 0.5;

/// Summarizes a numeric sample. Returns None for an empty sample.
pub fn describe(column: &str, values: &[f64]) -> Option<Distribution> {
    let sample = NumericSample::new(values);
    let (min, max) = sample.min_max()?;
    let skewness = sample.skewness()?;

    Some(Distribution {
        column: column.to_string(),
        count: sample.len(),
        mean: sample.mean()?,
        median: sample.median()?,
        std_dev: sample.std_dev()?,
        min,
        max,
        q1: sample.quantile(0.25)?,
        q3: sample.quantile(0.75)?,
        skewness,
        shape: shape_of(skewness),
        histogram: sample.histogram(sturges_bins(sample.len())),
    })
}

/// Distributions of every numeric column, in profile order.
pub fn describe_numeric_columns(
    dataset: &Dataset,
    profiles: &[ColumnProfile],
) -> Vec<Distribution> {
    profiles
        .iter()
        .filter(|p| p.is_numeric())
        .filter_map(|p| {
            let values: Vec<f64> = dataset
                .rows
                .iter()
                .filter_map(|row| row.get(&p.name).and_then(scalar_to_number))
                .collect();
            describe(&p.name, &values)
        })
        .collect()
}

fn shape_of(skewness: f64) -> DistributionShape {
    if skewness.abs() < SYMMETRIC_SKEW_LIMIT {
        DistributionShape::Symmetric
    } else if skewness > 0.0 {
        DistributionShape::RightSkewed
    } else {
        DistributionShape::LeftSkewed
    }
}
