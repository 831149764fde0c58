//! Outlier capping and removal for numeric columns.

use std::collections::BTreeSet;

use exa_analysis::parse::scalar_to_number;
use exa_analysis::{NumericSample, analyze_dataset};
use exa_model::{Dataset, OutlierStrategy, PreprocessOptions, Scalar};
use tracing::debug;

/// Columns with fewer numeric values are left alone.
pub const MIN_OUTLIER_SAMPLE: usize = 4;

/// Inclusive range outside which a value is an outlier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub lower: f64,
    pub upper: f64,
}

impl Bounds {
    /// IQR fences: `[Q1 - k * IQR, Q3 + k * IQR]`.
    pub fn iqr(sample: &NumericSample, multiplier: f64) -> Option<Self> {
        let q1 = sample.quantile(0.25)?;
        let q3 = sample.quantile(0.75)?;
        let iqr = q3 - q1;
        Some(Self {
            lower: q1 - multiplier * iqr,
            upper: q3 + multiplier * iqr,
        })
    }

    /// `mean ± threshold * σ` with the population standard deviation.
    pub fn std(sample: &NumericSample, threshold: f64) -> Option<Self> {
        let mean = sample.mean()?;
        let sd = sample.std_dev()?;
        Some(Self {
            lower: mean - threshold * sd,
            upper: mean + threshold * sd,
        })
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && value <= self.upper
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.lower, self.upper)
    }
}

fn bounds_for(sample: &NumericSample, options: &PreprocessOptions) -> Option<Bounds> {
    match options.outlier_strategy {
        OutlierStrategy::Std => Bounds::std(sample, options.std_threshold),
        OutlierStrategy::Iqr | OutlierStrategy::Cap | OutlierStrategy::Remove => {
            Bounds::iqr(sample, options.iqr_multiplier)
        }
    }
}

/// Treats outliers in every numeric column.
///
/// Capping strategies return the number of capped values; `remove` returns
/// the number of dropped rows. Bounds are computed before any row changes.
pub fn treat_outliers(data: &mut Dataset, options: &PreprocessOptions) -> usize {
    let mut column_bounds = Vec::new();
    for profile in analyze_dataset(data).iter().filter(|p| p.is_numeric()) {
        let values: Vec<f64> = data
            .rows
            .iter()
            .filter_map(|row| row.get(&profile.name).and_then(scalar_to_number))
            .collect();
        if values.len() < MIN_OUTLIER_SAMPLE {
            continue;
        }
        if let Some(bounds) = bounds_for(&NumericSample::new(&values), options) {
            debug!(
                column = %profile.name,
                lower = bounds.lower,
                upper = bounds.upper,
                "outlier bounds"
            );
            column_bounds.push((profile.name.clone(), bounds));
        }
    }

    if options.outlier_strategy == OutlierStrategy::Remove {
        remove_rows(data, &column_bounds)
    } else {
        cap_values(data, &column_bounds)
    }
}

fn cap_values(data: &mut Dataset, column_bounds: &[(String, Bounds)]) -> usize {
    let mut capped = 0;
    for row in &mut data.rows {
        for (column, bounds) in column_bounds {
            let Some(cell) = row.get_mut(column) else {
                continue;
            };
            if let Some(value) = scalar_to_number(cell)
                && !bounds.contains(value)
            {
                *cell = Scalar::Number(bounds.clamp(value));
                capped += 1;
            }
        }
    }
    capped
}

fn remove_rows(data: &mut Dataset, column_bounds: &[(String, Bounds)]) -> usize {
    let outlier_rows: BTreeSet<usize> = data
        .rows
        .iter()
        .enumerate()
        .filter(|(_, row)| {
            column_bounds.iter().any(|(column, bounds)| {
                row.get(column)
                    .and_then(scalar_to_number)
                    .is_some_and(|v| !bounds.contains(v))
            })
        })
        .map(|(idx, _)| idx)
        .collect();

    let mut idx = 0;
    data.rows.retain(|_| {
        let keep = !outlier_rows.contains(&idx);
        idx += 1;
        keep
    });
    outlier_rows.len()
}

#[cfg(test)]
mod tests {
    use exa_model::Row;

    use super::*;

    fn numbers(values: &[f64]) -> Dataset {
        let rows = values
            .iter()
            .map(|v| Row::from([("v".to_string(), Scalar::Number(*v))]))
            .collect();
        Dataset::new(vec!["v".to_string()], rows)
    }

    #[test]
    fn test_iqr_bounds() {
        let bounds = Bounds::iqr(&NumericSample::new(&[1.0, 2.0, 3.0, 4.0]), 1.5).unwrap();
        assert!((bounds.lower - (1.75 - 2.25)).abs() < 1e-12);
        assert!((bounds.upper - (3.25 + 2.25)).abs() < 1e-12);
    }

    #[test]
    fn test_iqr_caps_to_fence() {
        let mut data = numbers(&[10.0, 11.0, 12.0, 13.0, 100.0]);
        let options = PreprocessOptions::default().with_outliers(OutlierStrategy::Iqr);
        assert_eq!(treat_outliers(&mut data, &options), 1);
        // Q1 = 11, Q3 = 13, upper fence = 16
        assert_eq!(data.value(4, "v"), &Scalar::Number(16.0));
        assert_eq!(data.len(), 5);
    }

    #[test]
    fn test_remove_drops_rows() {
        let mut data = numbers(&[10.0, 11.0, 12.0, 13.0, 100.0]);
        let options = PreprocessOptions::default().with_outliers(OutlierStrategy::Remove);
        assert_eq!(treat_outliers(&mut data, &options), 1);
        assert_eq!(data.len(), 4);
    }

    #[test]
    fn test_std_strategy_uses_threshold() {
        let mut values = vec![10.0; 20];
        values.push(1000.0);
        let mut data = numbers(&values);
        let options = PreprocessOptions::default().with_outliers(OutlierStrategy::Std);
        assert_eq!(treat_outliers(&mut data, &options), 1);
        let capped = data.value(20, "v").as_number().unwrap();
        assert!(capped < 1000.0);
    }

    #[test]
    fn test_small_columns_untouched() {
        let mut data = numbers(&[1.0, 2.0, 500.0]);
        let options = PreprocessOptions::default().with_outliers(OutlierStrategy::Cap);
        assert_eq!(treat_outliers(&mut data, &options), 0);
    }
}
