//! Descriptive statistics over numeric samples.
//!
//! Samples are held as Polars float arrays. Empty input yields `None`
//! instead of NaN.

use exa_model::HistogramBin;
use polars::prelude::*;

/// A numeric sample backed by a [`Float64Chunked`].
#[derive(Debug, Clone)]
pub struct NumericSample {
    values: Float64Chunked,
}

impl NumericSample {
    pub fn new(values: &[f64]) -> Self {
        Self {
            values: Float64Chunked::from_slice(PlSmallStr::EMPTY, values),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn mean(&self) -> Option<f64> {
        self.values.mean()
    }

    pub fn median(&self) -> Option<f64> {
        self.values.median()
    }

    /// Population variance.
    pub fn variance(&self) -> Option<f64> {
        self.values.var(0)
    }

    /// Population standard deviation.
    pub fn std_dev(&self) -> Option<f64> {
        self.values.std(0)
    }

    /// Quantile with linear interpolation. `q` is clamped to `[0, 1]`.
    pub fn quantile(&self, q: f64) -> Option<f64> {
        self.values
            .quantile(q.clamp(0.0, 1.0), QuantileMethod::Linear)
            .ok()
            .flatten()
    }

    pub fn min_max(&self) -> Option<(f64, f64)> {
        Some((self.values.min()?, self.values.max()?))
    }

    /// Moment coefficient of skewness. Constant samples have skewness 0.
    pub fn skewness(&self) -> Option<f64> {
        let mean = self.mean()?;
        let m2 = self.variance()?;
        if m2 == 0.0 {
            return Some(0.0);
        }
        let m3 = self
            .values
            .apply_values(|v| (v - mean).powi(3))
            .mean()?;
        Some(m3 / m2.powf(1.5))
    }

    /// Equal-width histogram between the sample minimum and maximum.
    ///
    /// A constant sample produces a single bin holding every value.
    pub fn histogram(&self, bins: usize) -> Vec<HistogramBin> {
        let Some((min, max)) = self.min_max() else {
            return Vec::new();
        };
        if bins == 0 {
            return Vec::new();
        }
        if min == max {
            return vec![HistogramBin {
                start: min,
                end: max,
                count: self.len(),
            }];
        }

        let width = (max - min) / bins as f64;
        let mut counts = vec![0usize; bins];
        for v in (&self.values).into_iter().flatten() {
            let idx = (((v - min) / width).floor() as usize).min(bins - 1);
            counts[idx] += 1;
        }
        counts
            .into_iter()
            .enumerate()
            .map(|(i, count)| HistogramBin {
                start: min + width * i as f64,
                end: if i + 1 == bins {
                    max
                } else {
                    min + width * (i + 1) as f64
                },
                count,
            })
            .collect()
    }
}

/// Pearson correlation coefficient of paired samples.
///
/// Returns None with fewer than two pairs or when either side is constant.
pub fn pearson(xs: &[f64], ys: &[f64]) -> Option<f64> {
    let n = xs.len().min(ys.len());
    if n < 2 {
        return None;
    }
    let x = Float64Chunked::from_slice(PlSmallStr::EMPTY, &xs[..n]);
    let y = Float64Chunked::from_slice(PlSmallStr::EMPTY, &ys[..n]);
    cov::pearson_corr(&x, &y)
        .filter(|r| r.is_finite())
        .map(|r| r.clamp(-1.0, 1.0))
}

/// Histogram bin count by Sturges' rule, bounded to `[5, 50]`.
pub fn sturges_bins(count: usize) -> usize {
    if count == 0 {
        return 5;
    }
    let bins = ((count as f64).log2() + 1.0).ceil() as usize;
    bins.clamp(5, 50)
}

/// Rounds to two decimals for report percentages.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_mean_and_median() {
        assert_eq!(NumericSample::new(&[]).mean(), None);
        assert_eq!(NumericSample::new(&[1.0, 2.0, 3.0]).mean(), Some(2.0));
        assert_eq!(NumericSample::new(&[3.0, 1.0, 2.0]).median(), Some(2.0));
        assert_eq!(NumericSample::new(&[4.0, 1.0, 2.0, 3.0]).median(), Some(2.5));
    }

    #[test]
    fn test_std_dev_population() {
        let sample = NumericSample::new(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert!(approx(sample.std_dev().unwrap(), 2.0));
        assert!(approx(sample.variance().unwrap(), 4.0));
    }

    #[test]
    fn test_quantile_interpolates() {
        let sample = NumericSample::new(&[4.0, 1.0, 3.0, 2.0]);
        assert!(approx(sample.quantile(0.25).unwrap(), 1.75));
        assert!(approx(sample.quantile(0.75).unwrap(), 3.25));
        assert_eq!(NumericSample::new(&[]).quantile(0.5), None);
    }

    #[test]
    fn test_pearson() {
        let xs = [1.0, 2.0, 3.0, 4.0, 5.0];
        let ys = [2.0, 4.0, 6.0, 8.0, 10.0];
        assert!(approx(pearson(&xs, &ys).unwrap(), 1.0));
        let inverse = [10.0, 8.0, 6.0, 4.0, 2.0];
        assert!(approx(pearson(&xs, &inverse).unwrap(), -1.0));
        assert_eq!(pearson(&xs, &[1.0, 1.0, 1.0, 1.0, 1.0]), None);
        assert_eq!(pearson(&[1.0], &[2.0]), None);
    }

    #[test]
    fn test_skewness_sign() {
        assert!(NumericSample::new(&[1.0, 1.0, 1.0, 2.0, 10.0]).skewness().unwrap() > 0.0);
        assert!(NumericSample::new(&[-10.0, 1.0, 2.0, 2.0, 2.0]).skewness().unwrap() < 0.0);
        assert_eq!(NumericSample::new(&[3.0, 3.0]).skewness(), Some(0.0));
    }

    #[test]
    fn test_sturges_bins_bounds() {
        assert_eq!(sturges_bins(0), 5);
        assert_eq!(sturges_bins(10), 5);
        assert_eq!(sturges_bins(100), 8);
        assert_eq!(sturges_bins(1000), 11);
        assert_eq!(sturges_bins(usize::MAX), 50);
    }

    #[test]
    fn test_histogram_counts_every_value() {
        let values = [1.0, 2.0, 2.5, 3.0, 4.0, 5.0];
        let bins = NumericSample::new(&values).histogram(4);
        assert_eq!(bins.len(), 4);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), values.len());
        assert!(approx(bins[0].start, 1.0));
        assert!(approx(bins[3].end, 5.0));
    }

    #[test]
    fn test_histogram_constant_sample() {
        let bins = NumericSample::new(&[2.0, 2.0, 2.0]).histogram(5);
        assert_eq!(bins.len(), 1);
        assert_eq!(bins[0].count, 3);
    }
}
