//! Column type detection and profiling.
//!
//! Detection runs over a sample of the non-missing values:
//! 1. Count numbers (prefix parsed, dates excluded), date strings, and boolean tokens
//! 2. Pick the best candidate in the order numeric, date, boolean (a later
//!    candidate must have a strictly higher ratio to replace an earlier one)
//! 3. The best candidate wins above [`TYPE_MATCH_THRESHOLD`]
//! 4. Otherwise low-cardinality columns are categorical, the rest text

use std::collections::HashMap;

use exa_model::{CategoryCount, ColumnProfile, ColumnType, Dataset, Scalar};
use tracing::debug;

use crate::parse::{is_date_value, is_numeric_value, parse_boolean, scalar_to_number};
use crate::role::infer_role;
use crate::stats::NumericSample;

/// Number of non-missing values inspected for type detection.
pub const TYPE_SAMPLE_SIZE: usize = 1000;

/// Share of sampled values that must match a type for it to be chosen.
pub const TYPE_MATCH_THRESHOLD: f64 = 0.7;

/// Uniqueness ratio below which an untyped column is categorical.
pub const CATEGORICAL_UNIQUE_RATIO: f64 = 0.5;

const TOP_CATEGORY_LIMIT: usize = 10;

/// Profiles one column from its cells.
///
/// Nulls and blank text count toward completeness but are not sampled.
/// A column without any usable value is [`ColumnType::Empty`] with quality 0.
pub fn analyze_column(name: &str, values: &[Scalar]) -> ColumnProfile {
    let total = values.len();
    let present: Vec<&Scalar> = values.iter().filter(|v| !v.is_missing()).collect();
    if present.is_empty() {
        debug!(column = name, total, "column has no values");
        return ColumnProfile::empty(name, total);
    }

    let counts = value_counts(&present);
    let unique_count = counts.len();
    let unique_ratio = unique_count as f64 / present.len() as f64;
    let completeness = present.len() as f64 / total as f64;
    let quality = (completeness + (2.0 * unique_ratio).min(1.0)) / 2.0;

    let column_type = detect_type(&present, unique_ratio);
    let role = infer_role(name, column_type);
    debug!(
        column = name,
        column_type = %column_type,
        role = %role,
        unique_ratio,
        "detected column type"
    );

    let mut profile = ColumnProfile {
        name: name.to_string(),
        column_type,
        role,
        quality,
        total_count: total,
        non_null_count: present.len(),
        unique_count,
        unique_ratio,
        completeness,
        mean: None,
        median: None,
        min: None,
        max: None,
        std_dev: None,
        mode: mode(&counts),
        top_categories: Vec::new(),
    };

    match column_type {
        ColumnType::Numeric => {
            let numbers: Vec<f64> = present
                .iter()
                .filter_map(|v| scalar_to_number(v))
                .collect();
            let sample = NumericSample::new(&numbers);
            profile.mean = sample.mean();
            profile.median = sample.median();
            profile.std_dev = sample.std_dev();
            if let Some((min, max)) = sample.min_max() {
                profile.min = Some(min);
                profile.max = Some(max);
            }
        }
        ColumnType::Categorical => {
            profile.top_categories = top_categories(&counts);
        }
        _ => {}
    }

    profile
}

/// Profiles every column of a dataset in header order.
pub fn analyze_dataset(dataset: &Dataset) -> Vec<ColumnProfile> {
    dataset
        .columns
        .iter()
        .map(|name| analyze_column(name, &dataset.column_values(name)))
        .collect()
}

fn detect_type(present: &[&Scalar], unique_ratio: f64) -> ColumnType {
    let sample = &present[..present.len().min(TYPE_SAMPLE_SIZE)];
    let n = sample.len() as f64;

    let ratio = |matches: fn(&Scalar) -> bool| {
        sample.iter().filter(|v| matches(v)).count() as f64 / n
    };
    let candidates = [
        (ColumnType::Numeric, ratio(is_numeric_value)),
        (ColumnType::Date, ratio(is_date_value)),
        (ColumnType::Boolean, ratio(|v| parse_boolean(v).is_some())),
    ];

    let mut best = candidates[0];
    for candidate in &candidates[1..] {
        if candidate.1 > best.1 {
            best = *candidate;
        }
    }

    if best.1 > TYPE_MATCH_THRESHOLD {
        best.0
    } else if unique_ratio < CATEGORICAL_UNIQUE_RATIO {
        ColumnType::Categorical
    } else {
        ColumnType::Text
    }
}

/// Distinct values keyed by display string, in first-seen order.
fn value_counts<'a>(present: &[&'a Scalar]) -> Vec<(&'a Scalar, usize)> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut counts: Vec<(&Scalar, usize)> = Vec::new();
    for value in present {
        let key = value.to_string();
        match index.get(&key) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(key, counts.len());
                counts.push((value, 1));
            }
        }
    }
    counts
}

fn mode(counts: &[(&Scalar, usize)]) -> Option<Scalar> {
    let max = counts.iter().map(|(_, c)| *c).max()?;
    counts
        .iter()
        .find(|(_, c)| *c == max)
        .map(|(v, _)| (*v).clone())
}

fn top_categories(counts: &[(&Scalar, usize)]) -> Vec<CategoryCount> {
    let mut ranked: Vec<CategoryCount> = counts
        .iter()
        .map(|(v, count)| CategoryCount {
            value: v.to_string(),
            count: *count,
        })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked.truncate(TOP_CATEGORY_LIMIT);
    ranked
}

#[cfg(test)]
mod tests {
    use exa_model::ColumnRole;

    use super::*;

    fn texts(values: &[&str]) -> Vec<Scalar> {
        values.iter().map(|v| Scalar::text(*v)).collect()
    }

    #[test]
    fn test_numeric_column() {
        let profile = analyze_column("price", &texts(&["1", "2", "3", "4"]));
        assert_eq!(profile.column_type, ColumnType::Numeric);
        assert_eq!(profile.role, ColumnRole::Measure);
        assert_eq!(profile.mean, Some(2.5));
        assert_eq!(profile.median, Some(2.5));
        assert_eq!(profile.min, Some(1.0));
        assert_eq!(profile.max, Some(4.0));
        assert_eq!(profile.quality, 1.0);
    }

    #[test]
    fn test_unit_suffixed_numbers_are_numeric() {
        let profile = analyze_column("weight", &texts(&["12kg", "15kg", "20kg", "7kg"]));
        assert_eq!(profile.column_type, ColumnType::Numeric);
        assert_eq!(profile.mean, Some(13.5));
        assert_eq!(profile.min, Some(7.0));
    }

    #[test]
    fn test_empty_column() {
        let profile = analyze_column("notes", &[Scalar::Null, Scalar::text("  ")]);
        assert_eq!(profile.column_type, ColumnType::Empty);
        assert_eq!(profile.role, ColumnRole::None);
        assert_eq!(profile.quality, 0.0);
        assert_eq!(profile.total_count, 2);

        let none = analyze_column("notes", &[]);
        assert_eq!(none.column_type, ColumnType::Empty);
        assert_eq!(none.quality, 0.0);
    }

    #[test]
    fn test_date_column() {
        let profile = analyze_column(
            "when",
            &texts(&["2024-01-01", "2024-02-01", "03/15/2024", "2024-04-01"]),
        );
        assert_eq!(profile.column_type, ColumnType::Date);
        assert_eq!(profile.role, ColumnRole::Temporal);
    }

    #[test]
    fn test_numeric_beats_boolean_on_tie() {
        // "1" and "0" are both numbers and boolean tokens
        let profile = analyze_column("flag", &texts(&["1", "0", "1", "0"]));
        assert_eq!(profile.column_type, ColumnType::Numeric);
    }

    #[test]
    fn test_boolean_column() {
        let profile = analyze_column("active", &texts(&["yes", "no", "Yes", "off"]));
        assert_eq!(profile.column_type, ColumnType::Boolean);
        assert_eq!(profile.role, ColumnRole::Dimension);
    }

    #[test]
    fn test_categorical_and_text_fallback() {
        let categorical = analyze_column("region", &texts(&["x", "y", "x", "y", "x"]));
        assert_eq!(categorical.column_type, ColumnType::Categorical);
        assert_eq!(categorical.top_categories[0].value, "x");
        assert_eq!(categorical.top_categories[0].count, 3);
        assert_eq!(categorical.mode, Some(Scalar::text("x")));

        let text = analyze_column("comment", &texts(&["alpha", "beta", "gamma"]));
        assert_eq!(text.column_type, ColumnType::Text);
        assert!(text.top_categories.is_empty());
    }

    #[test]
    fn test_quality_counts_missing() {
        let values = vec![
            Scalar::text("a"),
            Scalar::text("a"),
            Scalar::Null,
            Scalar::text("a"),
        ];
        let profile = analyze_column("k", &values);
        assert_eq!(profile.completeness, 0.75);
        assert_eq!(profile.unique_count, 1);
        // (0.75 + min(2 * 1/3, 1)) / 2
        assert!((profile.quality - (0.75 + 2.0 / 3.0) / 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_mode_first_occurrence_wins() {
        let profile = analyze_column("k", &texts(&["b", "a", "a", "b"]));
        assert_eq!(profile.mode, Some(Scalar::text("b")));
    }

    #[test]
    fn test_analyze_dataset_follows_header_order() {
        let rows = vec![
            [("b".to_string(), Scalar::Number(1.0))].into_iter().collect(),
            [("a".to_string(), Scalar::text("x"))].into_iter().collect(),
        ];
        let dataset = Dataset::new(vec!["b".to_string(), "a".to_string()], rows);
        let profiles = analyze_dataset(&dataset);
        let names: Vec<_> = profiles.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a"]);
        assert_eq!(profiles[0].completeness, 0.5);
    }
}
