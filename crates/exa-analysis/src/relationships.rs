//! Pairwise column relationship scoring.
//!
//! Columns are classed as temporal, numeric, or categorical. Every unordered
//! pair of columns, in header order, is scored by the combination of classes:
//!
//! | Pair                    | Strength                                   | Chart            |
//! |-------------------------|--------------------------------------------|------------------|
//! | numeric x numeric       | Pearson \|r\|                              | scatter / line   |
//! | categorical x numeric   | category spread plus group mean variance   | bar              |
//! | temporal x numeric      | fixed 0.8                                  | line             |
//!
//! Only relationships stronger than [`MIN_RELATIONSHIP_STRENGTH`] are kept.

use exa_model::{ChartType, ColumnProfile, Dataset, Relationship, RelationshipType};
use polars::prelude::*;
use tracing::debug;

use crate::parse::scalar_to_number;
use crate::stats::{NumericSample, pearson};

/// Relationships at or below this strength are discarded.
pub const MIN_RELATIONSHIP_STRENGTH: f64 = 0.3;

const TEMPORAL_STRENGTH: f64 = 0.8;

const GROUP_KEY: &str = "group";
const GROUP_VALUE: &str = "value";

/// How a column participates in relationships and chart patterns.
///
/// Temporal wins over numeric, so a numeric `year` column is temporal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnClass {
    Temporal,
    Numeric,
    Categorical,
    Other,
}

impl ColumnClass {
    pub fn of(profile: &ColumnProfile) -> Self {
        if profile.is_temporal() {
            Self::Temporal
        } else if profile.is_numeric() {
            Self::Numeric
        } else if profile.is_categorical() {
            Self::Categorical
        } else {
            Self::Other
        }
    }
}

/// Scores every column pair and returns the significant relationships,
/// strongest first. Equal strengths keep pair order.
pub fn analyze_relationships(dataset: &Dataset, profiles: &[ColumnProfile]) -> Vec<Relationship> {
    let classes: Vec<ColumnClass> = profiles.iter().map(ColumnClass::of).collect();
    let mut relationships = Vec::new();

    for i in 0..profiles.len() {
        for j in (i + 1)..profiles.len() {
            let (a, b) = (&profiles[i], &profiles[j]);
            let scored = match (classes[i], classes[j]) {
                (ColumnClass::Numeric, ColumnClass::Numeric) => correlation(dataset, a, b),
                (ColumnClass::Categorical, ColumnClass::Numeric) => group_comparison(dataset, a, b),
                (ColumnClass::Numeric, ColumnClass::Categorical) => group_comparison(dataset, b, a),
                (ColumnClass::Temporal, ColumnClass::Numeric) => Some(time_series(a, b)),
                (ColumnClass::Numeric, ColumnClass::Temporal) => Some(time_series(b, a)),
                _ => None,
            };
            if let Some(relationship) = scored {
                debug!(
                    column_a = %relationship.column_a,
                    column_b = %relationship.column_b,
                    strength = relationship.strength,
                    "scored relationship"
                );
                relationships.push(relationship);
            }
        }
    }

    relationships.retain(|r| r.strength > MIN_RELATIONSHIP_STRENGTH);
    relationships.sort_by(|x, y| y.strength.total_cmp(&x.strength));
    relationships
}

fn correlation(dataset: &Dataset, a: &ColumnProfile, b: &ColumnProfile) -> Option<Relationship> {
    let (xs, ys): (Vec<f64>, Vec<f64>) = dataset
        .rows
        .iter()
        .filter_map(|row| {
            let x = row.get(&a.name).and_then(scalar_to_number)?;
            let y = row.get(&b.name).and_then(scalar_to_number)?;
            Some((x, y))
        })
        .unzip();

    let r = pearson(&xs, &ys)?;
    let strength = r.abs();
    let recommendation = if strength > 0.7 {
        Some(ChartType::Scatter)
    } else if strength > 0.5 {
        Some(ChartType::Line)
    } else {
        None
    };

    Some(Relationship {
        column_a: a.name.clone(),
        column_b: b.name.clone(),
        relationship_type: RelationshipType::Correlation,
        strength,
        correlation: Some(r),
        recommendation,
    })
}

fn group_comparison(
    dataset: &Dataset,
    category: &ColumnProfile,
    measure: &ColumnProfile,
) -> Option<Relationship> {
    let (keys, values): (Vec<String>, Vec<f64>) = dataset
        .rows
        .iter()
        .filter_map(|row| {
            let key = row.get(&category.name).filter(|v| !v.is_missing())?;
            let value = row.get(&measure.name).and_then(scalar_to_number)?;
            Some((key.to_string(), value))
        })
        .unzip();
    if keys.is_empty() {
        return None;
    }

    let overall_mean = NumericSample::new(&values).mean()?;
    let group_means = match group_means(keys, values) {
        Ok(means) => means,
        Err(error) => {
            debug!(column = %category.name, %error, "group means failed");
            return None;
        }
    };
    let spread = group_means.var(0)?;

    let mut strength = (group_means.len() as f64 / 10.0).min(1.0) * 0.5;
    if spread > 0.1 * overall_mean.abs() {
        strength += 0.3;
    }

    Some(Relationship {
        column_a: category.name.clone(),
        column_b: measure.name.clone(),
        relationship_type: RelationshipType::GroupComparison,
        strength,
        correlation: None,
        recommendation: (strength > 0.5).then_some(ChartType::Bar),
    })
}

/// Mean of `values` per distinct key, one entry per group.
fn group_means(keys: Vec<String>, values: Vec<f64>) -> PolarsResult<Float64Chunked> {
    let means = df!(GROUP_KEY => keys, GROUP_VALUE => values)?
        .lazy()
        .group_by_stable([col(GROUP_KEY)])
        .agg([col(GROUP_VALUE).mean()])
        .collect()?;
    Ok(means
        .column(GROUP_VALUE)?
        .as_materialized_series()
        .f64()?
        .clone())
}

fn time_series(time: &ColumnProfile, measure: &ColumnProfile) -> Relationship {
    Relationship {
        column_a: time.name.clone(),
        column_b: measure.name.clone(),
        relationship_type: RelationshipType::TimeSeries,
        strength: TEMPORAL_STRENGTH,
        correlation: None,
        recommendation: Some(ChartType::Line),
    }
}

#[cfg(test)]
mod tests {
    use exa_model::{Row, Scalar};

    use super::*;
    use crate::column::analyze_dataset;

    fn dataset(columns: &[&str], rows: &[&[Scalar]]) -> Dataset {
        let rows = rows
            .iter()
            .map(|cells| {
                columns
                    .iter()
                    .zip(cells.iter())
                    .map(|(c, v)| ((*c).to_string(), v.clone()))
                    .collect::<Row>()
            })
            .collect();
        Dataset::new(columns.iter().map(|c| (*c).to_string()).collect(), rows)
    }

    #[test]
    fn test_group_comparison_with_spread() {
        let n = Scalar::Number;
        let t = Scalar::text;
        let ds = dataset(
            &["region", "sales"],
            &[
                &[t("north"), n(10.0)],
                &[t("south"), n(50.0)],
                &[t("north"), n(12.0)],
                &[t("south"), n(48.0)],
                &[t("north"), n(11.0)],
                &[t("south"), n(52.0)],
            ],
        );
        let profiles = analyze_dataset(&ds);
        let rels = analyze_relationships(&ds, &profiles);
        assert_eq!(rels.len(), 1);
        let rel = &rels[0];
        assert_eq!(rel.column_a, "region");
        assert_eq!(rel.relationship_type, RelationshipType::GroupComparison);
        // 2 groups: 0.2 * 0.5 + 0.3
        assert!((rel.strength - 0.4).abs() < 1e-12);
        assert_eq!(rel.recommendation, None);
    }

    #[test]
    fn test_time_series_puts_time_first() {
        let n = Scalar::Number;
        let t = Scalar::text;
        let ds = dataset(
            &["revenue", "order_date"],
            &[
                &[n(1.0), t("2024-01-01")],
                &[n(2.0), t("2024-01-02")],
                &[n(3.0), t("2024-01-03")],
            ],
        );
        let profiles = analyze_dataset(&ds);
        let rels = analyze_relationships(&ds, &profiles);
        assert_eq!(rels.len(), 1);
        assert_eq!(rels[0].column_a, "order_date");
        assert_eq!(rels[0].column_b, "revenue");
        assert_eq!(rels[0].recommendation, Some(ChartType::Line));
    }

    #[test]
    fn test_weak_correlation_dropped() {
        let n = Scalar::Number;
        let ds = dataset(
            &["a", "b"],
            &[
                &[n(1.0), n(3.0)],
                &[n(2.0), n(1.0)],
                &[n(3.0), n(4.0)],
                &[n(4.0), n(1.0)],
                &[n(5.0), n(3.0)],
            ],
        );
        let profiles = analyze_dataset(&ds);
        assert!(analyze_relationships(&ds, &profiles).is_empty());
    }
}
