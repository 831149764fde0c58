//! Row cleaning: null marker mapping, trimming, and empty row removal.

use exa_model::{Dataset, Row, Scalar};

/// Text values read as null after trimming.
pub const NULL_MARKERS: [&str; 7] = ["", "null", "NULL", "n/a", "N/A", "undefined", "#N/A"];

/// Cleans one cell.
///
/// Text is trimmed and null markers become null. Non-finite numbers become
/// null. Everything else is returned unchanged.
pub fn clean_value(value: Scalar) -> Scalar {
    match value {
        Scalar::Text(s) => {
            let trimmed = s.trim();
            if NULL_MARKERS.contains(&trimmed) {
                Scalar::Null
            } else if trimmed.len() == s.len() {
                Scalar::Text(s)
            } else {
                Scalar::text(trimmed)
            }
        }
        Scalar::Number(n) if !n.is_finite() => Scalar::Null,
        other => other,
    }
}

/// Cleans every row in place.
///
/// Each row ends up holding exactly the dataset's columns (absent keys are
/// materialized as null). Rows whose cells are all null are dropped.
pub fn clean_dataset(data: &mut Dataset) {
    let columns = data.columns.clone();
    let rows = std::mem::take(&mut data.rows);
    data.rows = rows
        .into_iter()
        .map(|row| clean_row(row, &columns))
        .filter(|row| row.values().any(|v| !v.is_null()))
        .collect();
}

fn clean_row(mut row: Row, columns: &[String]) -> Row {
    columns
        .iter()
        .map(|column| {
            let value = row.remove(column).unwrap_or_default();
            (column.clone(), clean_value(value))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset(rows: Vec<Vec<(&str, Scalar)>>) -> Dataset {
        Dataset::from_rows(
            rows.into_iter()
                .map(|pairs| {
                    pairs
                        .into_iter()
                        .map(|(k, v)| (k.to_string(), v))
                        .collect()
                })
                .collect(),
        )
    }

    #[test]
    fn test_clean_value_markers() {
        for marker in ["null", "NULL", " n/a ", "N/A", "undefined", "#N/A", "   "] {
            assert_eq!(clean_value(Scalar::text(marker)), Scalar::Null, "{marker}");
        }
        assert_eq!(clean_value(Scalar::text("  x ")), Scalar::text("x"));
        assert_eq!(clean_value(Scalar::text("Null")), Scalar::text("Null"));
        assert_eq!(clean_value(Scalar::Number(f64::NAN)), Scalar::Null);
        assert_eq!(clean_value(Scalar::Number(1.5)), Scalar::Number(1.5));
        assert_eq!(clean_value(Scalar::Bool(false)), Scalar::Bool(false));
    }

    #[test]
    fn test_clean_materializes_and_drops_empty_rows() {
        let mut data = dataset(vec![
            vec![("a", Scalar::text(" 1 "))],
            vec![("a", Scalar::text("N/A")), ("b", Scalar::Null)],
            vec![("b", Scalar::text("y"))],
        ]);
        clean_dataset(&mut data);

        assert_eq!(data.len(), 2);
        assert_eq!(data.rows[0].get("a"), Some(&Scalar::text("1")));
        assert_eq!(data.rows[0].get("b"), Some(&Scalar::Null));
        assert_eq!(data.rows[1].get("a"), Some(&Scalar::Null));
    }

    #[test]
    fn test_clean_is_idempotent() {
        let mut once = dataset(vec![
            vec![("a", Scalar::text(" x ")), ("b", Scalar::text("undefined"))],
            vec![("a", Scalar::Number(f64::INFINITY))],
        ]);
        clean_dataset(&mut once);
        let mut twice = once.clone();
        clean_dataset(&mut twice);
        assert_eq!(once, twice);
    }
}
