//! Type normalization: coerce each cell to its column's detected type.
//!
//! Coercion never fails. A cell that cannot be read as the column type falls
//! back to a safe value (0 for numbers, `false` for booleans) or, for dates,
//! keeps its original value.

use exa_analysis::analyze_dataset;
use exa_analysis::parse::{format_iso_datetime, parse_boolean, parse_date, parse_formatted_number};
use exa_model::{ColumnType, Dataset, Scalar};
use tracing::{debug, trace};

/// Coerces a cell to `column_type`.
pub fn coerce(value: &Scalar, column_type: ColumnType) -> Scalar {
    match column_type {
        ColumnType::Numeric => Scalar::Number(coerce_number(value)),
        ColumnType::Date => coerce_date(value),
        ColumnType::Boolean => Scalar::Bool(parse_boolean(value).unwrap_or_else(|| {
            trace!(value = %value, "unrecognized boolean token");
            false
        })),
        ColumnType::Categorical | ColumnType::Text => Scalar::Text(value.to_string()),
        ColumnType::Empty => value.clone(),
    }
}

fn coerce_number(value: &Scalar) -> f64 {
    let parsed = match value {
        Scalar::Number(n) => Some(*n).filter(|n| n.is_finite()),
        Scalar::Text(s) => parse_formatted_number(s),
        Scalar::Null | Scalar::Bool(_) => None,
    };
    parsed.unwrap_or_else(|| {
        trace!(value = %value, "not a number, using 0");
        0.0
    })
}

fn coerce_date(value: &Scalar) -> Scalar {
    match value.as_text().and_then(parse_date) {
        Some(dt) => Scalar::Text(format_iso_datetime(dt)),
        None => {
            trace!(value = %value, "unparseable date kept as is");
            value.clone()
        }
    }
}

/// Normalizes every cell and returns how many cells changed.
///
/// Columns are profiled on the current data first. Running this twice gives
/// the same data as running it once.
pub fn normalize_types(data: &mut Dataset) -> usize {
    let profiles = analyze_dataset(data);
    let mut changed = 0;

    for profile in &profiles {
        debug!(column = %profile.name, column_type = %profile.column_type, "normalizing column");
        for row in &mut data.rows {
            let cell = row.entry(profile.name.clone()).or_default();
            let coerced = coerce(cell, profile.column_type);
            if coerced != *cell {
                *cell = coerced;
                changed += 1;
            }
        }
    }
    changed
}
