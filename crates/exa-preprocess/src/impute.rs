//! Missing value imputation.
//!
//! Each strategy maps to one fill handler. Handlers read the column profile
//! computed once on the cleaned data, so earlier fills never feed later ones.

use exa_analysis::analyze_column;
use exa_model::{ColumnProfile, Dataset, MissingValueStrategy, Scalar};
use tracing::debug;

/// Fill used for non-numeric columns without a mode.
pub const UNKNOWN_FILL: &str = "Unknown";

type FillHandler = fn(&ColumnProfile) -> Option<Scalar>;

fn handler(strategy: MissingValueStrategy) -> FillHandler {
    match strategy {
        MissingValueStrategy::Auto => auto_fill,
        // Interpolation fills with the mean until ordered interpolation exists.
        MissingValueStrategy::Mean | MissingValueStrategy::Interpolate => mean_fill,
        MissingValueStrategy::Median => median_fill,
        MissingValueStrategy::Mode => mode_fill,
    }
}

fn auto_fill(profile: &ColumnProfile) -> Option<Scalar> {
    if profile.is_numeric() {
        profile.median.map(Scalar::Number)
    } else {
        profile.mode.clone()
    }
}

fn mean_fill(profile: &ColumnProfile) -> Option<Scalar> {
    if profile.is_numeric() {
        profile.mean.map(Scalar::Number)
    } else {
        profile.mode.clone()
    }
}

fn median_fill(profile: &ColumnProfile) -> Option<Scalar> {
    if profile.is_numeric() {
        profile.median.map(Scalar::Number)
    } else {
        profile.mode.clone()
    }
}

fn mode_fill(profile: &ColumnProfile) -> Option<Scalar> {
    profile.mode.clone()
}

/// The value a strategy fills a column's missing cells with.
///
/// Falls back to `0` for numeric columns and `"Unknown"` otherwise when the
/// strategy has no statistic to offer.
pub fn fill_value(profile: &ColumnProfile, strategy: MissingValueStrategy) -> Scalar {
    handler(strategy)(profile).unwrap_or_else(|| {
        if profile.is_numeric() {
            Scalar::Number(0.0)
        } else {
            Scalar::text(UNKNOWN_FILL)
        }
    })
}

/// Fills every missing cell and returns how many were filled.
pub fn impute_missing(data: &mut Dataset, strategy: MissingValueStrategy) -> usize {
    let mut filled = 0;
    for column in data.columns.clone() {
        let values = data.column_values(&column);
        let missing = values.iter().filter(|v| v.is_missing()).count();
        if missing == 0 {
            continue;
        }

        let profile = analyze_column(&column, &values);
        let fill = fill_value(&profile, strategy);
        debug!(
            column = %column,
            missing,
            fill = %fill,
            "filling missing values"
        );
        for row in &mut data.rows {
            let cell = row.entry(column.clone()).or_default();
            if cell.is_missing() {
                *cell = fill.clone();
                filled += 1;
            }
        }
    }
    filled
}
