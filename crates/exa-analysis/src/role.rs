//! Column role inference from column names.
//!
//! Priority order (highest to lowest):
//! 1. Empty columns have no role
//! 2. Temporal keywords (date, year, month, ...)
//! 3. Measure keywords (amount, price, sales, ...)
//! 4. Dimension keywords (id, category, region, ...)
//! 5. Fallback by detected type

use exa_model::{ColumnRole, ColumnType};

const TEMPORAL_KEYWORDS: [&str; 11] = [
    "date",
    "time",
    "year",
    "month",
    "day",
    "week",
    "quarter",
    "period",
    "timestamp",
    "created",
    "updated",
];

const MEASURE_KEYWORDS: [&str; 20] = [
    "amount", "price", "cost", "revenue", "sales", "profit", "total", "sum", "count", "quantity",
    "qty", "value", "score", "rate", "salary", "income", "budget", "percent", "avg", "average",
];

const DIMENSION_KEYWORDS: [&str; 16] = [
    "id",
    "category",
    "type",
    "name",
    "region",
    "country",
    "city",
    "state",
    "status",
    "group",
    "class",
    "segment",
    "department",
    "product",
    "code",
    "gender",
];

/// Words that contain a measure keyword without being measures.
const MEASURE_EXCEPTIONS: [&str; 2] = ["country", "county"];

/// Infer the analytical role of a column.
///
/// Keywords match anywhere in the lowercased name, so `OrderDate`,
/// `customerid` and `birthyear` all hit. `country` and `county` are removed
/// before the measure check so they do not read as `count`.
pub fn infer_role(name: &str, column_type: ColumnType) -> ColumnRole {
    if column_type == ColumnType::Empty {
        return ColumnRole::None;
    }

    let lower = name.to_lowercase();
    if contains_any(&lower, &TEMPORAL_KEYWORDS[..]) {
        return ColumnRole::Temporal;
    }
    let measure_name = MEASURE_EXCEPTIONS
        .iter()
        .fold(lower.clone(), |acc, word| acc.replace(word, " "));
    if contains_any(&measure_name, &MEASURE_KEYWORDS[..]) {
        return ColumnRole::Measure;
    }
    if contains_any(&lower, &DIMENSION_KEYWORDS[..]) {
        return ColumnRole::Dimension;
    }

    match column_type {
        ColumnType::Numeric => ColumnRole::Measure,
        ColumnType::Date => ColumnRole::Temporal,
        ColumnType::Boolean | ColumnType::Categorical | ColumnType::Text => ColumnRole::Dimension,
        ColumnType::Empty => ColumnRole::None,
    }
}

fn contains_any(name: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| name.contains(k))
}
