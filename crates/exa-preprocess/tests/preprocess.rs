use exa_model::{
    Dataset, DuplicateStrategy, MissingValueStrategy, OutlierStrategy, PreprocessOptions, Row,
    Scalar,
};
use exa_preprocess::{dedupe, normalize, preprocess, preprocess_dataset};
use proptest::prelude::*;

fn row(pairs: &[(&str, Scalar)]) -> Row {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), v.clone()))
        .collect()
}

#[test]
fn median_imputation_and_strict_dedup() {
    let rows = vec![
        row(&[("A", Scalar::text("1")), ("B", Scalar::text("x"))]),
        row(&[("A", Scalar::text("2")), ("B", Scalar::text("y"))]),
        row(&[("A", Scalar::Null), ("B", Scalar::text("x"))]),
        row(&[("A", Scalar::text("2")), ("B", Scalar::text("y"))]),
    ];
    let options = PreprocessOptions::default()
        .with_missing_value_strategy(MissingValueStrategy::Median)
        .with_duplicate_strategy(DuplicateStrategy::Strict);

    let result = preprocess(rows, &options).expect("preprocess");

    assert_eq!(result.original_count, 4);
    assert_eq!(result.processed_count, 3);
    assert_eq!(result.data[2].get("A"), Some(&Scalar::Number(2.0)));
    assert!(result.validation.is_consistent);
    insta::assert_json_snapshot!(result.stats, @r#"
    {
      "rowsProcessed": 3,
      "missingValuesHandled": 1,
      "duplicatesRemoved": 1,
      "dataTypesNormalized": 2,
      "outliersTreated": 0
    }
    "#);
}

#[test]
fn formatted_numbers_and_dates_are_normalized() {
    let cells = [
        ("01/15/2024", "$1,200"),
        ("2024-02-01", "15"),
        ("Mar 3, 2024", " 30 "),
        ("2024-04-01", "45"),
    ];
    let rows = cells
        .iter()
        .map(|(date, amount)| {
            row(&[
                ("order_date", Scalar::text(*date)),
                ("amount", Scalar::text(*amount)),
            ])
        })
        .collect();
    let data = Dataset::new(vec!["order_date".to_string(), "amount".to_string()], rows);

    let result = preprocess_dataset(data, &PreprocessOptions::default()).expect("preprocess");

    assert_eq!(result.columns, vec!["order_date", "amount"]);
    assert_eq!(
        result.data[0].get("order_date"),
        Some(&Scalar::text("2024-01-15T00:00:00.000Z"))
    );
    assert_eq!(
        result.data[2].get("order_date"),
        Some(&Scalar::text("2024-03-03T00:00:00.000Z"))
    );
    assert_eq!(result.data[0].get("amount"), Some(&Scalar::Number(1200.0)));
    assert_eq!(result.data[2].get("amount"), Some(&Scalar::Number(30.0)));
    assert_eq!(result.stats.data_types_normalized, 8);
    assert_eq!(result.quality.score, 100.0);
}

#[test]
fn outlier_removal_reduces_processed_count() {
    let rows: Vec<Row> = [10.0, 11.0, 12.0, 13.0, 12.5, 11.5, 400.0]
        .iter()
        .enumerate()
        .map(|(i, v)| {
            row(&[
                ("id", Scalar::Number(i as f64)),
                ("value", Scalar::Number(*v)),
            ])
        })
        .collect();
    let options = PreprocessOptions::default().with_outliers(OutlierStrategy::Remove);

    let result = preprocess(rows, &options).expect("preprocess");

    assert_eq!(result.stats.outliers_treated, 1);
    assert_eq!(result.processed_count, 6);
    assert!(result.data.iter().all(|r| r.get("value") != Some(&Scalar::Number(400.0))));
}

fn cell() -> impl Strategy<Value = Scalar> {
    prop_oneof![
        Just(Scalar::Null),
        Just(Scalar::text("N/A")),
        Just(Scalar::text("  ")),
        any::<bool>().prop_map(Scalar::Bool),
        (-1000i32..1000).prop_map(|n| Scalar::Number(f64::from(n))),
        (-50i32..50).prop_map(|n| Scalar::text(n.to_string())),
        "[a-c]{1,2}".prop_map(Scalar::text),
        Just(Scalar::text("2024-03-01")),
    ]
}

fn rows() -> impl Strategy<Value = Vec<Row>> {
    prop::collection::vec((cell(), cell(), cell()), 0..25).prop_map(|cells| {
        cells
            .into_iter()
            .map(|(a, b, c)| row(&[("a", a), ("b", b), ("c", c)]))
            .collect()
    })
}

fn strategies() -> impl Strategy<Value = PreprocessOptions> {
    (
        prop::sample::select(MissingValueStrategy::ALL.to_vec()),
        prop::sample::select(DuplicateStrategy::ALL.to_vec()),
    )
        .prop_map(|(missing, duplicates)| {
            PreprocessOptions::default()
                .with_missing_value_strategy(missing)
                .with_duplicate_strategy(duplicates)
        })
}

proptest! {
    #[test]
    fn output_has_no_missing_values(rows in rows(), options in strategies()) {
        let result = preprocess(rows, &options).expect("preprocess");
        prop_assert!(result.processed_count <= result.original_count);
        for row in &result.data {
            for column in &result.columns {
                let value = row.get(column).expect("materialized cell");
                prop_assert!(!value.is_null(), "null left in {}", column);
            }
        }
    }

    #[test]
    fn score_is_bounded_and_zero_only_when_empty(rows in rows(), options in strategies()) {
        let result = preprocess(rows, &options).expect("preprocess");
        prop_assert!((0.0..=100.0).contains(&result.quality.score));
        prop_assert_eq!(result.quality.score == 0.0, result.processed_count == 0);
    }

    #[test]
    fn strict_dedup_is_a_fixed_point(rows in rows()) {
        let mut data = Dataset::from_rows(rows);
        dedupe::remove_duplicates(&mut data, DuplicateStrategy::Strict, 0.9).expect("dedupe");
        let once = data.clone();
        let removed = dedupe::remove_duplicates(&mut data, DuplicateStrategy::Strict, 0.9)
            .expect("dedupe");
        prop_assert_eq!(removed, 0);
        prop_assert_eq!(once, data);
    }

    #[test]
    fn normalization_is_idempotent(rows in rows()) {
        let mut data = Dataset::from_rows(rows);
        normalize::normalize_types(&mut data);
        let once = data.clone();
        normalize::normalize_types(&mut data);
        prop_assert_eq!(once, data);
    }
}
