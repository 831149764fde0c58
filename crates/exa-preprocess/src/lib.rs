//! Data preprocessing for the Excel Analytics pipeline.
//!
//! Raw spreadsheet rows go in; cleaned, typed rows come out with a validation
//! report and a quality score.
//!
//! # Example
//!
//! ```ignore
//! use exa_model::{MissingValueStrategy, PreprocessOptions};
//! use exa_preprocess::preprocess;
//!
//! let options = PreprocessOptions::default()
//!     .with_missing_value_strategy(MissingValueStrategy::Median);
//! let result = preprocess(rows, &options)?;
//! println!("quality score: {}", result.quality.score);
//! ```
//!
//! # Design Principles
//!
//! - **Working copy**: the caller's rows are consumed; nothing is shared
//! - **Local recovery**: bad cells fall back to safe values instead of failing
//! - **Single validation point**: options are checked once, at the entry point

pub mod clean;
pub mod dedupe;
mod error;
pub mod impute;
pub mod normalize;
pub mod outliers;
pub mod pipeline;
pub mod validate;

use exa_model::{Dataset, PreprocessOptions, PreprocessingResult, PreprocessingStats, Row};
use tracing::{info, info_span};

pub use error::{PipelineStage, PreprocessError, Result, StepError};
pub use pipeline::{PreprocessPipeline, PreprocessStep};

/// Preprocesses rows whose header order is the union of their keys.
///
/// A [`Row`] keeps its keys sorted, so columns come out in alphabetical
/// order. Call [`preprocess_dataset`] when the file's column order matters.
///
/// # Errors
///
/// Returns [`PreprocessError::InvalidOptions`] for rejected options and
/// [`PreprocessError::Stage`] when a stage fails unexpectedly.
pub fn preprocess(rows: Vec<Row>, options: &PreprocessOptions) -> Result<PreprocessingResult> {
    preprocess_dataset(Dataset::from_rows(rows), options)
}

/// Preprocesses a dataset with an explicit header order.
///
/// # Errors
///
/// See [`preprocess`].
pub fn preprocess_dataset(
    mut data: Dataset,
    options: &PreprocessOptions,
) -> Result<PreprocessingResult> {
    let original_count = data.len();
    let span = info_span!("preprocess", rows = original_count, columns = data.column_count());
    let _guard = span.enter();

    options.validate()?;

    let mut stats = PreprocessingStats::default();
    PreprocessPipeline::default().execute(&mut data, options, &mut stats)?;
    stats.rows_processed = data.len();

    let (validation, quality) = validate::validate(&data);
    info!(
        original = original_count,
        processed = data.len(),
        score = quality.score,
        consistent = validation.is_consistent,
        "preprocessing complete"
    );

    Ok(PreprocessingResult {
        original_count,
        processed_count: data.len(),
        stats,
        validation,
        quality,
        columns: data.columns,
        data: data.rows,
    })
}

#[cfg(test)]
mod tests {
    use exa_model::{ModelError, Scalar};

    use super::*;

    #[test]
    fn test_invalid_options_rejected() {
        let options = PreprocessOptions {
            iqr_multiplier: -1.0,
            ..PreprocessOptions::default()
        };
        let err = preprocess(Vec::new(), &options).unwrap_err();
        assert!(matches!(
            err,
            PreprocessError::InvalidOptions(ModelError::InvalidOption { .. })
        ));
    }

    #[test]
    fn test_empty_input_is_not_an_error() {
        let result = preprocess(Vec::new(), &PreprocessOptions::default()).unwrap();
        assert_eq!(result.processed_count, 0);
        assert!(!result.validation.is_consistent);
        assert_eq!(result.quality.score, 0.0);
    }

    #[test]
    fn test_all_null_rows_are_dropped() {
        let rows = vec![
            Row::from([("a".to_string(), Scalar::text("N/A"))]),
            Row::from([("a".to_string(), Scalar::Null)]),
        ];
        let result = preprocess(rows, &PreprocessOptions::default()).unwrap();
        assert_eq!(result.original_count, 2);
        assert_eq!(result.processed_count, 0);
        assert_eq!(result.columns, vec!["a"]);
    }
}
