//! Ordered step execution for preprocessing.
//!
//! # Standard Pipeline Order
//!
//! 1. **CleanStep** - Trim text, map null markers, drop empty rows
//! 2. **ImputeStep** - Fill nulls from column statistics
//! 3. **DeduplicateStep** - Drop repeated rows
//! 4. **NormalizeStep** - Coerce cells to their column type
//! 5. **OutlierStep** - Cap or remove outliers (opt-in)
//!
//! Validation runs after the steps and is not a step: it reads the data but
//! never changes it.

use exa_model::{Dataset, PreprocessOptions, PreprocessingStats};
use tracing::{debug, info};

use crate::error::{PipelineStage, PreprocessError, Result, StepError};
use crate::{clean, dedupe, impute, normalize, outliers};

/// A single preprocessing step.
pub trait PreprocessStep {
    /// Runs the step on the working dataset, updating the counters it owns.
    ///
    /// # Errors
    ///
    /// Returns a [`StepError`] for failures the step cannot recover from.
    fn execute(
        &self,
        data: &mut Dataset,
        options: &PreprocessOptions,
        stats: &mut PreprocessingStats,
    ) -> std::result::Result<(), StepError>;

    fn stage(&self) -> PipelineStage;

    /// Whether this step should be skipped for the given options.
    fn should_skip(&self, _options: &PreprocessOptions) -> bool {
        false
    }
}

/// An ordered list of preprocessing steps.
pub struct PreprocessPipeline {
    steps: Vec<Box<dyn PreprocessStep>>,
}

impl Default for PreprocessPipeline {
    fn default() -> Self {
        Self::new()
            .add_step(Box::new(CleanStep))
            .add_step(Box::new(ImputeStep))
            .add_step(Box::new(DeduplicateStep))
            .add_step(Box::new(NormalizeStep))
            .add_step(Box::new(OutlierStep))
    }
}

impl PreprocessPipeline {
    /// Create an empty pipeline.
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    #[must_use]
    pub fn add_step(mut self, step: Box<dyn PreprocessStep>) -> Self {
        self.steps.push(step);
        self
    }

    /// Runs every step in order. A failing step is reported with its stage.
    ///
    /// # Errors
    ///
    /// Returns [`PreprocessError::Stage`] naming the step that failed.
    pub fn execute(
        &self,
        data: &mut Dataset,
        options: &PreprocessOptions,
        stats: &mut PreprocessingStats,
    ) -> Result<()> {
        for step in &self.steps {
            let stage = step.stage();
            if step.should_skip(options) {
                debug!(%stage, "skipping step");
                continue;
            }
            step.execute(data, options, stats)
                .map_err(|e| PreprocessError::stage(stage, e))?;
            debug!(%stage, rows = data.len(), "step complete");
        }
        Ok(())
    }

    /// Stage names in execution order.
    pub fn stages(&self) -> Vec<PipelineStage> {
        self.steps.iter().map(|s| s.stage()).collect()
    }
}

pub struct CleanStep;

impl PreprocessStep for CleanStep {
    fn execute(
        &self,
        data: &mut Dataset,
        _options: &PreprocessOptions,
        _stats: &mut PreprocessingStats,
    ) -> std::result::Result<(), StepError> {
        let before = data.len();
        clean::clean_dataset(data);
        info!(rows = data.len(), dropped = before - data.len(), "cleaned rows");
        Ok(())
    }

    fn stage(&self) -> PipelineStage {
        PipelineStage::Clean
    }
}

pub struct ImputeStep;

impl PreprocessStep for ImputeStep {
    fn execute(
        &self,
        data: &mut Dataset,
        options: &PreprocessOptions,
        stats: &mut PreprocessingStats,
    ) -> std::result::Result<(), StepError> {
        let strategy = options.missing_value_strategy;
        stats.missing_values_handled = impute::impute_missing(data, strategy);
        info!(
            %strategy,
            filled = stats.missing_values_handled,
            "imputed missing values"
        );
        Ok(())
    }

    fn stage(&self) -> PipelineStage {
        PipelineStage::Impute
    }
}

pub struct DeduplicateStep;

impl PreprocessStep for DeduplicateStep {
    fn execute(
        &self,
        data: &mut Dataset,
        options: &PreprocessOptions,
        stats: &mut PreprocessingStats,
    ) -> std::result::Result<(), StepError> {
        let strategy = options.duplicate_strategy;
        stats.duplicates_removed =
            dedupe::remove_duplicates(data, strategy, options.key_column_threshold)?;
        info!(
            %strategy,
            removed = stats.duplicates_removed,
            "removed duplicate rows"
        );
        Ok(())
    }

    fn stage(&self) -> PipelineStage {
        PipelineStage::Deduplicate
    }
}

pub struct NormalizeStep;

impl PreprocessStep for NormalizeStep {
    fn execute(
        &self,
        data: &mut Dataset,
        _options: &PreprocessOptions,
        stats: &mut PreprocessingStats,
    ) -> std::result::Result<(), StepError> {
        stats.data_types_normalized = normalize::normalize_types(data);
        info!(changed = stats.data_types_normalized, "normalized cell types");
        Ok(())
    }

    fn stage(&self) -> PipelineStage {
        PipelineStage::Normalize
    }
}

pub struct OutlierStep;

impl PreprocessStep for OutlierStep {
    fn execute(
        &self,
        data: &mut Dataset,
        options: &PreprocessOptions,
        stats: &mut PreprocessingStats,
    ) -> std::result::Result<(), StepError> {
        stats.outliers_treated = outliers::treat_outliers(data, options);
        info!(
            strategy = %options.outlier_strategy,
            treated = stats.outliers_treated,
            "treated outliers"
        );
        Ok(())
    }

    fn stage(&self) -> PipelineStage {
        PipelineStage::Outliers
    }

    fn should_skip(&self, options: &PreprocessOptions) -> bool {
        !options.handle_outliers
    }
}
