//! Error types for the preprocessing pipeline.

use std::fmt;

use exa_model::ModelError;
use thiserror::Error;

/// Preprocessing stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PipelineStage {
    Clean,
    Impute,
    Deduplicate,
    Normalize,
    Outliers,
}

impl PipelineStage {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Clean => "clean",
            Self::Impute => "impute",
            Self::Deduplicate => "deduplicate",
            Self::Normalize => "normalize",
            Self::Outliers => "outliers",
        }
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure raised by a single step before it is tagged with its stage.
pub type StepError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur during preprocessing.
#[derive(Debug, Error)]
pub enum PreprocessError {
    /// Options rejected at the entry point.
    #[error("invalid preprocessing options: {0}")]
    InvalidOptions(#[from] ModelError),

    /// A stage failed unexpectedly.
    #[error("preprocessing failed during {stage}: {message}")]
    Stage {
        stage: PipelineStage,
        message: String,
    },
}

impl PreprocessError {
    pub fn stage(stage: PipelineStage, error: impl fmt::Display) -> Self {
        Self::Stage {
            stage,
            message: error.to_string(),
        }
    }
}

/// Result type for preprocessing operations.
pub type Result<T> = std::result::Result<T, PreprocessError>;
