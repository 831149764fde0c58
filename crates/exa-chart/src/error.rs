//! Error types for chart configuration.

use thiserror::Error;

/// Errors that can occur while configuring charts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChartError {
    /// No rows to chart.
    #[error("cannot configure charts for an empty dataset")]
    EmptyDataset,

    /// Rows exist but carry no columns.
    #[error("dataset has no columns")]
    NoColumns,
}

/// Result type for chart configuration.
pub type Result<T> = std::result::Result<T, ChartError>;
