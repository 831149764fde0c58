use thiserror::Error;

/// Errors raised while building or validating model values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    /// A strategy or chart name that is not part of the closed set.
    #[error("unknown {kind} '{value}'")]
    UnknownVariant { kind: &'static str, value: String },

    /// An option value outside its accepted range.
    #[error("invalid option {field}: {reason}")]
    InvalidOption { field: &'static str, reason: String },
}

pub type Result<T> = std::result::Result<T, ModelError>;
