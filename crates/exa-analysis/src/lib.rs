//! Column analysis for the Excel Analytics pipeline.
//!
//! # Overview
//!
//! This crate provides:
//! - **Column profiling**: type detection, role inference, and quality scoring
//! - **Value parsing**: lenient numbers, date formats, and boolean tokens
//! - **Statistics**: Polars-backed spread, quantiles, correlation, histograms
//! - **Relationships**: pairwise column scoring that suggests chart axes
//! - **Distributions**: per-column summaries of numeric data
//!
//! # Design Principles
//!
//! - **Snapshot only**: every profile is computed from the rows passed in
//! - **Never fails**: unusable input degrades to empty profiles and `None`

pub mod column;
pub mod distribution;
pub mod parse;
pub mod relationships;
pub mod role;
pub mod stats;

pub use column::{analyze_column, analyze_dataset};
pub use distribution::{describe, describe_numeric_columns};
pub use relationships::{ColumnClass, analyze_relationships};
pub use role::infer_role;
pub use stats::NumericSample;
