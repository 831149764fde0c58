//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use exa_model::{ChartType, DuplicateStrategy, MissingValueStrategy, OutlierStrategy};

#[derive(Parser)]
#[command(
    name = "excel-analytics",
    version,
    about = "Profile, clean, and chart tabular data",
    long_about = "Profile spreadsheet exports, clean them, and recommend charts.\n\n\
                  Reads CSV files with a header row or JSON arrays of objects."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// JSON pipeline configuration (preprocess options and chart preferences).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Detect column types, roles, and quality.
    Profile(ProfileArgs),

    /// Clean, impute, deduplicate, and validate a dataset.
    Preprocess(PreprocessArgs),

    /// Recommend and configure charts for a dataset.
    Chart(ChartArgs),
}

#[derive(Args)]
pub struct ProfileArgs {
    /// Input file (.csv or .json).
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Print JSON instead of a table.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Args)]
pub struct PreprocessArgs {
    /// Input file (.csv or .json).
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Missing value strategy (auto, mean, median, mode, interpolate).
    #[arg(long = "missing-values", value_name = "STRATEGY")]
    pub missing_values: Option<MissingValueStrategy>,

    /// Duplicate detection strategy (strict, key_columns, fuzzy).
    #[arg(long = "duplicates", value_name = "STRATEGY")]
    pub duplicates: Option<DuplicateStrategy>,

    /// Treat numeric outliers.
    #[arg(long = "handle-outliers")]
    pub handle_outliers: bool,

    /// Outlier strategy (iqr, std, cap, remove). Implies --handle-outliers.
    #[arg(long = "outlier-strategy", value_name = "STRATEGY")]
    pub outlier_strategy: Option<OutlierStrategy>,

    /// Write the full result as JSON to this path.
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Print JSON instead of tables.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Args)]
pub struct ChartArgs {
    /// Input file (.csv or .json).
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Chart type to favor (repeatable).
    #[arg(long = "prefer", value_name = "TYPE")]
    pub prefer: Vec<ChartType>,

    /// Chart type to penalize (repeatable).
    #[arg(long = "avoid", value_name = "TYPE")]
    pub avoid: Vec<ChartType>,

    /// Configure charts on the raw rows without preprocessing.
    #[arg(long = "skip-preprocess")]
    pub skip_preprocess: bool,

    /// Write the full result as JSON to this path.
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Print JSON instead of tables.
    #[arg(long = "json")]
    pub json: bool,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
