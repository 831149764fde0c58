use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use exa_chart::configure_dataset;
use exa_cli::config::{PreprocessOverrides, merge_preferences};
use exa_ingest::load_dataset;
use exa_model::{
    ChartConfigurationResult, ColumnProfile, Dataset, PipelineConfig, PreprocessingResult,
};
use exa_preprocess::preprocess_dataset;
use serde::Serialize;
use tracing::{info, info_span};

use crate::cli::{ChartArgs, PreprocessArgs, ProfileArgs};

fn load(path: &Path) -> Result<Dataset> {
    load_dataset(path).with_context(|| format!("load dataset {}", path.display()))
}

pub fn run_profile(args: &ProfileArgs) -> Result<Vec<ColumnProfile>> {
    let _guard = info_span!("profile", file = %args.file.display()).entered();
    let dataset = load(&args.file)?;
    Ok(exa_analysis::analyze_dataset(&dataset))
}

pub fn run_preprocess(
    args: &PreprocessArgs,
    config: &PipelineConfig,
) -> Result<PreprocessingResult> {
    let overrides = PreprocessOverrides {
        missing_values: args.missing_values,
        duplicates: args.duplicates,
        handle_outliers: args.handle_outliers,
        outlier_strategy: args.outlier_strategy,
    };
    let options = overrides.apply(config.preprocess.clone());
    let dataset = load(&args.file)?;
    let result = preprocess_dataset(dataset, &options)
        .with_context(|| format!("preprocess {}", args.file.display()))?;
    if let Some(path) = &args.output {
        write_json(path, &result)?;
    }
    Ok(result)
}

pub fn run_chart(args: &ChartArgs, config: &PipelineConfig) -> Result<ChartConfigurationResult> {
    let prefs = merge_preferences(config.chart.clone(), &args.prefer, &args.avoid);
    let mut dataset = load(&args.file)?;
    if !args.skip_preprocess {
        dataset = preprocess_dataset(dataset, &config.preprocess)
            .with_context(|| format!("preprocess {}", args.file.display()))?
            .into_dataset();
    }
    let result = configure_dataset(&dataset, &prefs)
        .with_context(|| format!("configure charts for {}", args.file.display()))?;
    if let Some(path) = &args.output {
        write_json(path, &result)?;
    }
    Ok(result)
}

/// Writes a value as pretty JSON.
fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)
        .with_context(|| format!("write JSON to {}", path.display()))?;
    writer
        .write_all(b"\n")
        .and_then(|()| writer.flush())
        .with_context(|| format!("write JSON to {}", path.display()))?;
    info!(path = %path.display(), "wrote result");
    Ok(())
}

/// Prints a value as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("serialize result")?;
    println!("{json}");
    Ok(())
}
