//! Excel Analytics CLI.

use std::io::{self, IsTerminal};

use clap::{ColorChoice, Parser};
use exa_cli::config::load_config;
use exa_cli::logging::{LogConfig, LogFormat, init_logging};
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;
mod summary;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{print_json, run_chart, run_preprocess, run_profile};
use crate::summary::{print_chart, print_preprocess, print_profile};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match run(&cli) {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

fn run(cli: &Cli) -> anyhow::Result<i32> {
    let config = load_config(cli.config.as_deref())?;
    match &cli.command {
        Command::Profile(args) => {
            let profiles = run_profile(args)?;
            if args.json {
                print_json(&profiles)?;
            } else {
                print_profile(&profiles);
            }
            Ok(0)
        }
        Command::Preprocess(args) => {
            let result = run_preprocess(args, &config)?;
            if args.json {
                print_json(&result)?;
            } else {
                print_preprocess(&result);
            }
            Ok(if result.validation.is_consistent { 0 } else { 1 })
        }
        Command::Chart(args) => {
            let result = run_chart(args, &config)?;
            if args.json {
                print_json(&result)?;
            } else {
                print_chart(&result);
            }
            Ok(0)
        }
    }
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        use_env_filter: !(cli.verbosity.is_present() || cli.log_level.is_some()),
        ..LogConfig::default()
    };
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
