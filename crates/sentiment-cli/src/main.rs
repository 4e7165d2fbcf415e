//! Sentiment scoring CLI.

use std::io::{self, IsTerminal};

use clap::{ColorChoice, Parser};
use sentiment_cli::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use sentiment_cli::commands::{print_analysis, run_analyze, run_formats};
use sentiment_cli::logging::{LogConfig, LogFormat, init_logging};
use sentiment_core::PipelineError;
use tracing::level_filters::LevelFilter;

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match cli.command {
        Command::Analyze(args) => match run_analyze(&args) {
            Ok(result) => {
                print_analysis(&result, args.summary);
                0
            }
            Err(error) => {
                report_error(&error);
                1
            }
        },
        Command::Formats => match run_formats() {
            Ok(()) => 0,
            Err(error) => {
                report_error(&error);
                1
            }
        },
    };
    std::process::exit(exit_code);
}

fn report_error(error: &anyhow::Error) {
    match error.downcast_ref::<PipelineError>() {
        Some(failure) => eprintln!(
            "error: {} (status {}) at stage '{}': {}",
            failure.kind,
            failure.kind.status_code(),
            failure.stage,
            failure.detail
        ),
        None => eprintln!("error: {error:#}"),
    }
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let level_filter = match cli.log_level {
        Some(LogLevelArg::Error) => LevelFilter::ERROR,
        Some(LogLevelArg::Warn) => LevelFilter::WARN,
        Some(LogLevelArg::Info) => LevelFilter::INFO,
        Some(LogLevelArg::Debug) => LevelFilter::DEBUG,
        Some(LogLevelArg::Trace) => LevelFilter::TRACE,
        None => cli.verbosity.tracing_level_filter(),
    };
    let explicit_level = cli.verbosity.is_present() || cli.log_level.is_some();
    let format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    let with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    LogConfig::default()
        .with_level(level_filter, explicit_level)
        .with_format(format)
        .with_ansi(with_ansi)
        .with_log_file(cli.log_file.clone())
        .with_log_data(cli.log_data)
}
