//! CLI argument definitions for the sentiment tool.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "sentiment",
    version,
    about = "Score the sentiment of text rows in csv, xlsx, json and txt files",
    long_about = "Score the sentiment of text rows in tabular uploads.\n\n\
                  Every row needs a 'text' column (txt files get one per line).\n\
                  An optional 'timestamp' column is split into date and time, and\n\
                  an optional 'id' column supplies record ids."
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

    /// Include uploaded text in log output.
    ///
    /// Row values are redacted by default since uploads may carry personal
    /// data.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Score every row of a file and print the results.
    Analyze(AnalyzeArgs),

    /// List the supported file formats.
    Formats,
}

#[derive(Parser)]
pub struct AnalyzeArgs {
    /// File to score.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Declared filename used for format detection (default: the file's own name).
    #[arg(long = "name", value_name = "NAME")]
    pub name: Option<String>,

    /// Write results to a file instead of stdout.
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Result rendering.
    #[arg(long = "format", value_enum, default_value = "json")]
    pub format: OutputFormatArg,

    /// Print a per-label summary after the results.
    #[arg(long = "summary")]
    pub summary: bool,

    /// Number records by row position even when an 'id' column exists.
    #[arg(long = "row-ids")]
    pub row_ids: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormatArg {
    /// Compact JSON array.
    Json,
    /// Indented JSON array.
    PrettyJson,
    /// Text table.
    Table,
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
