//! CLI argument definitions for the field mapper.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use fieldmap_ingest::MAX_UPLOAD_SIZE;
use fieldmap_map::DEFAULT_MIN_SIMILARITY;

#[derive(Parser)]
#[command(
    name = "fieldmap",
    version,
    about = "Map the columns of a source file onto the columns of a target file",
    long_about = "Map the columns of a source CSV onto the columns of a target CSV.\n\n\
                  Suggestions pair columns by position; gesture scripts accept, connect,\n\
                  remove and reorder before the mapping is exported as JSON or CSV."
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
}

#[derive(Subcommand)]
pub enum Command {
    /// Show both field lists and the seeded suggestions.
    Suggest(SuggestArgs),

    /// Seed, replay gestures and export the mapping.
    Export(ExportArgs),

    /// Show the header and first rows of an uploaded file.
    Preview(PreviewArgs),
}

/// Inputs shared by commands that build a mapping.
#[derive(Args)]
pub struct MappingInputs {
    /// Source file (.csv).
    #[arg(value_name = "SOURCE")]
    pub source: PathBuf,

    /// Target file (.csv).
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Pair suggestions by name similarity instead of position.
    #[arg(long = "match-names")]
    pub match_names: bool,

    /// Minimum similarity (0 to 1) for --match-names.
    #[arg(
        long = "min-similarity",
        value_name = "SCORE",
        default_value_t = DEFAULT_MIN_SIMILARITY,
        value_parser = parse_similarity
    )]
    pub min_similarity: f64,

    /// Reject uploads larger than this many bytes.
    #[arg(
        long = "max-file-size",
        value_name = "BYTES",
        default_value_t = MAX_UPLOAD_SIZE
    )]
    pub max_file_size: u64,
}

#[derive(Args)]
pub struct SuggestArgs {
    #[command(flatten)]
    pub inputs: MappingInputs,
}

#[derive(Args)]
pub struct ExportArgs {
    #[command(flatten)]
    pub inputs: MappingInputs,

    /// Export format.
    #[arg(long = "format", value_enum, default_value = "json")]
    pub format: ExportFormatArg,

    /// Accept every suggestion before replaying gestures.
    #[arg(long = "accept-all")]
    pub accept_all: bool,

    /// JSON gesture script to replay.
    #[arg(long = "gestures", value_name = "FILE")]
    pub gestures: Option<PathBuf>,

    /// Write the export here instead of stdout.
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Exit with an error if any gesture is rejected.
    #[arg(long = "strict")]
    pub strict: bool,
}

#[derive(Args)]
pub struct PreviewArgs {
    /// File to preview (.csv).
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Number of data rows to show.
    #[arg(long = "rows", value_name = "N", default_value_t = 5)]
    pub rows: usize,

    /// Reject files larger than this many bytes.
    #[arg(
        long = "max-file-size",
        value_name = "BYTES",
        default_value_t = MAX_UPLOAD_SIZE
    )]
    pub max_file_size: u64,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ExportFormatArg {
    Json,
    Csv,
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

/// Parses a similarity score in `[0, 1]`.
fn parse_similarity(value: &str) -> Result<f64, String> {
    let score: f64 = value
        .parse()
        .map_err(|_| format!("`{value}` is not a number"))?;
    if (0.0..=1.0).contains(&score) {
        Ok(score)
    } else {
        Err(format!("`{value}` is outside 0..=1"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn similarity_must_be_a_unit_score() {
        assert_eq!(parse_similarity("0.9"), Ok(0.9));
        assert_eq!(parse_similarity("1"), Ok(1.0));
        assert!(parse_similarity("1.5").is_err());
        assert!(parse_similarity("-0.1").is_err());
        assert!(parse_similarity("NaN").is_err());
        assert!(parse_similarity("high").is_err());
    }

    #[test]
    fn out_of_range_similarity_fails_parsing() {
        let result = Cli::try_parse_from([
            "fieldmap",
            "suggest",
            "s.csv",
            "t.csv",
            "--match-names",
            "--min-similarity",
            "2",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn preview_accepts_upload_limit() {
        let cli = Cli::try_parse_from(["fieldmap", "preview", "s.csv", "--max-file-size", "10"])
            .unwrap();
        let Command::Preview(args) = cli.command else {
            panic!("expected preview");
        };
        assert_eq!(args.max_file_size, 10);
        assert_eq!(args.rows, 5);
    }
}
