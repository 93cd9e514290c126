//! Command-line interface definitions.
//!
//! This module defines all CLI arguments, subcommands, and options using
//! the clap derive API: global options (verbosity, color, error format)
//! and the `split` / `report` subcommands, which share one key
//! configuration surface.
//!
//! # Example
//!
//! ```bash
//! # Split people.txt into people_uniqs.txt / people_dupes.txt, keyed on
//! # pipe-delimited field 2 (case/whitespace-insensitive) and field 3
//! linedupe split people.txt -s '|' -k 2:ci:ws -k 3:ci
//!
//! # Same key rules with an alias map on the first key
//! linedupe split people.txt -s '|' -k 2:ci:ws -k 3:ci --alias 1=names.json
//!
//! # Fixed-width keys: 6 characters from column 3, 8 from column 10
//! linedupe report people.txt -k 3+6:ci:ws -k 10+8:ci --output json
//!
//! # Whole-line deduplication, CSV report on stdout
//! linedupe report log.txt --output csv
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Configurable duplicate-record finder for delimited and fixed-width text.
///
/// linedupe partitions the lines of a file into "unique" and "duplicate"
/// outputs, comparing records on configurable key fields rather than full
/// text, with optional case folding, whitespace trimming, and alias
/// substitution.
#[derive(Debug, Parser)]
#[command(name = "linedupe")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Report fatal errors as a JSON object on stderr
    #[arg(long, global = true)]
    pub json_errors: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Partition a file into `_uniqs` / `_dupes` sibling files
    Split(SplitArgs),
    /// Classify a file and print a report to stdout
    Report(ReportArgs),
}

/// Key configuration shared by all subcommands.
#[derive(Debug, Args)]
pub struct KeyArgs {
    /// Field separator for delimited records (single ASCII character)
    ///
    /// Setting a separator selects delimited mode; without one, key specs
    /// must use the fixed-width START+LEN form.
    #[arg(short = 's', long, value_name = "CHAR")]
    pub separator: Option<String>,

    /// Key specification (repeatable; ordinal order is occurrence order)
    ///
    /// Delimited: FIELD[:len=N][:ci][:ws] selects the 1-based FIELD,
    /// optionally truncated to its first N characters. Fixed-width:
    /// START+LEN[:ci][:ws] selects LEN characters from 1-based column
    /// START. `ci` folds case, `ws` trims surrounding whitespace. With no
    /// --key at all, whole lines are compared verbatim.
    #[arg(short = 'k', long = "key", value_name = "SPEC", value_parser = parse_key_spec)]
    pub keys: Vec<KeySpecArg>,

    /// Attach a JSON alias map to the Nth --key occurrence
    ///
    /// ORD is the 1-based position of the --key the map applies to; FILE
    /// is a JSON object of raw-to-canonical entries, e.g.
    /// {"Bob": "Robert"}. Lookup is exact-match and case-sensitive.
    #[arg(long = "alias", value_name = "ORD=FILE", value_parser = parse_alias_attachment)]
    pub aliases: Vec<AliasAttachment>,
}

/// Arguments for the split subcommand.
#[derive(Debug, Args)]
pub struct SplitArgs {
    /// Input file to partition
    #[arg(value_name = "PATH")]
    pub input: PathBuf,

    /// Key configuration
    #[command(flatten)]
    pub key: KeyArgs,

    /// Write unique records here instead of the derived sibling path
    #[arg(long, value_name = "PATH")]
    pub unique_output: Option<PathBuf>,

    /// Write duplicate records here instead of the derived sibling path
    #[arg(long, value_name = "PATH")]
    pub duplicate_output: Option<PathBuf>,
}

/// Arguments for the report subcommand.
#[derive(Debug, Args)]
pub struct ReportArgs {
    /// Input file to classify, or `-` to read stdin
    #[arg(value_name = "PATH")]
    pub input: PathBuf,

    /// Key configuration
    #[command(flatten)]
    pub key: KeyArgs,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: ReportFormat,
}

/// Output format for the report subcommand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable summary
    Text,
    /// JSON document for scripting
    Json,
    /// CSV rows for spreadsheets
    Csv,
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportFormat::Text => write!(f, "text"),
            ReportFormat::Json => write!(f, "json"),
            ReportFormat::Csv => write!(f, "csv"),
        }
    }
}

/// How one parsed `--key` selects its substring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySelector {
    /// 1-based delimited field number.
    Field(usize),
    /// 1-based fixed-width span.
    Span {
        /// Starting character column.
        start: usize,
        /// Number of characters.
        length: usize,
    },
}

/// One parsed `--key` specification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySpecArg {
    /// Field or span selector.
    pub selector: KeySelector,
    /// Leading-characters truncation (delimited only).
    pub key_length: Option<usize>,
    /// Fold case before comparison.
    pub ignore_case: bool,
    /// Trim surrounding whitespace before comparison.
    pub ignore_whitespace: bool,
}

/// One parsed `--alias ORD=FILE` attachment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasAttachment {
    /// 1-based position of the `--key` occurrence the map applies to.
    pub ordinal: usize,
    /// Path of the JSON alias map file.
    pub path: PathBuf,
}

/// Parse a key specification string.
///
/// Grammar: `FIELD[:OPT]...` or `START+LEN[:OPT]...` where OPT is `ci`,
/// `ws`, or `len=N` (delimited only; a span's length is already fixed).
///
/// # Examples
///
/// ```
/// use linedupe::cli::{parse_key_spec, KeySelector};
///
/// let spec = parse_key_spec("2:len=3:ci:ws").unwrap();
/// assert_eq!(spec.selector, KeySelector::Field(2));
/// assert_eq!(spec.key_length, Some(3));
/// assert!(spec.ignore_case && spec.ignore_whitespace);
///
/// let spec = parse_key_spec("3+6:ci").unwrap();
/// assert_eq!(spec.selector, KeySelector::Span { start: 3, length: 6 });
/// ```
/// # Errors
///
/// Returns an error for an empty spec, a malformed selector, a zero
/// position or length, or an unknown option token.
pub fn parse_key_spec(s: &str) -> Result<KeySpecArg, String> {
    let mut segments = s.split(':');
    let selector_str = segments.next().unwrap_or_default().trim();
    if selector_str.is_empty() {
        return Err("key spec cannot be empty".to_string());
    }

    let selector = if let Some((start_str, length_str)) = selector_str.split_once('+') {
        let start = parse_position(start_str, "span start")?;
        let length = parse_position(length_str, "span length")?;
        KeySelector::Span { start, length }
    } else {
        KeySelector::Field(parse_position(selector_str, "field number")?)
    };

    let mut spec = KeySpecArg {
        selector,
        key_length: None,
        ignore_case: false,
        ignore_whitespace: false,
    };

    for token in segments {
        let token = token.trim();
        match token {
            "ci" => spec.ignore_case = true,
            "ws" => spec.ignore_whitespace = true,
            _ => {
                if let Some(value) = token.strip_prefix("len=") {
                    if matches!(spec.selector, KeySelector::Span { .. }) {
                        return Err(
                            "len= only applies to delimited field keys; a span's length is fixed"
                                .to_string(),
                        );
                    }
                    spec.key_length = Some(parse_position(value, "len")?);
                } else {
                    return Err(unknown_option(token));
                }
            }
        }
    }

    Ok(spec)
}

/// Parse an `ORD=FILE` alias attachment.
///
/// # Errors
///
/// Returns an error when the `ORD=` prefix is missing or not a positive
/// integer, or when FILE is empty.
pub fn parse_alias_attachment(s: &str) -> Result<AliasAttachment, String> {
    let (ordinal_str, path_str) = s
        .split_once('=')
        .ok_or_else(|| format!("expected ORD=FILE, got '{s}'"))?;

    let ordinal = parse_position(ordinal_str.trim(), "alias ordinal")?;
    let path_str = path_str.trim();
    if path_str.is_empty() {
        return Err("alias file path cannot be empty".to_string());
    }

    Ok(AliasAttachment {
        ordinal,
        path: PathBuf::from(path_str),
    })
}

/// Parse a 1-based position/length value.
fn parse_position(s: &str, what: &str) -> Result<usize, String> {
    let value: usize = s
        .trim()
        .parse()
        .map_err(|_| format!("invalid {what}: '{s}'"))?;
    if value == 0 {
        return Err(format!("{what} is 1-based and must be nonzero"));
    }
    Ok(value)
}

/// Build the error message for an unrecognized key option token.
fn unknown_option(token: &str) -> String {
    const OPTIONS: [&str; 3] = ["ci", "ws", "len"];

    let base = token.split('=').next().unwrap_or(token);
    let suggestion = OPTIONS
        .iter()
        .map(|candidate| (strsim::jaro_winkler(candidate, base), *candidate))
        .max_by(|a, b| a.0.total_cmp(&b.0))
        .filter(|(score, _)| *score >= 0.65);

    match suggestion {
        Some((_, candidate)) => {
            format!("unknown key option '{token}', did you mean '{candidate}'?")
        }
        None => format!("unknown key option '{token}' (expected ci, ws, or len=N)"),
    }
}
