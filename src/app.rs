//! Application wiring: from parsed CLI arguments to an exit code.
//!
//! This is the file-oriented caller of the classification core: it owns
//! opening the input, the `_uniqs` / `_dupes` output naming convention
//! (silently overwriting pre-existing files), and the mapping from run
//! statistics to process exit codes.

use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter};
use std::path::Path;

use anyhow::{bail, Context, Result};
use yansi::Paint;

use crate::classify::{Classifier, ClassifyStats, Partition};
use crate::cli::{Cli, Commands, KeyArgs, KeySelector, ReportArgs, ReportFormat, SplitArgs};
use crate::error::ExitCode;
use crate::keys::{AliasMap, KeyOptions, KeyRules};
use crate::output::{sibling_outputs, CsvOutput, JsonOutput};

/// Run the application with parsed CLI arguments.
///
/// # Errors
///
/// Returns an error for rejected key configuration, unreadable alias
/// files, or any I/O failure on the input or output side; I/O failures
/// abort the run with no partial-output guarantee.
pub fn run_app(cli: Cli) -> Result<ExitCode> {
    crate::logging::init_logging(cli.verbose, cli.quiet);
    if cli.no_color {
        yansi::disable();
    }

    match cli.command {
        Commands::Split(args) => run_split(args, cli.quiet),
        Commands::Report(args) => run_report(args),
    }
}

/// Build the key rules registry from the shared CLI key arguments.
fn build_rules(args: &KeyArgs) -> Result<KeyRules> {
    let mut rules = KeyRules::new();

    if let Some(separator) = &args.separator {
        rules
            .set_field_separator(separator)
            .context("invalid --separator")?;
    }

    let mut aliases: HashMap<usize, AliasMap> = HashMap::new();
    for attachment in &args.aliases {
        if attachment.ordinal > args.keys.len() {
            bail!(
                "--alias names key #{} but only {} --key option(s) were given",
                attachment.ordinal,
                args.keys.len()
            );
        }
        aliases.insert(attachment.ordinal, AliasMap::load(&attachment.path)?);
    }

    for (position, key) in args.keys.iter().enumerate() {
        let ordinal = position + 1;
        let mut options = KeyOptions::default()
            .with_ignore_case(key.ignore_case)
            .with_ignore_whitespace(key.ignore_whitespace);

        options = match key.selector {
            KeySelector::Field(field_number) => options.with_field_number(field_number),
            KeySelector::Span { start, length } => {
                options.with_start_pos(start).with_key_length(length)
            }
        };
        if let Some(length) = key.key_length {
            options = options.with_key_length(length);
        }
        if let Some(map) = aliases.remove(&ordinal) {
            options = options.with_alias(map);
        }

        rules
            .add_key(options)
            .with_context(|| format!("--key #{ordinal} rejected"))?;
    }

    Ok(rules)
}

fn run_split(args: SplitArgs, quiet: bool) -> Result<ExitCode> {
    let classifier = Classifier::new(build_rules(&args.key)?);

    let input = File::open(&args.input)
        .with_context(|| format!("failed to open {}", args.input.display()))?;

    let (derived_unique, derived_duplicate) = sibling_outputs(&args.input);
    let unique_path = args.unique_output.unwrap_or(derived_unique);
    let duplicate_path = args.duplicate_output.unwrap_or(derived_duplicate);

    // Pre-existing files at the output paths are silently overwritten
    let unique_sink = BufWriter::new(
        File::create(&unique_path)
            .with_context(|| format!("failed to create {}", unique_path.display()))?,
    );
    let duplicate_sink = BufWriter::new(
        File::create(&duplicate_path)
            .with_context(|| format!("failed to create {}", duplicate_path.display()))?,
    );

    let stats = classifier.classify_stream(BufReader::new(input), unique_sink, duplicate_sink)?;

    if !quiet {
        print_summary(&stats);
        println!(
            "{} -> {} / {}",
            args.input.display(),
            unique_path.display(),
            duplicate_path.display()
        );
    }
    Ok(exit_code_for(&stats))
}

fn run_report(args: ReportArgs) -> Result<ExitCode> {
    let classifier = Classifier::new(build_rules(&args.key)?);
    let (partition, stats) = classifier.classify_lines(read_lines(&args.input)?);

    match args.output {
        ReportFormat::Text => print_text_report(&partition, &stats),
        ReportFormat::Json => println!(
            "{}",
            JsonOutput::new(&partition, &stats).to_json_pretty()?
        ),
        ReportFormat::Csv => CsvOutput::new(&partition).write_to(io::stdout().lock())?,
    }
    Ok(exit_code_for(&stats))
}

/// Read the record sequence for the report command; `-` means stdin.
fn read_lines(path: &Path) -> Result<Vec<String>> {
    if path == Path::new("-") {
        io::stdin()
            .lock()
            .lines()
            .collect::<io::Result<_>>()
            .context("failed to read stdin")
    } else {
        let file =
            File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
        BufReader::new(file)
            .lines()
            .collect::<io::Result<_>>()
            .with_context(|| format!("failed to read {}", path.display()))
    }
}

fn print_summary(stats: &ClassifyStats) {
    println!(
        "{} record(s): {} unique, {} duplicate ({:.1}%)",
        stats.total_records,
        stats.unique_records.green().bold(),
        stats.duplicate_records.yellow().bold(),
        stats.duplicate_rate()
    );
    if stats.short_records > 0 {
        println!(
            "{} record(s) were short for the configured keys",
            stats.short_records.red().bold()
        );
    }
}

fn print_text_report(partition: &Partition, stats: &ClassifyStats) {
    print_summary(stats);
    for record in &partition.duplicate {
        println!("  line {}: {}", record.line_number(), record.text);
    }
}

/// Map run statistics to the process exit code.
fn exit_code_for(stats: &ClassifyStats) -> ExitCode {
    if stats.short_records > 0 {
        ExitCode::PartialSuccess
    } else if stats.duplicate_records == 0 {
        ExitCode::NoDuplicates
    } else {
        ExitCode::Success
    }
}
