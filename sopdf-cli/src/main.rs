//! sopdf - Reorder, remove, merge and split PDF pages.
//!
//! Command line front end: one-shot `merge`, `split` and `inspect`
//! subcommands, and an interactive `organize` shell.

mod cli;
#[cfg(test)]
mod fixtures;
mod prompt;
mod shell;

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, BufReader, IsTerminal};
use std::process;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command, InspectArgs};
use crate::prompt::LinePrompt;
use crate::shell::Shell;
use sopdf::SoPdfError;
use sopdf::config::{MergeConfig, OrganizeConfig, SplitConfig};
use sopdf::io::PdfWriter;
use sopdf::merge::Merger;
use sopdf::output::{
    OutputFormatter, display_merge_result, display_split_outcome, display_validation_result,
};
use sopdf::split::{SplitPoint, Splitter};
use sopdf::validation::{Validator, is_pdf_file};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Run the application and handle errors
    if let Err(err) = run(cli).await {
        if !matches!(err.downcast_ref::<SoPdfError>(), Some(SoPdfError::Cancelled)) {
            eprintln!("Error: {err:#}");
        }
        process::exit(exit_code(&err));
    }
}

/// Diagnostics go to stderr; `RUST_LOG` overrides the default filter.
fn init_tracing(verbose: bool) {
    let default = if verbose { "warn,sopdf=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn exit_code(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<SoPdfError>()
        .map_or(1, SoPdfError::exit_code)
}

/// Main application logic.
async fn run(cli: Cli) -> Result<()> {
    let output_mode = cli.output_mode();
    output_mode.validate()?;
    let formatter = OutputFormatter::from_mode(output_mode);

    match &cli.command {
        Command::Merge(args) => run_merge(&args.to_config(output_mode)?, &formatter).await,
        Command::Split(args) => run_split(&args.to_config(output_mode)?, &formatter).await,
        Command::Organize(args) => run_organize(&args.to_config(output_mode)?, formatter).await,
        Command::Inspect(args) => run_inspect(args, &formatter).await,
    }
}

fn print_header(formatter: &OutputFormatter) {
    if formatter.should_print() {
        formatter.section(&format!("{} v{}", sopdf::NAME, sopdf::VERSION));
        formatter.blank_line();
    }
}

/// Ask on stdin whether `output` may be replaced.
fn confirm_overwrite(
    output: &std::path::Path,
    mode: sopdf::config::OverwriteMode,
    formatter: &OutputFormatter,
) -> Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    LinePrompt::new(&mut input, formatter, false).allow_overwrite(output, mode)?;
    Ok(())
}

async fn run_merge(config: &MergeConfig, formatter: &OutputFormatter) -> Result<()> {
    print_header(formatter);

    for path in &config.inputs {
        if !is_pdf_file(path) {
            formatter.warning(&format!("{} does not look like a PDF file", path.display()));
        }
    }

    let validator = Validator::new();
    validator
        .validate_output(&config.output, config.overwrite_mode)
        .await?;

    // Dry run mode - parse every input, then stop
    if config.dry_run {
        formatter.info("Validating input files...");
        let results = validator.validate_files(&config.inputs).await?;
        for (index, result) in results.iter().enumerate() {
            formatter.list_item(
                index + 1,
                &format!("{} ({} pages)", result.path.display(), result.page_count),
            );
        }
        formatter.blank_line();
        formatter.success("Dry run completed successfully");
        formatter.info(&format!("  Output would be: {}", config.output.display()));
        formatter.info("  Run without --dry-run to create the merged PDF");
        return Ok(());
    }

    for (index, path) in config.inputs.iter().enumerate() {
        formatter.list_item(index + 1, &path.display().to_string());
    }
    confirm_overwrite(&config.output, config.overwrite_mode, formatter)?;

    formatter.info("Merging documents...");
    let result = Merger::new().merge(&config.inputs).await?;

    let write_stats = PdfWriter::new()
        .save_with_stats(&result.document, &config.output)
        .await?;

    formatter.blank_line();
    display_merge_result(formatter, &result, &config.output);
    formatter.detail("Output size", &write_stats.format_file_size());
    formatter.detail(
        "Write time",
        &format!("{:.2}s", write_stats.write_time.as_secs_f64()),
    );

    Ok(())
}

async fn run_split(config: &SplitConfig, formatter: &OutputFormatter) -> Result<()> {
    print_header(formatter);

    let validator = Validator::new();
    let source = validator.validate_file(&config.input).await?;
    if source.page_count < 2 {
        return Err(SoPdfError::TooFewPagesToSplit {
            path: source.path,
            page_count: source.page_count,
        }
        .into());
    }
    let point = SplitPoint::new(config.split_at, source.page_count)?;
    formatter.info(&format!(
        "{}: {} pages",
        source.path.display(),
        source.page_count
    ));

    let (part1, part2) = Splitter::output_paths(&config.input, config.output_dir.as_deref());
    for part in [&part1, &part2] {
        validator
            .validate_output(part, config.overwrite_mode)
            .await?;
    }

    if config.dry_run {
        formatter.blank_line();
        formatter.success("Dry run completed successfully");
        formatter.info(&format!(
            "  Part 1 would be: {} ({} pages)",
            part1.display(),
            point.split()
        ));
        formatter.info(&format!(
            "  Part 2 would be: {} ({} pages)",
            part2.display(),
            point.page_count() - point.split()
        ));
        return Ok(());
    }

    for part in [&part1, &part2] {
        confirm_overwrite(part, config.overwrite_mode, formatter)?;
    }

    let outcome = Splitter::new()
        .split_file(&config.input, point.split(), config.output_dir.as_deref())
        .await?;
    display_split_outcome(formatter, &outcome);

    Ok(())
}

async fn run_organize(config: &OrganizeConfig, formatter: OutputFormatter) -> Result<()> {
    let state_path = sopdf::state::state_path();
    let initial = config.input.as_deref();

    match &config.commands {
        Some(commands) => {
            let file = std::fs::File::open(commands)
                .with_context(|| format!("Failed to open command file {}", commands.display()))?;
            let mut shell = Shell::new(config, formatter, state_path);
            shell.run(&mut BufReader::new(file), initial).await
        }
        None => {
            let interactive = io::stdin().is_terminal();
            if interactive {
                formatter.info("Type 'help' for a list of commands, 'quit' to leave.");
            }
            let mut shell = Shell::new(config, formatter, state_path).interactive(interactive);
            let stdin = io::stdin();
            let mut input = stdin.lock();
            shell.run(&mut input, initial).await
        }
    }
}

async fn run_inspect(args: &InspectArgs, formatter: &OutputFormatter) -> Result<()> {
    let results = Validator::new().validate_files(&args.files).await?;

    if args.json {
        let json = serde_json::to_string_pretty(&results)
            .context("Failed to serialize inspection results")?;
        formatter.lines(&[json]);
        return Ok(());
    }

    for (index, result) in results.iter().enumerate() {
        if index > 0 {
            formatter.lines(&[""]);
        }
        display_validation_result(formatter, result);
    }
    Ok(())
}
