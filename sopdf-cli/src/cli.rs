//! CLI argument parsing for sopdf.
//!
//! This module defines the command-line interface structure using `clap`.
//! Each subcommand converts its arguments into a validated config from
//! [`sopdf::config`].

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use sopdf::config::{MergeConfig, OrganizeConfig, OutputMode, OverwriteMode, SplitConfig};
use sopdf::merge::MergeList;
use sopdf::utils::{collect_paths_for_patterns, ensure_pdf_extension};

/// Reorder, remove, merge and split PDF pages.
///
/// sopdf organizes the pages of a single document in an interactive shell,
/// merges whole documents end to end, and splits a document in two.
#[derive(Parser, Debug)]
#[command(name = "sopdf")]
#[command(version)]
#[command(about = "Reorder, remove, merge and split PDF pages", long_about = None)]
#[command(author)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Suppress all non-error output
    ///
    /// Only errors and warnings will be printed.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Verbose output - show statistics and debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Verbosity shared by every subcommand.
    pub fn output_mode(&self) -> OutputMode {
        OutputMode {
            quiet: self.quiet,
            verbose: self.verbose,
        }
    }
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Merge two or more PDF files into one, in the order given
    Merge(MergeArgs),

    /// Split a PDF into two files after a given page
    Split(SplitArgs),

    /// Reorder and remove pages in an interactive shell
    Organize(OrganizeArgs),

    /// Show page count, version and size of PDF files
    Inspect(InspectArgs),
}

/// Flags controlling what happens to existing output files.
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct OverwriteArgs {
    /// Overwrite existing output files without confirmation
    #[arg(short, long)]
    pub force: bool,

    /// Never overwrite existing output files
    ///
    /// If an output file already exists, exit with an error
    /// instead of prompting or overwriting.
    #[arg(long, conflicts_with = "force")]
    pub no_clobber: bool,
}

impl OverwriteArgs {
    /// Overwrite mode selected by the flags.
    pub fn mode(&self) -> OverwriteMode {
        OverwriteMode::from_flags(self.force, self.no_clobber)
    }
}

/// Arguments of `sopdf merge`.
#[derive(Args, Debug, Clone)]
pub struct MergeArgs {
    /// Input PDF files to merge (in order)
    ///
    /// Glob patterns are expanded. A file listed twice is merged once.
    ///
    /// Examples:
    ///   sopdf merge a.pdf b.pdf -o both.pdf
    ///   sopdf merge 'chapter*.pdf' -o book.pdf
    #[arg(required = true, value_name = "FILE")]
    pub inputs: Vec<String>,

    /// Output PDF file path (".pdf" is appended when missing)
    #[arg(short, long, value_name = "FILE")]
    pub output: PathBuf,

    /// Validate inputs and show the plan without writing anything
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    #[command(flatten)]
    pub overwrite: OverwriteArgs,
}

impl MergeArgs {
    /// Expand the inputs and build a validated [`MergeConfig`].
    ///
    /// # Errors
    ///
    /// Returns an error if a pattern is invalid, a literal path does not
    /// exist, fewer than two distinct files remain, or the output is one of
    /// the inputs.
    pub fn to_config(&self, output_mode: OutputMode) -> Result<MergeConfig> {
        let expanded = collect_paths_for_patterns(&self.inputs)
            .context("Failed to expand input patterns")?;
        let list: MergeList = expanded.into_iter().collect();

        let config = MergeConfig {
            inputs: list.paths().to_vec(),
            output: ensure_pdf_extension(self.output.clone()),
            dry_run: self.dry_run,
            overwrite_mode: self.overwrite.mode(),
            output_mode,
        };
        config.validate()?;
        Ok(config)
    }
}

/// Arguments of `sopdf split`.
#[derive(Args, Debug, Clone)]
pub struct SplitArgs {
    /// PDF file to split
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Number of pages in the first part
    ///
    /// Must be between 1 and one less than the page count.
    #[arg(short = 'a', long = "at", value_name = "PAGE")]
    pub split_at: usize,

    /// Directory for both parts (default: next to the input)
    #[arg(short = 'd', long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Validate the input and show the plan without writing anything
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    #[command(flatten)]
    pub overwrite: OverwriteArgs,
}

impl SplitArgs {
    /// Build a validated [`SplitConfig`].
    ///
    /// # Errors
    ///
    /// Returns an error if the split point is zero or the output directory
    /// does not exist.
    pub fn to_config(&self, output_mode: OutputMode) -> Result<SplitConfig> {
        let config = SplitConfig {
            input: self.input.clone(),
            split_at: self.split_at,
            output_dir: self.output_dir.clone(),
            dry_run: self.dry_run,
            overwrite_mode: self.overwrite.mode(),
            output_mode,
        };
        config.validate()?;
        Ok(config)
    }
}

/// Arguments of `sopdf organize`.
#[derive(Args, Debug, Clone)]
pub struct OrganizeArgs {
    /// PDF file to open at start-up
    #[arg(value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Read shell commands from a file instead of the terminal
    ///
    /// One command per line; blank lines and lines starting with '#'
    /// are skipped.
    #[arg(short, long, value_name = "FILE")]
    pub commands: Option<PathBuf>,

    /// Answer yes to every confirmation prompt
    #[arg(short = 'y', long)]
    pub yes: bool,

    #[command(flatten)]
    pub overwrite: OverwriteArgs,
}

impl OrganizeArgs {
    /// Build a validated [`OrganizeConfig`].
    ///
    /// # Errors
    ///
    /// Returns an error if the command file does not exist.
    pub fn to_config(&self, output_mode: OutputMode) -> Result<OrganizeConfig> {
        let config = OrganizeConfig {
            input: self.input.clone(),
            commands: self.commands.clone(),
            assume_yes: self.yes,
            overwrite_mode: self.overwrite.mode(),
            output_mode,
        };
        config.validate()?;
        Ok(config)
    }
}

/// Arguments of `sopdf inspect`.
#[derive(Args, Debug, Clone)]
pub struct InspectArgs {
    /// PDF files to inspect
    #[arg(required = true, value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Print results as JSON
    #[arg(long)]
    pub json: bool,
}
