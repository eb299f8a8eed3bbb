//! Configuration module for sopdf.
//!
//! This module holds the validated settings each command runs with, built
//! from CLI arguments. It handles:
//! - Validation of argument combinations
//! - Overwrite and verbosity modes shared by every command
//! - Defaults for derived output locations

use anyhow::{Result, bail};
use std::path::PathBuf;

use crate::SoPdfError;
use crate::merge::MIN_MERGE_FILES;

/// Output file overwrite behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverwriteMode {
    /// Prompt the user before overwriting (default).
    #[default]
    Prompt,
    /// Always overwrite without prompting.
    Force,
    /// Never overwrite, error if file exists.
    NoClobber,
}

impl OverwriteMode {
    /// Pick the mode from `--force` / `--no-clobber` style flags.
    ///
    /// ```
    /// use sopdf::config::OverwriteMode;
    ///
    /// assert_eq!(OverwriteMode::from_flags(false, false), OverwriteMode::Prompt);
    /// assert_eq!(OverwriteMode::from_flags(true, false), OverwriteMode::Force);
    /// assert_eq!(OverwriteMode::from_flags(false, true), OverwriteMode::NoClobber);
    /// ```
    pub fn from_flags(force: bool, no_clobber: bool) -> Self {
        match (force, no_clobber) {
            (true, _) => Self::Force,
            (false, true) => Self::NoClobber,
            (false, false) => Self::Prompt,
        }
    }
}

/// How chatty user-facing output is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OutputMode {
    /// Suppress everything but errors.
    pub quiet: bool,
    /// Print extra detail.
    pub verbose: bool,
}

impl OutputMode {
    /// Validate the combination.
    ///
    /// # Errors
    ///
    /// Returns an error if both quiet and verbose are set.
    pub fn validate(&self) -> Result<()> {
        if self.verbose && self.quiet {
            bail!("Cannot use both --verbose and --quiet");
        }
        Ok(())
    }
}

/// Settings for a merge.
#[derive(Debug, Clone)]
pub struct MergeConfig {
    /// Input PDF file paths (in merge order, duplicates already dropped).
    pub inputs: Vec<PathBuf>,

    /// Output PDF file path.
    pub output: PathBuf,

    /// Validate inputs and report the plan without writing.
    pub dry_run: bool,

    /// File overwrite behavior.
    pub overwrite_mode: OverwriteMode,

    /// Verbosity.
    pub output_mode: OutputMode,
}

impl MergeConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Fewer than two inputs are given
    /// - The output path is also an input
    /// - Verbose and quiet modes are both enabled
    pub fn validate(&self) -> Result<()> {
        self.output_mode.validate()?;

        if self.inputs.len() < MIN_MERGE_FILES {
            bail!(SoPdfError::NotEnoughFiles {
                count: self.inputs.len(),
            });
        }

        if self.inputs.contains(&self.output) {
            bail!(
                "Output file cannot be the same as an input file: {}",
                self.output.display()
            );
        }

        Ok(())
    }
}

/// Settings for a split.
#[derive(Debug, Clone)]
pub struct SplitConfig {
    /// Source PDF.
    pub input: PathBuf,

    /// Pages in the first part.
    pub split_at: usize,

    /// Directory for both parts; `None` means next to the source.
    pub output_dir: Option<PathBuf>,

    /// Validate the input and report the plan without writing.
    pub dry_run: bool,

    /// File overwrite behavior.
    pub overwrite_mode: OverwriteMode,

    /// Verbosity.
    pub output_mode: OutputMode,
}

impl SplitConfig {
    /// Validate what can be checked before the source is loaded.
    ///
    /// The upper bound of `split_at` depends on the page count and is checked
    /// by [`SplitPoint::new`](crate::split::SplitPoint::new).
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `split_at` is zero
    /// - The output directory does not exist
    /// - Verbose and quiet modes are both enabled
    pub fn validate(&self) -> Result<()> {
        self.output_mode.validate()?;

        if self.split_at == 0 {
            bail!(SoPdfError::InvalidSplitPoint {
                split: 0,
                page_count: 0,
            });
        }

        if let Some(dir) = &self.output_dir
            && !dir.is_dir()
        {
            bail!("Output directory does not exist: {}", dir.display());
        }

        Ok(())
    }
}

/// Settings for an interactive organize session.
#[derive(Debug, Clone, Default)]
pub struct OrganizeConfig {
    /// Document to open at start-up.
    pub input: Option<PathBuf>,

    /// Read shell commands from this file instead of stdin.
    pub commands: Option<PathBuf>,

    /// Answer every confirmation with yes.
    pub assume_yes: bool,

    /// File overwrite behavior for `save`.
    pub overwrite_mode: OverwriteMode,

    /// Verbosity.
    pub output_mode: OutputMode,
}

impl OrganizeConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The command file does not exist
    /// - Verbose and quiet modes are both enabled
    pub fn validate(&self) -> Result<()> {
        self.output_mode.validate()?;

        if let Some(commands) = &self.commands
            && !commands.is_file()
        {
            bail!("Command file not found: {}", commands.display());
        }

        Ok(())
    }
}
