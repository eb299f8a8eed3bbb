//! Output formatting and display for sopdf.
//!
//! This module handles all user-facing output including:
//! - Formatted status messages
//! - Error and warning display
//! - Summary reports for merge, split and organize
//! - Quiet and verbose modes
//!
//! # Examples
//!
//! ```no_run
//! use sopdf::output::OutputFormatter;
//! use sopdf::config::OutputMode;
//!
//! let formatter = OutputFormatter::from_mode(OutputMode::default());
//! formatter.info("Starting merge operation");
//! formatter.success("Merge completed successfully");
//! ```

pub mod formatter;

pub use formatter::{CapturedOutput, MessageLevel, OutputFormatter};

use crate::error::{ErrorCategory, SoPdfError};
use crate::merge::MergeResult;
use crate::organize::SaveSummary;
use crate::split::SplitOutcome;
use crate::validation::ValidationResult;

fn file_name(path: &std::path::Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Report an error according to its category.
///
/// Cancellations are silent, invalid states are warnings, everything else is
/// an error.
pub fn display_error(formatter: &OutputFormatter, error: &SoPdfError) {
    match error.category() {
        ErrorCategory::Cancelled => formatter.debug(&error.to_string()),
        ErrorCategory::InvalidState => formatter.warning(&error.to_string()),
        ErrorCategory::InvalidDocument | ErrorCategory::Unexpected => {
            formatter.error(&error.to_string())
        }
    }
}

/// Display the outcome of a merge.
pub fn display_merge_result(formatter: &OutputFormatter, result: &MergeResult, output: &std::path::Path) {
    formatter.success(&format!(
        "Successfully merged {} PDF files!",
        result.statistics.files_merged
    ));
    formatter.info(&format!("Saved as: {}", file_name(output)));
    formatter.detail("Pages", &result.statistics.total_pages.to_string());
    formatter.detail("Input size", &result.statistics.format_input_size());
    formatter.detail(
        "Time",
        &format!("{:.2}s", result.statistics.merge_time.as_secs_f64()),
    );
}

/// Display the outcome of a split.
pub fn display_split_outcome(formatter: &OutputFormatter, outcome: &SplitOutcome) {
    formatter.success("PDF successfully split!");
    formatter.info(&format!(
        "Part 1: {} ({} pages)",
        file_name(&outcome.part1),
        outcome.part1_pages
    ));
    formatter.info(&format!(
        "Part 2: {} ({} pages)",
        file_name(&outcome.part2),
        outcome.part2_pages
    ));
    if let Some(dir) = outcome.part1.parent() {
        formatter.info(&format!("Files saved to: {}", dir.display()));
    }
}

/// Display the outcome of saving an organized document.
pub fn display_save_summary(formatter: &OutputFormatter, summary: &SaveSummary) {
    formatter.success("PDF successfully organized!");
    formatter.info(&format!("Original pages: {}", summary.original_pages));
    formatter.info(&format!("Final pages: {}", summary.final_pages));
    if summary.removed_pages > 0 {
        formatter.info(&format!("Pages removed: {}", summary.removed_pages));
    }
    formatter.info(&format!("Saved as: {}", file_name(&summary.output)));
    formatter.detail("Size", &summary.statistics.format_file_size());
}

/// Display what `inspect` found about a file.
pub fn display_validation_result(formatter: &OutputFormatter, result: &ValidationResult) {
    formatter.lines(&[
        format!("File: {}", result.path.display()),
        format!("Pages: {}", result.page_count),
        format!(
            "Version: {}",
            result
                .version
                .map(|(major, minor)| format!("{major}.{minor}"))
                .unwrap_or_else(|| "unknown".to_string())
        ),
        format!("Size: {}", result.format_file_size()),
    ]);
    if let Some((width, height)) = result.page_dimensions {
        formatter.lines(&[format!("First page: {width:.0} x {height:.0} pt")]);
    }
    formatter.detail("Objects", &result.object_count.to_string());
    formatter.detail("Outline", if result.has_outline { "yes" } else { "no" });
}
