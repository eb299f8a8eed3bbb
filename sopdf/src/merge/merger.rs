//! Core PDF merging implementation.
//!
//! Inputs are loaded one after another in list order and their pages are
//! appended to a single flat page tree. The first unreadable input aborts the
//! whole merge; nothing is written by this module.

use lopdf::Document;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::error::{Result, SoPdfError};
use crate::io::PdfReader;
use crate::merge::MergeList;
use crate::pages::PageAssembler;
use crate::utils::format_file_size;

/// Statistics about a merge operation.
#[derive(Debug, Clone)]
pub struct MergeStatistics {
    /// Number of PDFs merged.
    pub files_merged: usize,

    /// Total number of pages in merged document.
    pub total_pages: usize,

    /// Total time taken for merge.
    pub merge_time: Duration,

    /// Time taken to load all PDFs.
    pub load_time: Duration,

    /// Total size of input files.
    pub input_size: u64,
}

impl MergeStatistics {
    /// Format input size as human-readable string.
    pub fn format_input_size(&self) -> String {
        format_file_size(self.input_size)
    }
}

/// Result of a merge operation.
#[derive(Debug)]
pub struct MergeResult {
    /// The merged PDF document.
    pub document: Document,

    /// Statistics about the merge.
    pub statistics: MergeStatistics,

    /// Paths of files that were merged, in order.
    pub merged_files: Vec<PathBuf>,
}

/// PDF merger that concatenates whole documents.
#[derive(Debug, Default)]
pub struct Merger {
    reader: PdfReader,
    assembler: PageAssembler,
}

impl Merger {
    /// Create a new merger with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge `paths` in order into one document.
    ///
    /// # Arguments
    ///
    /// * `paths` - Input files, at least two
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Fewer than two paths are given
    /// - Any input cannot be loaded (the error names that file)
    /// - A page tree is malformed
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use sopdf::merge::Merger;
    /// # use std::path::PathBuf;
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let inputs = vec![PathBuf::from("a.pdf"), PathBuf::from("b.pdf")];
    /// let result = Merger::new().merge(&inputs).await?;
    /// println!("Merged {} files into {} pages",
    ///          result.statistics.files_merged,
    ///          result.statistics.total_pages);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn merge(&self, paths: &[PathBuf]) -> Result<MergeResult> {
        if paths.len() < super::list::MIN_MERGE_FILES {
            return Err(SoPdfError::NotEnoughFiles { count: paths.len() });
        }

        let merge_start = Instant::now();

        let load_start = Instant::now();
        let loaded = self.reader.load_in_order(paths).await?;
        let load_time = load_start.elapsed();

        let (first, rest) = loaded
            .split_first()
            .ok_or(SoPdfError::NotEnoughFiles { count: 0 })?;

        // Start from a flattened copy of the first document.
        let all_pages: Vec<usize> = (0..first.page_count).collect();
        let mut merged = self.assembler.extract(&first.document, &all_pages)?;

        for pdf in rest {
            let added = self.assembler.append(&mut merged, &pdf.document)?;
            tracing::debug!(path = %pdf.path.display(), pages = added, "appended document");
        }

        merged.prune_objects();
        merged.renumber_objects();

        let statistics = MergeStatistics {
            files_merged: loaded.len(),
            total_pages: merged.get_pages().len(),
            merge_time: merge_start.elapsed(),
            load_time,
            input_size: loaded.iter().map(|pdf| pdf.file_size).sum(),
        };

        tracing::info!(
            files = statistics.files_merged,
            pages = statistics.total_pages,
            "merged documents"
        );

        Ok(MergeResult {
            document: merged,
            statistics,
            merged_files: loaded.into_iter().map(|pdf| pdf.path).collect(),
        })
    }

    /// Merge the files queued in `list`.
    ///
    /// # Errors
    ///
    /// See [`Merger::merge`].
    pub async fn merge_list(&self, list: &MergeList) -> Result<MergeResult> {
        list.ensure_mergeable()?;
        self.merge(list.paths()).await
    }
}
