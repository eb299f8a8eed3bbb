//! Splitting one PDF into two contiguous parts.
//!
//! A split point `s` sends pages `[0, s)` to part 1 and `[s, page_count)` to
//! part 2 of the source document, regardless of any organize state. Parts
//! are written as `{stem}_part1.pdf` and `{stem}_part2.pdf`.
//!
//! # Examples
//!
//! ```no_run
//! use sopdf::split::Splitter;
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let outcome = Splitter::new()
//!     .split_file(Path::new("book.pdf"), 10, Some(Path::new("out")))
//!     .await?;
//! println!("{} + {} pages", outcome.part1_pages, outcome.part2_pages);
//! # Ok(())
//! # }
//! ```

use lopdf::Document;
use std::path::{Path, PathBuf};

use crate::error::{Result, SoPdfError};
use crate::io::{PdfReader, PdfWriter};
use crate::pages::PageAssembler;
use crate::utils::derived_output_path;

/// Suffix of the first output file.
pub const PART1_SUFFIX: &str = "_part1";
/// Suffix of the second output file.
pub const PART2_SUFFIX: &str = "_part2";

/// A validated split point for a document of known length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitPoint {
    split: usize,
    page_count: usize,
}

impl SplitPoint {
    /// Validate `split` for a `page_count`-page document.
    ///
    /// # Errors
    ///
    /// Returns [`SoPdfError::InvalidSplitPoint`] unless
    /// `1 <= split <= page_count - 1`.
    ///
    /// ```
    /// use sopdf::split::SplitPoint;
    ///
    /// assert!(SplitPoint::new(4, 10).is_ok());
    /// assert!(SplitPoint::new(0, 10).is_err());
    /// assert!(SplitPoint::new(10, 10).is_err());
    /// ```
    pub fn new(split: usize, page_count: usize) -> Result<Self> {
        if split == 0 || split >= page_count {
            return Err(SoPdfError::InvalidSplitPoint { split, page_count });
        }
        Ok(Self { split, page_count })
    }

    /// Clamp `split` into the valid range, as a bounded input control does.
    ///
    /// Returns `None` when the document is too short to split at all.
    pub fn clamped(split: usize, page_count: usize) -> Option<Self> {
        if page_count < 2 {
            return None;
        }
        Some(Self {
            split: split.clamp(1, page_count - 1),
            page_count,
        })
    }

    /// Pages in part 1.
    pub fn split(&self) -> usize {
        self.split
    }

    /// Pages in the source document.
    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// 0-based page indices of part 1.
    pub fn first_pages(&self) -> Vec<usize> {
        (0..self.split).collect()
    }

    /// 0-based page indices of part 2.
    pub fn second_pages(&self) -> Vec<usize> {
        (self.split..self.page_count).collect()
    }
}

/// Result of splitting a file.
#[derive(Debug, Clone)]
pub struct SplitOutcome {
    /// Path of part 1.
    pub part1: PathBuf,
    /// Path of part 2.
    pub part2: PathBuf,
    /// Pages written to part 1.
    pub part1_pages: usize,
    /// Pages written to part 2.
    pub part2_pages: usize,
}

/// Splits documents in two.
#[derive(Debug, Default)]
pub struct Splitter {
    reader: PdfReader,
    writer: PdfWriter,
    assembler: PageAssembler,
}

impl Splitter {
    /// Create a splitter with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Output paths for `source` inside `output_dir` (default: next to the source).
    pub fn output_paths(source: &Path, output_dir: Option<&Path>) -> (PathBuf, PathBuf) {
        (
            derived_output_path(source, output_dir, PART1_SUFFIX),
            derived_output_path(source, output_dir, PART2_SUFFIX),
        )
    }

    /// Split an in-memory document at `point`.
    ///
    /// # Errors
    ///
    /// Returns an error if the point does not match the document or the page
    /// tree is malformed.
    pub fn split_document(&self, doc: &Document, point: SplitPoint) -> Result<(Document, Document)> {
        let page_count = doc.get_pages().len();
        if page_count != point.page_count() {
            return Err(SoPdfError::InvalidSplitPoint {
                split: point.split(),
                page_count,
            });
        }

        let first = self.assembler.extract(doc, &point.first_pages())?;
        let second = self.assembler.extract(doc, &point.second_pages())?;
        Ok((first, second))
    }

    /// Load `source`, split it after `split_at` pages and write both parts.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The source cannot be loaded
    /// - It has fewer than two pages
    /// - `split_at` is outside `[1, page_count - 1]`
    /// - Either part cannot be written (the first part is removed again
    ///   if the second fails)
    pub async fn split_file(
        &self,
        source: &Path,
        split_at: usize,
        output_dir: Option<&Path>,
    ) -> Result<SplitOutcome> {
        let loaded = self.reader.load(source).await?;
        if loaded.page_count < 2 {
            return Err(SoPdfError::TooFewPagesToSplit {
                path: loaded.path,
                page_count: loaded.page_count,
            });
        }

        let point = SplitPoint::new(split_at, loaded.page_count)?;
        let (first, second) = self.split_document(&loaded.document, point)?;

        let (part1, part2) = Self::output_paths(source, output_dir);
        self.writer.save(&first, &part1).await?;
        if let Err(err) = self.writer.save(&second, &part2).await {
            // Never leave half a split behind.
            if let Err(remove_err) = tokio::fs::remove_file(&part1).await {
                tracing::warn!(
                    path = %part1.display(),
                    error = %remove_err,
                    "failed to remove first part"
                );
            }
            return Err(err);
        }

        tracing::info!(
            source = %source.display(),
            split = point.split(),
            "split document"
        );

        Ok(SplitOutcome {
            part1,
            part2,
            part1_pages: point.split(),
            part2_pages: point.page_count() - point.split(),
        })
    }
}
