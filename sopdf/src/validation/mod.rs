//! Input and output validation.
//!
//! This module provides:
//! - A cheap header check ([`is_pdf_file`]) for warning about unlikely inputs
//! - Full validation of a PDF ([`Validator::validate_file`]) for `inspect`
//! - Output path checks against the overwrite mode
//!
//! # Examples
//!
//! ```no_run
//! use sopdf::validation::Validator;
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let validator = Validator::new();
//! let result = validator.validate_file(Path::new("test.pdf")).await?;
//! println!("PDF has {} pages", result.page_count);
//! # Ok(())
//! # }
//! ```

use lopdf::Document;
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::config::OverwriteMode;
use crate::error::{Result, SoPdfError};
use crate::io::PdfReader;
use crate::utils::format_file_size;
use crate::view::MediaBoxRasterizer;

/// Magic bytes every PDF file starts with.
pub const PDF_MAGIC: &[u8; 5] = b"%PDF-";

/// Whether `path` is readable and starts with `%PDF-`.
///
/// This only looks at the header; the file may still fail to parse.
pub fn is_pdf_file(path: &Path) -> bool {
    let mut header = [0u8; 5];
    match std::fs::File::open(path).and_then(|mut file| file.read_exact(&mut header)) {
        Ok(()) => &header == PDF_MAGIC,
        Err(err) => {
            tracing::debug!(path = %path.display(), error = %err, "not a readable PDF");
            false
        }
    }
}

/// Result of validating a single PDF file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    /// Path to the validated file.
    pub path: PathBuf,

    /// Number of pages in the PDF.
    pub page_count: usize,

    /// PDF version (major, minor).
    pub version: Option<(u8, u8)>,

    /// Size of the file in bytes.
    pub file_size: u64,

    /// Number of objects in the PDF.
    pub object_count: usize,

    /// Dimensions of the first page in points, after rotation.
    pub page_dimensions: Option<(f32, f32)>,

    /// Whether the document carries an outline.
    pub has_outline: bool,
}

impl ValidationResult {
    fn from_document(path: PathBuf, file_size: u64, doc: &Document) -> Self {
        let version = doc.version.split_once('.').map(|(major, minor)| {
            (
                major.parse::<u8>().unwrap_or_default(),
                minor.parse::<u8>().unwrap_or_default(),
            )
        });

        let page_dimensions = MediaBoxRasterizer::new(doc).page_dimensions(0).ok();
        let has_outline = doc
            .catalog()
            .map(|catalog| catalog.has(b"Outlines"))
            .unwrap_or(false);

        Self {
            path,
            page_count: doc.get_pages().len(),
            version,
            file_size,
            object_count: doc.objects.len(),
            page_dimensions,
            has_outline,
        }
    }

    /// Format the file size as a human-readable string.
    pub fn format_file_size(&self) -> String {
        format_file_size(self.file_size)
    }
}

/// Validator for PDF files and output paths.
#[derive(Debug, Default)]
pub struct Validator {
    reader: PdfReader,
}

impl Validator {
    /// Create a new validator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate a single PDF file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - File does not exist or is a directory
    /// - File does not start with `%PDF-`
    /// - File is encrypted, corrupted, or has no pages
    pub async fn validate_file(&self, path: &Path) -> Result<ValidationResult> {
        PdfReader::check_path_exists(path)?;

        if !is_pdf_file(path) {
            return Err(SoPdfError::failed_to_load_pdf(
                path.to_path_buf(),
                "missing %PDF- header",
            ));
        }

        let loaded = self.reader.load(path).await?;
        Ok(ValidationResult::from_document(
            loaded.path,
            loaded.file_size,
            &loaded.document,
        ))
    }

    /// Validate several files, stopping at the first failure.
    ///
    /// # Errors
    ///
    /// Returns the first validation error encountered.
    pub async fn validate_files(&self, paths: &[PathBuf]) -> Result<Vec<ValidationResult>> {
        let mut results = Vec::with_capacity(paths.len());
        for path in paths {
            results.push(self.validate_file(path).await?);
        }
        Ok(results)
    }

    /// Check `output` against `mode` before anything is written.
    ///
    /// [`OverwriteMode::Prompt`] passes here; asking is the caller's job.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Output file exists and `mode` is [`OverwriteMode::NoClobber`]
    /// - Output directory doesn't exist or is read-only
    pub async fn validate_output(&self, output: &Path, mode: OverwriteMode) -> Result<()> {
        if tokio::fs::metadata(output).await.is_ok() && mode == OverwriteMode::NoClobber {
            return Err(SoPdfError::output_exists(output.to_path_buf()));
        }

        crate::io::PdfWriter::new().can_write(output).await
    }
}
