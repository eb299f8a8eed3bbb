//! PDF reading and loading operations.
//!
//! Documents are read from disk with `tokio::fs` and parsed in memory by
//! `lopdf`. Loading is always sequential: callers await one document at a
//! time on the single UI thread.
//!
//! # Examples
//!
//! ```no_run
//! use sopdf::io::reader::PdfReader;
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let reader = PdfReader::new();
//! let loaded = reader.load(Path::new("document.pdf")).await?;
//! println!("Loaded {} pages in {:?}", loaded.page_count, loaded.load_time);
//! # Ok(())
//! # }
//! ```

use lopdf::Document;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::error::{Result, SoPdfError};

/// A loaded PDF document with metadata.
#[derive(Debug)]
pub struct LoadedPdf {
    /// The PDF document.
    pub document: Document,

    /// Path to the source file.
    pub path: PathBuf,

    /// Number of pages in the document.
    pub page_count: usize,

    /// Time taken to load the document.
    pub load_time: Duration,

    /// File size in bytes.
    pub file_size: u64,
}

/// PDF reader. Documents without pages are rejected.
#[derive(Debug, Clone, Default)]
pub struct PdfReader;

impl PdfReader {
    /// Create a new PDF reader.
    pub fn new() -> Self {
        Self
    }

    /// Check that `path` exists and is a regular file.
    pub fn check_path_exists(path: &Path) -> Result<()> {
        let exists = path.try_exists()?;
        if !exists {
            return Err(SoPdfError::file_not_found(path.to_path_buf()));
        }

        if path.is_dir() {
            return Err(SoPdfError::not_a_file(path.to_path_buf()));
        }

        Ok(())
    }

    /// Load a single PDF document.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file does not exist or is a directory
    /// - The file is not a valid PDF
    /// - The PDF is encrypted
    /// - The PDF has no pages
    pub async fn load(&self, path: &Path) -> Result<LoadedPdf> {
        Self::check_path_exists(path)?;

        let path_buf = path.to_path_buf();
        let start = Instant::now();

        let bytes = tokio::fs::read(&path_buf).await.map_err(|err| {
            SoPdfError::failed_to_load_pdf(path_buf.clone(), err.to_string())
        })?;
        let file_size = bytes.len() as u64;

        let document = Document::load_mem(&bytes).map_err(|err| {
            let err_msg = err.to_string();
            if err_msg.contains("encrypt") || err_msg.contains("password") {
                SoPdfError::encrypted_pdf(path_buf.clone())
            } else {
                SoPdfError::failed_to_load_pdf(path_buf.clone(), err_msg)
            }
        })?;

        let page_count = document.get_pages().len();
        if page_count == 0 {
            return Err(SoPdfError::empty_document(path_buf));
        }

        let load_time = start.elapsed();
        tracing::info!(
            path = %path_buf.display(),
            pages = page_count,
            bytes = file_size,
            "loaded PDF"
        );

        Ok(LoadedPdf {
            document,
            path: path_buf,
            page_count,
            load_time,
            file_size,
        })
    }

    /// Load documents one after another, stopping at the first failure.
    ///
    /// The returned error is the one produced for the offending file, so it
    /// names that file.
    pub async fn load_in_order(&self, paths: &[PathBuf]) -> Result<Vec<LoadedPdf>> {
        let mut loaded = Vec::with_capacity(paths.len());

        for path in paths {
            match self.load(path).await {
                Ok(pdf) => loaded.push(pdf),
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "aborting load");
                    return Err(err);
                }
            }
        }

        Ok(loaded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::write_sample_pdf;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_load_single_pdf() {
        let temp_dir = TempDir::new().unwrap();
        let pdf_path = write_sample_pdf(temp_dir.path(), "test.pdf", 3);

        let reader = PdfReader::new();
        let loaded = reader.load(&pdf_path).await.unwrap();

        assert_eq!(loaded.page_count, 3);
        assert_eq!(loaded.path, pdf_path);
        assert!(loaded.file_size > 0);
    }

    #[tokio::test]
    async fn test_load_nonexistent_pdf() {
        let reader = PdfReader::new();
        let result = reader.load(Path::new("/nonexistent.pdf")).await;

        assert!(matches!(result, Err(SoPdfError::FileNotFound { .. })));
    }

    #[tokio::test]
    async fn test_load_directory() {
        let temp_dir = TempDir::new().unwrap();
        let result = PdfReader::new().load(temp_dir.path()).await;

        assert!(matches!(result, Err(SoPdfError::NotAFile { .. })));
    }

    #[tokio::test]
    async fn test_load_garbage_names_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("notes.pdf");
        std::fs::write(&path, b"this is not a pdf").unwrap();

        let err = PdfReader::new().load(&path).await.unwrap_err();
        assert!(matches!(err, SoPdfError::FailedToLoadPdf { .. }));
        assert!(err.to_string().contains("notes.pdf"));
    }

    #[tokio::test]
    async fn test_load_empty_document() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_sample_pdf(temp_dir.path(), "empty.pdf", 0);

        let err = PdfReader::new().load(&path).await.unwrap_err();
        assert!(matches!(err, SoPdfError::EmptyDocument { .. }));
        assert_eq!(err.exit_code(), 3);
    }

    #[tokio::test]
    async fn test_load_in_order_stops_at_first_failure() {
        let temp_dir = TempDir::new().unwrap();
        let good = write_sample_pdf(temp_dir.path(), "good.pdf", 1);
        let bad = temp_dir.path().join("bad.pdf");
        std::fs::write(&bad, b"garbage").unwrap();

        let reader = PdfReader::new();
        let err = reader
            .load_in_order(&[good.clone(), bad, good])
            .await
            .unwrap_err();
        assert!(err.to_string().contains("bad.pdf"));
    }

    #[tokio::test]
    async fn test_load_in_order_keeps_order() {
        let temp_dir = TempDir::new().unwrap();
        let one = write_sample_pdf(temp_dir.path(), "one.pdf", 1);
        let two = write_sample_pdf(temp_dir.path(), "two.pdf", 2);

        let loaded = PdfReader::new()
            .load_in_order(&[two.clone(), one.clone()])
            .await
            .unwrap();
        assert_eq!(loaded[0].path, two);
        assert_eq!(loaded[1].path, one);
        assert_eq!(loaded[0].page_count, 2);
    }
}
