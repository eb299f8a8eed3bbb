//! PDF writing and saving operations.
//!
//! Documents are compressed, serialized in memory, written to a uniquely
//! named sibling temp file and renamed over the target, so a failed save
//! never leaves a partial output or touches neighbouring files.
//!
//! # Examples
//!
//! ```no_run
//! use sopdf::io::writer::PdfWriter;
//! use lopdf::Document;
//! use std::path::Path;
//!
//! # async fn example(doc: Document) -> Result<(), Box<dyn std::error::Error>> {
//! let writer = PdfWriter::new();
//! writer.save(&doc, Path::new("output.pdf")).await?;
//! # Ok(())
//! # }
//! ```

use lopdf::Document;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::error::{Result, SoPdfError};
use crate::utils::{format_file_size, sibling_temp_path};

/// Statistics about a write operation.
#[derive(Debug, Clone)]
pub struct WriteStatistics {
    /// Time taken to write the file.
    pub write_time: Duration,

    /// Size of the written file in bytes.
    pub file_size: u64,

    /// Path where the file was written.
    pub output_path: PathBuf,
}

impl WriteStatistics {
    /// Format file size as human-readable string.
    pub fn format_file_size(&self) -> String {
        format_file_size(self.file_size)
    }
}

/// Atomic PDF writer.
#[derive(Debug, Clone, Default)]
pub struct PdfWriter;

impl PdfWriter {
    /// Create a new PDF writer.
    pub fn new() -> Self {
        Self
    }

    /// Save a PDF document to a file.
    pub async fn save(&self, doc: &Document, path: &Path) -> Result<()> {
        self.save_with_stats(doc, path).await.map(|_| ())
    }

    /// Save a PDF and return statistics about the operation.
    ///
    /// The document is serialized in memory first, so a serialization failure
    /// never leaves a partial file behind.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Output directory doesn't exist
    /// - Insufficient permissions
    /// - Serialization or the write itself fails
    pub async fn save_with_stats(&self, doc: &Document, path: &Path) -> Result<WriteStatistics> {
        let start = Instant::now();
        let path_buf = path.to_path_buf();

        let mut doc = doc.clone();
        doc.compress();

        let mut buffer = Vec::new();
        doc.save_to(&mut buffer)
            .map_err(|e| SoPdfError::FailedToWrite {
                path: path_buf.clone(),
                source: std::io::Error::other(e),
            })?;

        let temp_path = sibling_temp_path(&path_buf);
        if let Err(e) = tokio::fs::write(&temp_path, &buffer).await {
            discard_temp(&temp_path).await;
            return Err(SoPdfError::FailedToCreateOutput {
                path: path_buf,
                source: e,
            });
        }

        if let Err(e) = tokio::fs::rename(&temp_path, &path_buf).await {
            discard_temp(&temp_path).await;
            return Err(SoPdfError::FailedToWrite {
                path: path_buf,
                source: e,
            });
        }

        let stats = WriteStatistics {
            write_time: start.elapsed(),
            file_size: buffer.len() as u64,
            output_path: path_buf,
        };

        tracing::info!(
            path = %stats.output_path.display(),
            bytes = stats.file_size,
            "wrote PDF"
        );

        Ok(stats)
    }

    /// Check if a file can be written to the given path.
    ///
    /// Performs pre-flight checks without actually writing.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory doesn't exist or is read-only.
    pub async fn can_write(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            let metadata = tokio::fs::metadata(parent).await.map_err(|_| {
                SoPdfError::invalid_config(format!(
                    "Output directory does not exist: {}",
                    parent.display()
                ))
            })?;

            if !metadata.is_dir() {
                return Err(SoPdfError::invalid_config(format!(
                    "Output location is not a directory: {}",
                    parent.display()
                )));
            }

            if metadata.permissions().readonly() {
                return Err(SoPdfError::invalid_config(format!(
                    "Output directory is not writable: {}",
                    parent.display()
                )));
            }
        }

        Ok(())
    }
}

async fn discard_temp(path: &Path) {
    if let Err(err) = tokio::fs::remove_file(path).await
        && err.kind() != std::io::ErrorKind::NotFound
    {
        tracing::warn!(path = %path.display(), error = %err, "failed to remove temp file");
    }
}
