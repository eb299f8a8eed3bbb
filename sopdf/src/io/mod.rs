//! PDF input/output operations.
//!
//! This module handles all file I/O for PDFs:
//! - Loading documents from disk
//! - Saving documents atomically
//!
//! # Examples
//!
//! ```no_run
//! use sopdf::io::{PdfReader, PdfWriter};
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let loaded = PdfReader::new().load(Path::new("input.pdf")).await?;
//! PdfWriter::new().save(&loaded.document, Path::new("copy.pdf")).await?;
//! # Ok(())
//! # }
//! ```

pub mod reader;
pub mod writer;

pub use reader::{LoadedPdf, PdfReader};
pub use writer::{PdfWriter, WriteStatistics};
