//! sopdf - Reorder, remove, merge and split the pages of PDF documents.
//!
//! The heart of the library is the page-order model behind the organize
//! workflow: a permutation of a document's pages plus a set of pages marked
//! as removed, kept in sync with any number of read-only views. Around it
//! sit whole-document operations:
//!
//! - Organizing (reorder, remove, restore, save the active sequence)
//! - Merging several documents end to end
//! - Splitting one document into two contiguous parts
//! - Validating inputs and persisting window state
//!
//! # Examples
//!
//! ## Organize a document
//!
//! ```no_run
//! use sopdf::organize::{AutoConfirm, Organizer};
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut organizer = Organizer::new();
//! organizer.open(Path::new("report.pdf")).await?;
//!
//! // Move the last page to the front and drop the third one.
//! organizer.move_page(4, 0)?;
//! organizer.remove(2, &mut AutoConfirm(true))?;
//!
//! let summary = organizer.save(None).await?;
//! println!("Saved {} pages", summary.final_pages);
//! # Ok(())
//! # }
//! ```
//!
//! ## Merge and split
//!
//! ```no_run
//! use sopdf::io::PdfWriter;
//! use sopdf::merge::Merger;
//! use sopdf::split::Splitter;
//! use std::path::{Path, PathBuf};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let inputs = vec![PathBuf::from("a.pdf"), PathBuf::from("b.pdf")];
//! let merged = Merger::new().merge(&inputs).await?;
//! PdfWriter::new().save(&merged.document, Path::new("merged.pdf")).await?;
//!
//! let outcome = Splitter::new().split_file(Path::new("merged.pdf"), 4, None).await?;
//! println!("Wrote {}", outcome.part1.display());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod io;
pub mod merge;
pub mod organize;
pub mod output;
pub mod pages;
pub mod split;
pub mod state;
pub mod utils;
pub mod validation;
pub mod view;

// Re-export commonly used types
pub use error::{ErrorCategory, Result, SoPdfError};
pub use organize::{DocumentSession, Organizer, PageOrder};
pub use state::WindowState;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
