//! Error types for sopdf.
//!
//! Every fallible operation in the library returns [`SoPdfError`]. Errors
//! carry enough context (usually the offending path) to be shown to the user
//! verbatim, and each one belongs to an [`ErrorCategory`] that tells a front
//! end how to surface it.
//!
//! # Error Categories
//!
//! - **Cancelled**: the user declined a prompt; treated as a silent no-op.
//! - **Invalid document**: empty, unreadable, encrypted or non-PDF input.
//! - **Invalid state**: an operation that is rejected before any I/O, such as
//!   merging fewer than two files or saving a document with no pages.
//! - **Unexpected**: any other I/O or PDF library failure.

use std::io;
use std::path::PathBuf;

/// Result type alias for sopdf operations.
pub type Result<T> = std::result::Result<T, SoPdfError>;

/// How an error should be surfaced to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The user cancelled; nothing should be shown.
    Cancelled,
    /// The input document cannot be used.
    InvalidDocument,
    /// The operation is not allowed in the current state.
    InvalidState,
    /// An unexpected I/O or library failure.
    Unexpected,
}

/// Main error type for sopdf operations.
#[derive(Debug, thiserror::Error)]
pub enum SoPdfError {
    /// Input file was not found.
    #[error("File not found: {}", path.display())]
    FileNotFound {
        /// Path to the file that was not found.
        path: PathBuf,
    },

    /// Path exists but is not a regular file.
    #[error("Not a file: {}", path.display())]
    NotAFile {
        /// Offending path.
        path: PathBuf,
    },

    /// The PDF library could not parse the file.
    #[error("Failed to load PDF: {}\n  Reason: {reason}", path.display())]
    FailedToLoadPdf {
        /// Path to the PDF file.
        path: PathBuf,
        /// Reason reported by the PDF library.
        reason: String,
    },

    /// The PDF parsed but contains no pages.
    #[error("PDF has no pages: {}", path.display())]
    EmptyDocument {
        /// Path to the empty PDF.
        path: PathBuf,
    },

    /// PDF file is encrypted and cannot be processed.
    #[error(
        "PDF is encrypted and cannot be processed: {}\n  \
         Hint: Decrypt the PDF first using 'qpdf --decrypt' or similar tools",
        path.display()
    )]
    EncryptedPdf {
        /// Path to the encrypted PDF.
        path: PathBuf,
    },

    /// A merge needs at least two input files.
    #[error("Please select at least 2 PDF files to merge (got {count})")]
    NotEnoughFiles {
        /// Number of files that were provided.
        count: usize,
    },

    /// Every page of the organized document has been removed.
    #[error("Cannot save PDF with no pages. Please restore at least one page.")]
    NoActivePages,

    /// Split point outside `[1, page_count - 1]`.
    #[error(
        "Invalid split point {split}: must be between 1 and {} for a {page_count}-page document",
        page_count.saturating_sub(1)
    )]
    InvalidSplitPoint {
        /// Requested split point.
        split: usize,
        /// Page count of the source document.
        page_count: usize,
    },

    /// The source document has too few pages to split.
    #[error("PDF must have at least 2 pages to split: {} has {page_count}", path.display())]
    TooFewPagesToSplit {
        /// Path to the source document.
        path: PathBuf,
        /// Its page count.
        page_count: usize,
    },

    /// An organize operation was requested without a loaded document.
    #[error("No PDF file loaded. Please open a PDF file first.")]
    NoDocumentLoaded,

    /// Output file already exists and overwrite is not allowed.
    #[error(
        "Output file already exists: {}\n  \
         Use --force to overwrite or choose a different output path",
        path.display()
    )]
    OutputExists {
        /// Path to the existing output file.
        path: PathBuf,
    },

    /// Failed to create output file.
    #[error("Failed to create output file: {}\n  Reason: {source}", path.display())]
    FailedToCreateOutput {
        /// Path where output should be created.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Failed to write to output file.
    #[error("Failed to write to output file: {}\n  Reason: {source}", path.display())]
    FailedToWrite {
        /// Path being written to.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The page tree of a document could not be rebuilt.
    #[error("Failed to rebuild page tree: {reason}")]
    PageTree {
        /// Description of what went wrong.
        reason: String,
    },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of what's wrong with the configuration.
        message: String,
    },

    /// User cancelled the operation.
    #[error("Operation cancelled by user")]
    Cancelled,

    /// Error reported by the PDF library outside of loading.
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    /// Generic I/O error.
    #[error("I/O error: {source}")]
    Io {
        /// Underlying I/O error.
        #[from]
        source: io::Error,
    },

    /// Generic error with a custom message.
    #[error("{message}")]
    Other {
        /// Error message.
        message: String,
    },
}

impl From<anyhow::Error> for SoPdfError {
    fn from(err: anyhow::Error) -> Self {
        Self::other(err.to_string())
    }
}

impl SoPdfError {
    /// Create a FileNotFound error.
    pub fn file_not_found(path: PathBuf) -> Self {
        Self::FileNotFound { path }
    }

    /// Create a NotAFile error.
    pub fn not_a_file(path: PathBuf) -> Self {
        Self::NotAFile { path }
    }

    /// Create a FailedToLoadPdf error.
    pub fn failed_to_load_pdf(path: PathBuf, reason: impl Into<String>) -> Self {
        Self::FailedToLoadPdf {
            path,
            reason: reason.into(),
        }
    }

    /// Create an EmptyDocument error.
    pub fn empty_document(path: PathBuf) -> Self {
        Self::EmptyDocument { path }
    }

    /// Create an EncryptedPdf error.
    pub fn encrypted_pdf(path: PathBuf) -> Self {
        Self::EncryptedPdf { path }
    }

    /// Create an OutputExists error.
    pub fn output_exists(path: PathBuf) -> Self {
        Self::OutputExists { path }
    }

    /// Create a PageTree error.
    pub fn page_tree(reason: impl Into<String>) -> Self {
        Self::PageTree {
            reason: reason.into(),
        }
    }

    /// Create an InvalidConfig error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create an Other error with a custom message.
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// Classify the error for presentation.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Cancelled => ErrorCategory::Cancelled,
            Self::FileNotFound { .. }
            | Self::NotAFile { .. }
            | Self::FailedToLoadPdf { .. }
            | Self::EmptyDocument { .. }
            | Self::EncryptedPdf { .. } => ErrorCategory::InvalidDocument,
            Self::NotEnoughFiles { .. }
            | Self::NoActivePages
            | Self::InvalidSplitPoint { .. }
            | Self::TooFewPagesToSplit { .. }
            | Self::NoDocumentLoaded
            | Self::OutputExists { .. }
            | Self::InvalidConfig { .. } => ErrorCategory::InvalidState,
            Self::FailedToCreateOutput { .. }
            | Self::FailedToWrite { .. }
            | Self::PageTree { .. }
            | Self::Pdf(_)
            | Self::Io { .. }
            | Self::Other { .. } => ErrorCategory::Unexpected,
        }
    }

    /// Whether a scripted run of commands can carry on after this error.
    ///
    /// Rejected commands, declined prompts and unreadable inputs leave
    /// nothing half done. Failures while producing output do not.
    pub fn is_recoverable(&self) -> bool {
        self.category() != ErrorCategory::Unexpected
    }

    /// Get the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::FileNotFound { .. } => 2,
            Self::NotAFile { .. } => 2,
            Self::FailedToLoadPdf { .. } => 3,
            Self::EmptyDocument { .. } => 3,
            Self::EncryptedPdf { .. } => 3,
            Self::NotEnoughFiles { .. } => 1,
            Self::NoActivePages => 1,
            Self::InvalidSplitPoint { .. } => 1,
            Self::TooFewPagesToSplit { .. } => 1,
            Self::NoDocumentLoaded => 1,
            Self::OutputExists { .. } => 4,
            Self::FailedToCreateOutput { .. } => 5,
            Self::FailedToWrite { .. } => 5,
            Self::PageTree { .. } => 6,
            Self::InvalidConfig { .. } => 1,
            Self::Cancelled => 130, // Standard exit code for SIGINT
            Self::Pdf(_) => 6,
            Self::Io { .. } => 5,
            Self::Other { .. } => 1,
        }
    }
}
