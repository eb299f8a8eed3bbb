//! The document currently open for organizing.

use lopdf::Document;
use std::path::{Path, PathBuf};

use crate::error::{Result, SoPdfError};
use crate::io::{LoadedPdf, PdfReader};
use crate::organize::PageOrder;
use crate::pages::PageAssembler;
use crate::utils::derived_output_path;
use crate::view::MediaBoxRasterizer;

/// Suffix of the default organize output file.
pub const ORGANIZED_SUFFIX: &str = "_organized";

/// In-memory state for one loaded source PDF.
///
/// Holds the parsed document for its whole lifetime together with the page
/// order. Only the [`Organizer`](crate::organize::Organizer) mutates it.
#[derive(Debug)]
pub struct DocumentSession {
    path: PathBuf,
    document: Document,
    order: PageOrder,
    file_size: u64,
}

impl DocumentSession {
    /// Load `path` and start with identity order.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not a PDF, is
    /// encrypted or has no pages.
    pub async fn open(path: &Path, reader: &PdfReader) -> Result<Self> {
        reader.load(path).await.map(Self::from_loaded)
    }

    /// Start a session over an already loaded document.
    pub fn from_loaded(loaded: LoadedPdf) -> Self {
        Self {
            order: PageOrder::new(loaded.page_count),
            path: loaded.path,
            document: loaded.document,
            file_size: loaded.file_size,
        }
    }

    /// Path of the source file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Source file name for display.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    /// The parsed source document.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Current page order.
    pub fn order(&self) -> &PageOrder {
        &self.order
    }

    pub(crate) fn order_mut(&mut self) -> &mut PageOrder {
        &mut self.order
    }

    /// Pages in the source document.
    pub fn page_count(&self) -> usize {
        self.order.page_count()
    }

    /// Size of the source file in bytes.
    pub fn file_size(&self) -> u64 {
        self.file_size
    }

    /// `{stem}_organized.pdf` next to the source.
    pub fn default_output_path(&self) -> PathBuf {
        derived_output_path(&self.path, None, ORGANIZED_SUFFIX)
    }

    /// Build the output document from the active sequence.
    ///
    /// # Errors
    ///
    /// Returns [`SoPdfError::NoActivePages`] when every page is removed.
    pub fn build_output(&self) -> Result<Document> {
        let active = self.order.active_sequence();
        if active.is_empty() {
            return Err(SoPdfError::NoActivePages);
        }
        PageAssembler::new().extract(&self.document, &active)
    }

    /// Rasterizer over the source document.
    pub fn rasterizer(&self) -> MediaBoxRasterizer<'_> {
        MediaBoxRasterizer::new(&self.document)
    }
}
