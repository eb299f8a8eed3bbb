//! Organize workflow: reorder, remove and restore pages, then save.
//!
//! The [`Organizer`] owns the open [`DocumentSession`] and the
//! [`ViewSynchronizer`]. It is the only path through which the page order
//! changes, and every mutation re-renders the views before returning.
//!
//! # Examples
//!
//! ```no_run
//! use sopdf::organize::{AutoConfirm, Organizer};
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut organizer = Organizer::new();
//! organizer.open(Path::new("scan.pdf")).await?;
//! organizer.move_up(3)?;
//! organizer.remove(0, &mut AutoConfirm(true))?;
//! println!("{}", organizer.status());
//!
//! let summary = organizer.save(None).await?;
//! println!("Saved as {}", summary.output.display());
//! # Ok(())
//! # }
//! ```

pub mod order;
pub mod session;

pub use order::PageOrder;
pub use session::{DocumentSession, ORGANIZED_SUFFIX};

use std::path::{Path, PathBuf};

use crate::error::{Result, SoPdfError};
use crate::io::{PdfReader, PdfWriter, WriteStatistics};
use crate::view::ViewSynchronizer;

/// Asks the user to confirm a destructive action.
pub trait Confirm {
    /// Return `true` to go ahead.
    fn confirm(&mut self, title: &str, message: &str) -> bool;
}

/// Answers every confirmation with a fixed value.
#[derive(Debug, Clone, Copy)]
pub struct AutoConfirm(pub bool);

impl Confirm for AutoConfirm {
    fn confirm(&mut self, title: &str, _message: &str) -> bool {
        tracing::debug!(title, answer = self.0, "auto-confirmed");
        self.0
    }
}

/// Outcome of saving an organized document.
#[derive(Debug, Clone)]
pub struct SaveSummary {
    /// Where the document was written.
    pub output: PathBuf,
    /// Pages in the source document.
    pub original_pages: usize,
    /// Pages written.
    pub final_pages: usize,
    /// Pages left out.
    pub removed_pages: usize,
    /// Whether the written pages are out of source order.
    pub reordered: bool,
    /// Write statistics.
    pub statistics: WriteStatistics,
}

/// Controller for the organize workflow.
#[derive(Debug, Default)]
pub struct Organizer {
    session: Option<DocumentSession>,
    views: ViewSynchronizer,
    reader: PdfReader,
    writer: PdfWriter,
}

impl Organizer {
    /// Create an organizer with no document open.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an organizer that renders into `views`.
    pub fn with_views(views: ViewSynchronizer) -> Self {
        Self {
            views,
            ..Self::default()
        }
    }

    /// Open `path`, replacing any current session.
    ///
    /// On failure the current session is left untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be loaded or has no pages.
    pub async fn open(&mut self, path: &Path) -> Result<&DocumentSession> {
        let session = DocumentSession::open(path, &self.reader).await?;
        tracing::info!(
            path = %session.path().display(),
            pages = session.page_count(),
            "opened document for organizing"
        );

        self.views.invalidate();
        self.session = Some(session);
        self.views.render(self.session.as_ref());

        self.session()
    }

    /// Close the current document, if any.
    pub fn clear(&mut self) {
        if let Some(session) = self.session.take() {
            tracing::info!(path = %session.path().display(), "closed document");
        }
        self.views.invalidate();
        self.views.render(None);
    }

    /// The open document.
    ///
    /// # Errors
    ///
    /// Returns [`SoPdfError::NoDocumentLoaded`] when nothing is open.
    pub fn session(&self) -> Result<&DocumentSession> {
        self.session.as_ref().ok_or(SoPdfError::NoDocumentLoaded)
    }

    /// Whether a document is open.
    pub fn is_loaded(&self) -> bool {
        self.session.is_some()
    }

    /// The synchronized views.
    pub fn views(&self) -> &ViewSynchronizer {
        &self.views
    }

    /// Refit the grid to a window `width` pixels wide and re-render.
    pub fn fit_to_width(&mut self, width: u32) {
        self.views.fit_to_width(width);
        self.views.render(self.session.as_ref());
    }

    /// Status line for the current state.
    pub fn status(&self) -> String {
        self.views.status()
    }

    /// Move `page` next to `target`. See [`PageOrder::move_page`].
    pub fn move_page(&mut self, page: usize, target: usize) -> Result<bool> {
        self.mutate(|order| order.move_page(page, target))
    }

    /// Move the page at active position `from` onto position `to` (0-based).
    pub fn move_to_position(&mut self, from: usize, to: usize) -> Result<bool> {
        self.mutate(|order| order.move_to_position(from, to))
    }

    /// Swap `page` with the active page before it.
    pub fn move_up(&mut self, page: usize) -> Result<bool> {
        self.mutate(|order| order.move_up(page))
    }

    /// Swap `page` with the active page after it.
    pub fn move_down(&mut self, page: usize) -> Result<bool> {
        self.mutate(|order| order.move_down(page))
    }

    /// Mark `page` as removed after asking `confirm`.
    ///
    /// Returns `Ok(false)` if the page was already removed or the user
    /// declined.
    pub fn remove(&mut self, page: usize, confirm: &mut dyn Confirm) -> Result<bool> {
        let order = self.session()?.order();
        if order.is_removed(page) {
            return Ok(false);
        }

        let message = match order.active_position(page) {
            Some(position) if position != page => format!(
                "Remove page {} (originally page {})?\n\nThis can be undone with 'restore'.",
                position + 1,
                page + 1
            ),
            _ => format!(
                "Remove page {}?\n\nThis can be undone with 'restore'.",
                page + 1
            ),
        };
        if !confirm.confirm("Remove Page", &message) {
            return Ok(false);
        }

        self.mutate(|order| order.remove(page))
    }

    /// Clear the removed mark on `page`.
    pub fn restore(&mut self, page: usize) -> Result<bool> {
        self.mutate(|order| order.restore(page))
    }

    /// Restore identity order and every removed page after asking `confirm`.
    pub fn reset(&mut self, confirm: &mut dyn Confirm) -> Result<bool> {
        self.session()?;
        let confirmed = confirm.confirm(
            "Reset Order",
            "Reset all changes and restore original page order?\n\n\
             This will undo all reordering and restore all removed pages.",
        );
        if !confirmed {
            return Ok(false);
        }

        self.mutate(|order| {
            order.reset();
            true
        })
    }

    /// Write the active sequence to `output`, or to `{stem}_organized.pdf`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No document is open
    /// - Every page is removed (nothing is written)
    /// - Writing fails
    pub async fn save(&self, output: Option<&Path>) -> Result<SaveSummary> {
        let session = self.session()?;
        let document = session.build_output()?;
        let output = output
            .map(Path::to_path_buf)
            .unwrap_or_else(|| session.default_output_path());

        let statistics = self.writer.save_with_stats(&document, &output).await?;

        let order = session.order();
        Ok(SaveSummary {
            output,
            original_pages: order.page_count(),
            final_pages: order.active_len(),
            removed_pages: order.removed_len(),
            reordered: order.is_reordered(),
            statistics,
        })
    }

    fn mutate(&mut self, change: impl FnOnce(&mut PageOrder) -> bool) -> Result<bool> {
        let session = self.session.as_mut().ok_or(SoPdfError::NoDocumentLoaded)?;
        let changed = change(session.order_mut());
        self.views.render(self.session.as_ref());
        Ok(changed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{mediabox_widths, write_sample_pdf};
    use crate::view::{Binding, PageView};
    use lopdf::Document;
    use tempfile::TempDir;

    struct Recording {
        answer: bool,
        asked: Vec<String>,
    }

    impl Confirm for Recording {
        fn confirm(&mut self, title: &str, message: &str) -> bool {
            self.asked.push(format!("{title}: {message}"));
            self.answer
        }
    }

    async fn open_sample(pages: usize) -> (TempDir, Organizer) {
        let temp_dir = TempDir::new().unwrap();
        let path = write_sample_pdf(temp_dir.path(), "doc.pdf", pages);
        let mut organizer = Organizer::new();
        organizer.open(&path).await.unwrap();
        (temp_dir, organizer)
    }

    #[tokio::test]
    async fn test_mutations_require_document() {
        let mut organizer = Organizer::new();

        assert!(matches!(
            organizer.move_page(0, 1),
            Err(SoPdfError::NoDocumentLoaded)
        ));
        assert!(matches!(
            organizer.reset(&mut AutoConfirm(true)),
            Err(SoPdfError::NoDocumentLoaded)
        ));
        assert!(matches!(
            organizer.save(None).await,
            Err(SoPdfError::NoDocumentLoaded)
        ));
        assert_eq!(organizer.status(), "No file loaded");
    }

    #[tokio::test]
    async fn test_every_mutation_rerenders() {
        let (_dir, mut organizer) = open_sample(5).await;
        let before = organizer.views().render_count();

        organizer.move_page(4, 0).unwrap();
        assert_eq!(organizer.views().render_count(), before + 1);
        assert_eq!(organizer.views().list().lines()[0], "Page 1 (OG: 5)");

        organizer.remove(2, &mut AutoConfirm(true)).unwrap();
        assert_eq!(organizer.views().render_count(), before + 2);
        assert_eq!(organizer.status(), "4/5 pages • 1 removed • Reordered");
        assert_eq!(
            organizer.views().list().binding(6),
            Some(Binding::Removed(2))
        );
    }

    #[tokio::test]
    async fn test_declined_remove_is_noop() {
        let (_dir, mut organizer) = open_sample(3).await;
        let mut confirm = Recording {
            answer: false,
            asked: Vec::new(),
        };

        assert!(!organizer.remove(1, &mut confirm).unwrap());
        assert!(!organizer.session().unwrap().order().is_removed(1));
        assert_eq!(confirm.asked.len(), 1);
        assert!(confirm.asked[0].starts_with("Remove Page: Remove page 2?"));
    }

    #[tokio::test]
    async fn test_remove_prompt_mentions_original_number() {
        let (_dir, mut organizer) = open_sample(3).await;
        organizer.move_page(2, 0).unwrap();
        let mut confirm = Recording {
            answer: true,
            asked: Vec::new(),
        };

        assert!(organizer.remove(2, &mut confirm).unwrap());
        assert!(confirm.asked[0].contains("Remove page 1 (originally page 3)?"));

        // Already removed: no prompt.
        assert!(!organizer.remove(2, &mut confirm).unwrap());
        assert_eq!(confirm.asked.len(), 1);
    }

    #[tokio::test]
    async fn test_reset_needs_confirmation() {
        let (_dir, mut organizer) = open_sample(3).await;
        organizer.move_page(2, 0).unwrap();

        assert!(!organizer.reset(&mut AutoConfirm(false)).unwrap());
        assert!(organizer.session().unwrap().order().is_reordered());

        assert!(organizer.reset(&mut AutoConfirm(true)).unwrap());
        assert_eq!(organizer.session().unwrap().order(), &PageOrder::new(3));
    }

    #[tokio::test]
    async fn test_save_writes_active_sequence() {
        let (dir, mut organizer) = open_sample(5).await;
        organizer.move_page(4, 0).unwrap();
        organizer.remove(2, &mut AutoConfirm(true)).unwrap();

        let summary = organizer.save(None).await.unwrap();
        assert_eq!(summary.output, dir.path().join("doc_organized.pdf"));
        assert_eq!(summary.original_pages, 5);
        assert_eq!(summary.final_pages, 4);
        assert_eq!(summary.removed_pages, 1);
        assert!(summary.reordered);

        let saved = Document::load(&summary.output).unwrap();
        assert_eq!(mediabox_widths(&saved), vec![204, 200, 201, 203]);
    }

    #[tokio::test]
    async fn test_save_with_nothing_active_writes_nothing() {
        let (dir, mut organizer) = open_sample(2).await;
        organizer.remove(0, &mut AutoConfirm(true)).unwrap();
        organizer.remove(1, &mut AutoConfirm(true)).unwrap();

        let output = dir.path().join("out.pdf");
        let result = organizer.save(Some(&output)).await;

        assert!(matches!(result, Err(SoPdfError::NoActivePages)));
        assert!(!output.exists());
    }

    #[tokio::test]
    async fn test_failed_open_keeps_session() {
        let (dir, mut organizer) = open_sample(2).await;
        let missing = dir.path().join("missing.pdf");

        assert!(organizer.open(&missing).await.is_err());
        assert_eq!(organizer.session().unwrap().page_count(), 2);
    }

    #[tokio::test]
    async fn test_clear_resets_views() {
        let (_dir, mut organizer) = open_sample(2).await;
        assert!(!organizer.views().grid().cache().is_empty());

        organizer.clear();
        assert!(!organizer.is_loaded());
        assert!(organizer.views().list().lines().is_empty());
        assert!(organizer.views().grid().cache().is_empty());
        assert_eq!(organizer.status(), "No file loaded");
    }
}
