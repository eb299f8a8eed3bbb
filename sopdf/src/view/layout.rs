//! Snapshot of what the views display.

use std::fmt::Write as _;

use crate::organize::PageOrder;

/// Heading of the removed-pages section of the list and the grid.
pub const REMOVED_HEADER: &str = "--- REMOVED PAGES ---";

/// Status line shown when no document is open.
pub const NO_FILE_STATUS: &str = "No file loaded";

/// An active page as displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveEntry {
    /// 1-based display position.
    pub position: usize,
    /// 0-based original page index.
    pub page: usize,
}

impl ActiveEntry {
    /// 1-based page number in the source document.
    pub fn original_number(&self) -> usize {
        self.page + 1
    }

    /// `Page {position} (OG: {original})`.
    pub fn label(&self) -> String {
        format!("Page {} (OG: {})", self.position, self.original_number())
    }
}

/// Label for a removed page, by 0-based index.
pub fn removed_label(page: usize) -> String {
    format!("❌ REMOVED: Page {}", page + 1)
}

/// Derived view data for one model state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageLayout {
    /// Active pages in output order.
    pub active: Vec<ActiveEntry>,
    /// Removed pages, ascending.
    pub removed: Vec<usize>,
    /// Total pages in the source document.
    pub page_count: usize,
    /// Whether the active pages are out of source order.
    pub reordered: bool,
    loaded: bool,
}

impl PageLayout {
    /// Layout for a loaded document.
    pub fn from_order(order: &PageOrder) -> Self {
        let active = order
            .active_sequence()
            .into_iter()
            .enumerate()
            .map(|(index, page)| ActiveEntry {
                position: index + 1,
                page,
            })
            .collect();

        Self {
            active,
            removed: order.removed().iter().copied().collect(),
            page_count: order.page_count(),
            reordered: order.is_reordered(),
            loaded: true,
        }
    }

    /// Layout with no document open.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether a document is open.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Active page at 1-based display `position`.
    pub fn active_at(&self, position: usize) -> Option<&ActiveEntry> {
        position
            .checked_sub(1)
            .and_then(|index| self.active.get(index))
    }

    /// `"{active}/{total} pages"` plus removal and reorder markers.
    pub fn status_line(&self) -> String {
        if !self.loaded {
            return NO_FILE_STATUS.to_string();
        }

        let mut status = format!("{}/{} pages", self.active.len(), self.page_count);
        if !self.removed.is_empty() {
            let _ = write!(status, " • {} removed", self.removed.len());
        }
        if self.reordered {
            status.push_str(" • Reordered");
        }
        status
    }
}
