//! Text list view.

use super::layout::{PageLayout, REMOVED_HEADER, removed_label};
use super::thumbnail::PageRasterizer;
use super::{Binding, PageView};

/// One row per active page, followed by the removed section.
#[derive(Debug, Default)]
pub struct ListView {
    lines: Vec<String>,
    bindings: Vec<Option<Binding>>,
}

impl ListView {
    /// Create an empty list view.
    pub fn new() -> Self {
        Self::default()
    }

    /// What the 0-based `row` refers to, if anything.
    pub fn binding(&self, row: usize) -> Option<Binding> {
        self.bindings.get(row).copied().flatten()
    }

    /// Row bindings, parallel to [`PageView::lines`].
    pub fn bindings(&self) -> &[Option<Binding>] {
        &self.bindings
    }
}

impl PageView for ListView {
    fn name(&self) -> &'static str {
        "list"
    }

    fn render(&mut self, layout: &PageLayout, _rasterizer: Option<&dyn PageRasterizer>) {
        self.clear();

        for entry in &layout.active {
            self.lines.push(entry.label());
            self.bindings.push(Some(Binding::Active(entry.page)));
        }

        if !layout.removed.is_empty() {
            self.lines.push(String::new());
            self.bindings.push(None);
            self.lines.push(REMOVED_HEADER.to_string());
            self.bindings.push(None);

            for &page in &layout.removed {
                self.lines.push(removed_label(page));
                self.bindings.push(Some(Binding::Removed(page)));
            }
        }
    }

    fn clear(&mut self) {
        self.lines.clear();
        self.bindings.clear();
    }

    fn lines(&self) -> &[String] {
        &self.lines
    }
}
