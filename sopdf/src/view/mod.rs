//! Views over the page-order model.
//!
//! Views are read-only presentations of a [`PageLayout`]. They never touch
//! the model; after every mutation the [`ViewSynchronizer`] rebuilds each
//! registered view from scratch, including its bindings from display rows or
//! grid cells back to page indices.
//!
//! # Examples
//!
//! ```
//! use sopdf::PageOrder;
//! use sopdf::view::{ListView, PageLayout, PageView};
//!
//! let mut order = PageOrder::new(3);
//! order.remove(0);
//!
//! let mut list = ListView::new();
//! list.render(&PageLayout::from_order(&order), None);
//! assert_eq!(list.lines()[0], "Page 1 (OG: 2)");
//! ```

pub mod grid;
pub mod layout;
pub mod list;
pub mod thumbnail;

pub use grid::GridView;
pub use layout::{ActiveEntry, NO_FILE_STATUS, PageLayout, REMOVED_HEADER};
pub use list::ListView;
pub use thumbnail::{MediaBoxRasterizer, PageRasterizer, Thumbnail, ThumbnailCache, ThumbnailSize};

use crate::organize::DocumentSession;

/// What a display row or grid cell refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    /// An active page, by 0-based original index.
    Active(usize),
    /// A removed page, by 0-based original index.
    Removed(usize),
}

impl Binding {
    /// The 0-based original page index.
    pub fn page(&self) -> usize {
        match *self {
            Binding::Active(page) | Binding::Removed(page) => page,
        }
    }
}

/// A presentation of the page layout.
pub trait PageView {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Rebuild the view from `layout`. Must be idempotent.
    fn render(&mut self, layout: &PageLayout, rasterizer: Option<&dyn PageRasterizer>);

    /// Drop all rows and bindings.
    fn clear(&mut self);

    /// Forget anything derived from the current document.
    fn invalidate(&mut self) {}

    /// Rendered text, one entry per display row.
    fn lines(&self) -> &[String];
}

/// Keeps every view consistent with the model.
#[derive(Debug, Default)]
pub struct ViewSynchronizer {
    list: ListView,
    grid: GridView,
    layout: PageLayout,
    renders: u64,
}

impl ViewSynchronizer {
    /// Create a synchronizer with default list and grid views.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a synchronizer whose grid fits a window `width` pixels wide.
    pub fn with_window_width(width: u32) -> Self {
        let mut views = Self::default();
        views.grid.fit_to_width(width);
        views
    }

    /// Regenerate every view from `session`, or clear them if `None`.
    pub fn render(&mut self, session: Option<&DocumentSession>) {
        self.renders += 1;

        let Some(session) = session else {
            self.layout = PageLayout::empty();
            for view in self.views_mut() {
                view.clear();
            }
            tracing::debug!("cleared views");
            return;
        };

        self.layout = PageLayout::from_order(session.order());
        let rasterizer = session.rasterizer();
        let rasterizer: &dyn PageRasterizer = &rasterizer;
        let layout = &self.layout;
        for view in [
            &mut self.list as &mut dyn PageView,
            &mut self.grid as &mut dyn PageView,
        ] {
            view.render(layout, Some(rasterizer));
            tracing::trace!(view = view.name(), rows = view.lines().len(), "rendered view");
        }
    }

    /// Drop cached data derived from the previous document.
    pub fn invalidate(&mut self) {
        for view in self.views_mut() {
            view.invalidate();
        }
    }

    /// Resize the grid for a window `width` pixels wide.
    pub fn fit_to_width(&mut self, width: u32) {
        self.grid.fit_to_width(width);
    }

    fn views_mut(&mut self) -> [&mut dyn PageView; 2] {
        [&mut self.list, &mut self.grid]
    }

    /// The text list view.
    pub fn list(&self) -> &ListView {
        &self.list
    }

    /// The thumbnail grid view.
    pub fn grid(&self) -> &GridView {
        &self.grid
    }

    /// Layout of the last render.
    pub fn layout(&self) -> &PageLayout {
        &self.layout
    }

    /// Status line of the last render.
    pub fn status(&self) -> String {
        self.layout.status_line()
    }

    /// How many times [`ViewSynchronizer::render`] has run.
    pub fn render_count(&self) -> u64 {
        self.renders
    }
}
