//! Thumbnail grid view.

use super::layout::{PageLayout, REMOVED_HEADER, removed_label};
use super::thumbnail::{PageRasterizer, Thumbnail, ThumbnailCache, ThumbnailSize};
use super::{Binding, PageView};

/// Horizontal space around each thumbnail, in pixels.
const CELL_SPACING: u32 = 20;
/// Characters per grid cell, caption included.
const CELL_CHARS: usize = 18;
/// Pixel width of one character of the ASCII rendering.
const PIXELS_PER_COLUMN: u32 = 10;
/// Pixel height of one line of the ASCII rendering.
const PIXELS_PER_ROW: u32 = 20;

/// Active pages laid out as thumbnails, row by row, followed by the
/// captions of removed pages.
#[derive(Debug)]
pub struct GridView {
    size: ThumbnailSize,
    columns: usize,
    cache: ThumbnailCache,
    cells: Vec<Binding>,
    lines: Vec<String>,
}

impl GridView {
    /// Create a grid with `columns` thumbnails per row.
    pub fn new(size: ThumbnailSize, columns: usize) -> Self {
        Self {
            size,
            columns: columns.max(1),
            cache: ThumbnailCache::new(),
            cells: Vec::new(),
            lines: Vec::new(),
        }
    }

    /// Number of columns that fit in a window `width` pixels wide.
    pub fn columns_for_width(width: u32, size: ThumbnailSize) -> usize {
        let usable = width.saturating_sub(CELL_SPACING);
        ((usable / (size.width + CELL_SPACING)) as usize).max(1)
    }

    /// Recompute the column count for a window `width` pixels wide.
    pub fn fit_to_width(&mut self, width: u32) {
        self.columns = Self::columns_for_width(width, self.size);
    }

    /// Thumbnails per row.
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Thumbnail size.
    pub fn thumbnail_size(&self) -> ThumbnailSize {
        self.size
    }

    /// Page shown in the 0-based `cell`, counting row by row.
    ///
    /// Removed pages are numbered after every active page.
    pub fn cell(&self, cell: usize) -> Option<Binding> {
        self.cells.get(cell).copied()
    }

    /// Active page shown at `row`, `column` of the thumbnail section.
    pub fn cell_at(&self, row: usize, column: usize) -> Option<Binding> {
        if column >= self.columns {
            return None;
        }
        self.cell(row * self.columns + column)
            .filter(|binding| matches!(binding, Binding::Active(_)))
    }

    /// Thumbnail cache backing this grid.
    pub fn cache(&self) -> &ThumbnailCache {
        &self.cache
    }

    fn render_cell(&mut self, page: usize, rasterizer: Option<&dyn PageRasterizer>) -> Vec<String> {
        let columns = (self.size.width / PIXELS_PER_COLUMN).max(1) as usize;
        let rows = (self.size.height / PIXELS_PER_ROW).max(1) as usize;

        match rasterizer {
            Some(rasterizer) => self
                .cache
                .get_or_render(page, self.size, rasterizer)
                .to_ascii(columns, rows),
            None => Thumbnail::placeholder(self.size).to_ascii(columns, rows),
        }
    }

    fn push_row(&mut self, blocks: &[Vec<String>]) {
        let height = blocks.iter().map(Vec::len).max().unwrap_or(0);
        for line in 0..height {
            let joined = blocks
                .iter()
                .map(|block| {
                    let text = block.get(line).map(String::as_str).unwrap_or("");
                    format!("{text:<CELL_CHARS$}")
                })
                .collect::<String>();
            self.lines.push(joined.trim_end().to_string());
        }
    }
}

impl Default for GridView {
    fn default() -> Self {
        let size = ThumbnailSize::default();
        Self::new(size, GridView::columns_for_width(1200, size))
    }
}

impl PageView for GridView {
    fn name(&self) -> &'static str {
        "grid"
    }

    fn render(&mut self, layout: &PageLayout, rasterizer: Option<&dyn PageRasterizer>) {
        self.clear();

        let entries = layout.active.clone();
        for row in entries.chunks(self.columns) {
            let mut blocks = Vec::with_capacity(row.len());
            for entry in row {
                let mut block = self.render_cell(entry.page, rasterizer);
                block.push(entry.label());
                blocks.push(block);
                self.cells.push(Binding::Active(entry.page));
            }
            self.push_row(&blocks);
            self.lines.push(String::new());
        }

        if layout.removed.is_empty() {
            return;
        }

        self.lines.push(REMOVED_HEADER.to_string());
        for row in layout.removed.chunks(self.columns) {
            let blocks: Vec<Vec<String>> = row
                .iter()
                .map(|&page| vec![removed_label(page)])
                .collect();
            self.cells
                .extend(row.iter().map(|&page| Binding::Removed(page)));
            self.push_row(&blocks);
        }
    }

    fn clear(&mut self) {
        self.cells.clear();
        self.lines.clear();
    }

    fn invalidate(&mut self) {
        self.cache.invalidate();
    }

    fn lines(&self) -> &[String] {
        &self.lines
    }
}
