//! Page thumbnails.
//!
//! Rasterization is behind the [`PageRasterizer`] trait. The shipped
//! [`MediaBoxRasterizer`] draws each page's silhouette (its MediaBox, turned
//! by its Rotate) without interpreting content streams. Results are kept in a
//! [`ThumbnailCache`] keyed by page and size.

use lopdf::{Document, Object, ObjectId};
use std::collections::HashMap;

use crate::error::{Result, SoPdfError};

/// Luminance of an empty pixel.
const PAPER: u8 = 255;
/// Luminance of the page outline.
const INK: u8 = 0;
/// Luminance of the placeholder fill.
const PLACEHOLDER_FILL: u8 = 192;

/// Characters used for terminal output, darkest first.
const RAMP: [char; 5] = ['#', '+', ':', '.', ' '];

/// Pixel dimensions of a thumbnail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ThumbnailSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl ThumbnailSize {
    /// Create a new size.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl Default for ThumbnailSize {
    fn default() -> Self {
        Self::new(120, 160)
    }
}

/// A grayscale raster, row-major, one byte per pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thumbnail {
    size: ThumbnailSize,
    pixels: Vec<u8>,
    placeholder: bool,
}

impl Thumbnail {
    /// A blank raster of `size`.
    pub fn blank(size: ThumbnailSize) -> Self {
        Self {
            size,
            pixels: vec![PAPER; (size.width * size.height) as usize],
            placeholder: false,
        }
    }

    /// The gray stand-in shown when a page cannot be rasterized.
    pub fn placeholder(size: ThumbnailSize) -> Self {
        Self {
            size,
            pixels: vec![PLACEHOLDER_FILL; (size.width * size.height) as usize],
            placeholder: true,
        }
    }

    /// Raster dimensions.
    pub fn size(&self) -> ThumbnailSize {
        self.size
    }

    /// Whether this is a placeholder rather than a rendered page.
    pub fn is_placeholder(&self) -> bool {
        self.placeholder
    }

    /// Luminance at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> u8 {
        self.pixels[(y * self.size.width + x) as usize]
    }

    fn set(&mut self, x: u32, y: u32, value: u8) {
        let index = (y * self.size.width + x) as usize;
        self.pixels[index] = value;
    }

    /// Downsample to `columns` x `rows` characters.
    ///
    /// Each character shows the darkest pixel of its block, so thin outlines
    /// survive the reduction.
    pub fn to_ascii(&self, columns: usize, rows: usize) -> Vec<String> {
        let columns = columns.max(1) as u32;
        let rows = rows.max(1) as u32;
        let (width, height) = (self.size.width.max(1), self.size.height.max(1));

        (0..rows)
            .map(|row| {
                let y0 = row * height / rows;
                let y1 = ((row + 1) * height / rows).max(y0 + 1).min(height);
                (0..columns)
                    .map(|column| {
                        let x0 = column * width / columns;
                        let x1 = ((column + 1) * width / columns).max(x0 + 1).min(width);
                        let darkest = (y0..y1)
                            .flat_map(|y| (x0..x1).map(move |x| (x, y)))
                            .filter(|&(x, y)| x < self.size.width && y < self.size.height)
                            .map(|(x, y)| self.pixel(x, y))
                            .min()
                            .unwrap_or(PAPER);
                        RAMP[usize::from(darkest) * (RAMP.len() - 1) / usize::from(PAPER)]
                    })
                    .collect()
            })
            .collect()
    }
}

/// Turns a page into a thumbnail.
pub trait PageRasterizer {
    /// Number of pages available.
    fn page_count(&self) -> usize;

    /// Rasterize the 0-based `page` into a raster of `size`.
    fn rasterize(&self, page: usize, size: ThumbnailSize) -> Result<Thumbnail>;
}

/// Draws page silhouettes from MediaBox and Rotate.
#[derive(Debug)]
pub struct MediaBoxRasterizer<'a> {
    document: &'a Document,
    pages: Vec<ObjectId>,
}

impl<'a> MediaBoxRasterizer<'a> {
    /// Create a rasterizer over `document`.
    pub fn new(document: &'a Document) -> Self {
        Self {
            document,
            pages: document.get_pages().into_values().collect(),
        }
    }

    /// Page dimensions in points after applying Rotate.
    pub fn page_dimensions(&self, page: usize) -> Result<(f32, f32)> {
        let page_id = self.pages.get(page).copied().ok_or_else(|| {
            SoPdfError::page_tree(format!(
                "page index {page} out of range for {} pages",
                self.pages.len()
            ))
        })?;

        let media_box = inherited(self.document, page_id, b"MediaBox")?
            .ok_or_else(|| SoPdfError::page_tree(format!("page {} has no MediaBox", page + 1)))?;
        let bounds = media_box
            .as_array()?
            .iter()
            .map(number)
            .collect::<Result<Vec<f32>>>()?;
        let [x0, y0, x1, y1] = bounds[..] else {
            return Err(SoPdfError::page_tree(format!(
                "page {} has a malformed MediaBox",
                page + 1
            )));
        };

        let rotate = match inherited(self.document, page_id, b"Rotate")? {
            Some(value) => value.as_i64().unwrap_or(0),
            None => 0,
        };

        let (width, height) = ((x1 - x0).abs(), (y1 - y0).abs());
        if rotate.rem_euclid(180) == 90 {
            Ok((height, width))
        } else {
            Ok((width, height))
        }
    }
}

impl PageRasterizer for MediaBoxRasterizer<'_> {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn rasterize(&self, page: usize, size: ThumbnailSize) -> Result<Thumbnail> {
        let (page_width, page_height) = self.page_dimensions(page)?;
        if page_width <= 0.0 || page_height <= 0.0 {
            return Err(SoPdfError::page_tree(format!(
                "page {} has an empty MediaBox",
                page + 1
            )));
        }

        if size.width == 0 || size.height == 0 {
            return Ok(Thumbnail::blank(size));
        }

        // Fit the page inside the raster, centered.
        let scale = (size.width as f32 / page_width).min(size.height as f32 / page_height);
        let drawn_width = ((page_width * scale).round() as u32).clamp(1, size.width);
        let drawn_height = ((page_height * scale).round() as u32).clamp(1, size.height);
        let left = (size.width - drawn_width) / 2;
        let top = (size.height - drawn_height) / 2;

        let mut thumbnail = Thumbnail::blank(size);
        for x in left..left + drawn_width {
            thumbnail.set(x, top, INK);
            thumbnail.set(x, top + drawn_height - 1, INK);
        }
        for y in top..top + drawn_height {
            thumbnail.set(left, y, INK);
            thumbnail.set(left + drawn_width - 1, y, INK);
        }

        Ok(thumbnail)
    }
}

/// Look `key` up on a page, then on its ancestors.
fn inherited<'d>(doc: &'d Document, page_id: ObjectId, key: &[u8]) -> Result<Option<&'d Object>> {
    let mut node = doc.get_dictionary(page_id)?;
    for _ in 0..64 {
        if let Ok(value) = node.get(key) {
            return Ok(Some(match value {
                Object::Reference(id) => doc.get_object(*id)?,
                other => other,
            }));
        }
        match node.get(b"Parent").and_then(Object::as_reference) {
            Ok(parent) => node = doc.get_dictionary(parent)?,
            Err(_) => return Ok(None),
        }
    }
    Ok(None)
}

fn number(object: &Object) -> Result<f32> {
    match object {
        Object::Integer(value) => Ok(*value as f32),
        Object::Real(value) => Ok(*value),
        other => Err(SoPdfError::page_tree(format!(
            "expected a number, found {other:?}"
        ))),
    }
}

/// Rendered thumbnails keyed by page and size.
#[derive(Debug, Default)]
pub struct ThumbnailCache {
    entries: HashMap<(usize, ThumbnailSize), Thumbnail>,
    hits: u64,
    misses: u64,
}

impl ThumbnailCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached thumbnail for `page`, rasterizing it on first use.
    ///
    /// A failed rasterization is logged and replaced by a placeholder, which
    /// is cached like any other thumbnail.
    pub fn get_or_render(
        &mut self,
        page: usize,
        size: ThumbnailSize,
        rasterizer: &dyn PageRasterizer,
    ) -> &Thumbnail {
        let key = (page, size);
        if self.entries.contains_key(&key) {
            self.hits += 1;
            tracing::trace!(page, "thumbnail cache hit");
        } else {
            self.misses += 1;
            tracing::debug!(page, "thumbnail cache miss");
            let thumbnail = rasterizer.rasterize(page, size).unwrap_or_else(|err| {
                tracing::warn!(page, error = %err, "failed to rasterize page");
                Thumbnail::placeholder(size)
            });
            self.entries.insert(key, thumbnail);
        }
        &self.entries[&key]
    }

    /// Drop every cached thumbnail.
    pub fn invalidate(&mut self) {
        if !self.entries.is_empty() {
            tracing::debug!(entries = self.entries.len(), "invalidating thumbnail cache");
        }
        self.entries.clear();
    }

    /// Number of cached thumbnails.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Lookups answered from the cache.
    pub fn hits(&self) -> u64 {
        self.hits
    }

    /// Lookups that had to rasterize.
    pub fn misses(&self) -> u64 {
        self.misses
    }
}
