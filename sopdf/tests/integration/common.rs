//! Shared helpers for the integration tests.
//!
//! Fixtures are generated on the fly: page `i` of every generated PDF has a
//! MediaBox `BASE_WIDTH + i` points wide, so the order of pages in an output
//! file can be read back from their widths.

#![allow(dead_code)]

use lopdf::{Document, Object, ObjectId, Stream, dictionary};
use std::path::{Path, PathBuf};

/// Width of the first page of a generated PDF.
pub const BASE_WIDTH: i64 = 200;

fn page(doc: &mut Document, parent: ObjectId, index: usize, media_box: bool) -> Object {
    let content = format!("BT /F1 12 Tf 20 20 Td (Page {}) Tj ET", index + 1);
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));
    let mut page = dictionary! {
        "Type" => "Page",
        "Parent" => parent,
        "Contents" => content_id,
    };
    if media_box {
        page.set(
            "MediaBox",
            vec![0.into(), 0.into(), (BASE_WIDTH + index as i64).into(), 300.into()],
        );
    }
    Object::Reference(doc.add_object(page))
}

fn finish(mut doc: Document, pages_id: ObjectId, kids: Vec<Object>, count: usize, dir: &Path, name: &str) -> PathBuf {
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count as i64,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let path = dir.join(name);
    doc.save(&path).expect("failed to write fixture");
    path
}

/// Write a flat PDF with `pages` pages to `dir/name`.
pub fn write_pdf(dir: &Path, name: &str, pages: usize) -> PathBuf {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let kids = (0..pages)
        .map(|index| page(&mut doc, pages_id, index, true))
        .collect();
    finish(doc, pages_id, kids, pages, dir, name)
}

/// Write a PDF whose pages inherit MediaBox and Rotate from an
/// intermediate Pages node. Every page is `BASE_WIDTH` wide.
pub fn write_nested_pdf(dir: &Path, name: &str, pages: usize) -> PathBuf {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let branch_id = doc.new_object_id();
    let kids: Vec<Object> = (0..pages)
        .map(|index| page(&mut doc, branch_id, index, false))
        .collect();
    doc.objects.insert(
        branch_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Parent" => pages_id,
            "Kids" => kids,
            "Count" => pages as i64,
            "Rotate" => 90,
            "MediaBox" => vec![0.into(), 0.into(), BASE_WIDTH.into(), 300.into()],
        }),
    );
    finish(doc, pages_id, vec![Object::Reference(branch_id)], pages, dir, name)
}

/// Write a structurally valid PDF with an empty page tree.
pub fn write_empty_pdf(dir: &Path, name: &str) -> PathBuf {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    finish(doc, pages_id, Vec::new(), 0, dir, name)
}

/// Write a file that is not a PDF.
pub fn write_text_file(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, "just some text\n").expect("failed to write fixture");
    path
}

/// Look up an inheritable page attribute, walking up the page tree.
pub fn page_attribute<'a>(doc: &'a Document, page_id: ObjectId, key: &[u8]) -> Option<&'a Object> {
    let mut node = doc.get_dictionary(page_id).ok()?;
    loop {
        if let Ok(value) = node.get(key) {
            return Some(value);
        }
        let parent = node.get(b"Parent").ok()?.as_reference().ok()?;
        node = doc.get_dictionary(parent).ok()?;
    }
}

/// MediaBox widths of the pages of the PDF at `path`, in page order.
pub fn page_widths(path: &Path) -> Vec<i64> {
    let doc = Document::load(path).expect("failed to load output");
    doc.get_pages()
        .into_values()
        .map(|page_id| {
            let media_box = page_attribute(&doc, page_id, b"MediaBox").expect("page has no MediaBox");
            media_box.as_array().expect("MediaBox is not an array")[2]
                .as_i64()
                .expect("MediaBox width is not an integer")
        })
        .collect()
}
