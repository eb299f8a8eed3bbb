//! Page tree assembly.
//!
//! Organize-save, split and merge all produce documents whose page tree is a
//! flat list of chosen pages. This module handles:
//! - Extracting an ordered selection of pages into a new document
//! - Appending every page of one document onto another
//! - Copying inheritable attributes down from intermediate tree nodes

use lopdf::{Document, Object, ObjectId};

use crate::error::{Result, SoPdfError};

/// Page attributes a page may inherit from its ancestors in the page tree.
const INHERITABLE_KEYS: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Catalog entries that refer to the old page numbering.
const STALE_CATALOG_KEYS: [&[u8]; 2] = [b"Outlines", b"PageLabels"];

/// Guard against malformed trees whose `Parent` links form a cycle.
const MAX_TREE_DEPTH: usize = 64;

/// Builds flat page trees from existing documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct PageAssembler;

impl PageAssembler {
    /// Create a new page assembler.
    pub fn new() -> Self {
        Self
    }

    /// Build a new document holding `indices` (0-based) of `source`, in that order.
    ///
    /// The outline and page labels of the source are dropped because they
    /// describe the old page sequence. Objects no longer reachable from the
    /// trailer are pruned.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `indices` is empty
    /// - An index is outside the source's page range
    /// - The page tree is malformed
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use sopdf::pages::PageAssembler;
    /// # use lopdf::Document;
    /// # fn example(doc: Document) -> Result<(), Box<dyn std::error::Error>> {
    /// // Reverse a three page document.
    /// let reversed = PageAssembler::new().extract(&doc, &[2, 1, 0])?;
    /// assert_eq!(reversed.get_pages().len(), 3);
    /// # Ok(())
    /// # }
    /// ```
    pub fn extract(&self, source: &Document, indices: &[usize]) -> Result<Document> {
        if indices.is_empty() {
            return Err(SoPdfError::NoActivePages);
        }

        let all_pages: Vec<ObjectId> = source.get_pages().into_values().collect();
        let selected = indices
            .iter()
            .map(|&index| {
                all_pages.get(index).copied().ok_or_else(|| {
                    SoPdfError::page_tree(format!(
                        "page index {index} out of range for {} pages",
                        all_pages.len()
                    ))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let mut doc = source.clone();
        let root = root_pages_id(&doc)?;

        for &page_id in &selected {
            flatten_page(&mut doc, page_id, root)?;
        }

        let pages = doc.get_dictionary_mut(root)?;
        pages.set(
            "Kids",
            selected
                .iter()
                .map(|&id| Object::Reference(id))
                .collect::<Vec<_>>(),
        );
        pages.set("Count", selected.len() as i64);

        let catalog = doc.catalog_mut()?;
        for key in STALE_CATALOG_KEYS {
            catalog.remove(key);
        }

        let pruned = doc.prune_objects();
        tracing::debug!(
            pages = selected.len(),
            pruned = pruned.len(),
            "assembled page tree"
        );

        Ok(doc)
    }

    /// Append every page of `source` to the end of `target`'s page tree.
    ///
    /// Source objects are renumbered above `target.max_id` before being
    /// copied, so the two object sets never collide. The source's own catalog
    /// and page tree nodes come along unreferenced; call
    /// [`Document::prune_objects`] on the target once all documents are in.
    ///
    /// Returns the number of pages appended.
    ///
    /// # Errors
    ///
    /// Returns an error if either page tree is malformed.
    pub fn append(&self, target: &mut Document, source: &Document) -> Result<usize> {
        let target_root = root_pages_id(target)?;

        let mut doc = source.clone();
        doc.renumber_objects_with(target.max_id + 1);

        let page_ids: Vec<ObjectId> = doc.get_pages().into_values().collect();
        for &page_id in &page_ids {
            flatten_page(&mut doc, page_id, target_root)?;
        }

        target.max_id = target.max_id.max(doc.max_id);
        target.objects.extend(doc.objects);

        let pages = target.get_dictionary_mut(target_root)?;
        let kids = pages
            .get_mut(b"Kids")
            .and_then(Object::as_array_mut)
            .map_err(|_| SoPdfError::page_tree("root Pages node has no Kids array"))?;
        kids.extend(page_ids.iter().map(|&id| Object::Reference(id)));

        let count = pages.get(b"Count").and_then(Object::as_i64).unwrap_or(0);
        pages.set("Count", count + page_ids.len() as i64);

        Ok(page_ids.len())
    }
}

/// Object id of the document's root `Pages` node.
pub fn root_pages_id(doc: &Document) -> Result<ObjectId> {
    doc.catalog()
        .and_then(|catalog| catalog.get(b"Pages"))
        .and_then(Object::as_reference)
        .map_err(|err| SoPdfError::page_tree(format!("missing root Pages node: {err}")))
}

/// Copy inherited attributes onto `page_id` and re-parent it under `root`.
fn flatten_page(doc: &mut Document, page_id: ObjectId, root: ObjectId) -> Result<()> {
    let mut inherited: Vec<(Vec<u8>, Object)> = Vec::new();

    {
        let page = doc.get_dictionary(page_id)?;
        let mut missing: Vec<&[u8]> = INHERITABLE_KEYS
            .into_iter()
            .filter(|key| !page.has(key))
            .collect();
        let mut parent = page.get(b"Parent").and_then(Object::as_reference).ok();
        let mut depth = 0;

        while let Some(node_id) = parent {
            if missing.is_empty() || depth >= MAX_TREE_DEPTH {
                break;
            }
            let node = doc.get_dictionary(node_id)?;
            missing.retain(|key| match node.get(key) {
                Ok(value) => {
                    inherited.push((key.to_vec(), value.clone()));
                    false
                }
                Err(_) => true,
            });
            parent = node.get(b"Parent").and_then(Object::as_reference).ok();
            depth += 1;
        }
    }

    let page = doc.get_dictionary_mut(page_id)?;
    for (key, value) in inherited {
        page.set(key, value);
    }
    page.set("Parent", root);

    Ok(())
}
