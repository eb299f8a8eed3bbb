//! Page-order model for the organize workflow.
//!
//! A [`PageOrder`] holds two pieces of state for a loaded document:
//! - the current arrangement, always a permutation of `0..page_count`
//! - the set of pages marked as removed
//!
//! Removing a page never takes it out of the arrangement; it only marks it.
//! The output sequence is derived on demand by [`PageOrder::active_sequence`].
//!
//! Page arguments are 0-based original page indices. Passing an index
//! outside `0..page_count` is a caller bug and panics.

use std::collections::BTreeSet;

/// Current arrangement and removal state of a document's pages.
///
/// `Default` is the model of an empty document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageOrder {
    order: Vec<usize>,
    removed: BTreeSet<usize>,
}

impl PageOrder {
    /// Identity order over `page_count` pages with nothing removed.
    pub fn new(page_count: usize) -> Self {
        Self {
            order: (0..page_count).collect(),
            removed: BTreeSet::new(),
        }
    }

    /// Total number of pages, removed ones included.
    pub fn page_count(&self) -> usize {
        self.order.len()
    }

    /// Full arrangement, removed pages included.
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Removed pages in ascending original order.
    pub fn removed(&self) -> &BTreeSet<usize> {
        &self.removed
    }

    /// Number of removed pages.
    pub fn removed_len(&self) -> usize {
        self.removed.len()
    }

    /// Whether `page` is marked as removed.
    pub fn is_removed(&self, page: usize) -> bool {
        self.check(page);
        self.removed.contains(&page)
    }

    /// Pages that will be written on save, in output order.
    ///
    /// Recomputed on every call.
    ///
    /// ```
    /// use sopdf::PageOrder;
    ///
    /// let mut order = PageOrder::new(4);
    /// order.remove(1);
    /// assert_eq!(order.active_sequence(), vec![0, 2, 3]);
    /// ```
    pub fn active_sequence(&self) -> Vec<usize> {
        self.order
            .iter()
            .copied()
            .filter(|page| !self.removed.contains(page))
            .collect()
    }

    /// Number of pages that will be written on save.
    pub fn active_len(&self) -> usize {
        self.order.len() - self.removed.len()
    }

    /// Position of `page` within the full arrangement.
    pub fn position_of(&self, page: usize) -> usize {
        self.check(page);
        self.order
            .iter()
            .position(|&candidate| candidate == page)
            .unwrap_or_else(|| unreachable!("page order is a permutation"))
    }

    /// 0-based display position of `page` among active pages, if active.
    pub fn active_position(&self, page: usize) -> Option<usize> {
        if self.is_removed(page) {
            return None;
        }
        self.order
            .iter()
            .filter(|candidate| !self.removed.contains(*candidate))
            .position(|&candidate| candidate == page)
    }

    /// Move `page` next to `target`.
    ///
    /// The page is taken out of the arrangement and reinserted directly after
    /// `target` when it was in front of it, or directly before `target`
    /// otherwise. Every other page keeps its relative order.
    ///
    /// Does nothing when `page == target` or either page is removed.
    /// Returns whether the arrangement changed.
    ///
    /// ```
    /// use sopdf::PageOrder;
    ///
    /// let mut order = PageOrder::new(5);
    /// assert!(order.move_page(4, 0));
    /// assert_eq!(order.order(), &[4, 0, 1, 2, 3]);
    ///
    /// assert!(order.move_page(4, 3));
    /// assert_eq!(order.order(), &[0, 1, 2, 3, 4]);
    /// ```
    pub fn move_page(&mut self, page: usize, target: usize) -> bool {
        if page == target || self.is_removed(page) || self.is_removed(target) {
            return false;
        }

        let source_pos = self.position_of(page);
        let target_pos = self.position_of(target);

        // Moving forward, `target` shifts left by one, so `target_pos` is the
        // slot just after it. Moving backward, it is the slot just before it.
        self.order.remove(source_pos);
        self.order.insert(target_pos, page);

        tracing::debug!(page, target, order = ?self.order, "moved page");
        true
    }

    /// Move the page shown at active position `from` onto active position `to`.
    ///
    /// Returns whether the arrangement changed; out-of-range positions do nothing.
    pub fn move_to_position(&mut self, from: usize, to: usize) -> bool {
        let active = self.active_sequence();
        match (active.get(from), active.get(to)) {
            (Some(&page), Some(&target)) => self.move_page(page, target),
            _ => false,
        }
    }

    /// Swap `page` with the active page displayed before it.
    pub fn move_up(&mut self, page: usize) -> bool {
        match self.active_position(page) {
            Some(pos) if pos > 0 => self.swap_active(pos, pos - 1),
            _ => false,
        }
    }

    /// Swap `page` with the active page displayed after it.
    pub fn move_down(&mut self, page: usize) -> bool {
        match self.active_position(page) {
            Some(pos) if pos + 1 < self.active_len() => self.swap_active(pos, pos + 1),
            _ => false,
        }
    }

    fn swap_active(&mut self, a: usize, b: usize) -> bool {
        let active = self.active_sequence();
        let first = self.position_of(active[a]);
        let second = self.position_of(active[b]);
        self.order.swap(first, second);
        tracing::debug!(order = ?self.order, "swapped pages");
        true
    }

    /// Mark `page` as removed. Returns `false` if it already was.
    pub fn remove(&mut self, page: usize) -> bool {
        self.check(page);
        let changed = self.removed.insert(page);
        if changed {
            tracing::debug!(page, "removed page");
        }
        changed
    }

    /// Clear the removed mark on `page`. Returns `false` if it was not removed.
    ///
    /// The page reappears at its recorded place in the arrangement.
    pub fn restore(&mut self, page: usize) -> bool {
        self.check(page);
        let changed = self.removed.remove(&page);
        if changed {
            tracing::debug!(page, "restored page");
        }
        changed
    }

    /// Back to identity order with nothing removed.
    pub fn reset(&mut self) {
        let page_count = self.order.len();
        self.order = (0..page_count).collect();
        self.removed.clear();
        tracing::debug!(page_count, "reset page order");
    }

    /// Whether the active pages are in a different order than in the source.
    pub fn is_reordered(&self) -> bool {
        let original = (0..self.order.len()).filter(|page| !self.removed.contains(page));
        !self.active_sequence().into_iter().eq(original)
    }

    fn check(&self, page: usize) {
        assert!(
            page < self.order.len(),
            "page index {page} out of range for {} pages",
            self.order.len()
        );
    }
}
