//! Ordered list of files queued for merging.

use std::path::{Path, PathBuf};

use crate::error::{Result, SoPdfError};

/// Minimum number of files a merge needs.
pub const MIN_MERGE_FILES: usize = 2;

/// Files to merge, in output order. Each path appears at most once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeList {
    paths: Vec<PathBuf>,
}

impl MergeList {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `path` unless it is already queued. Returns whether it was added.
    pub fn add(&mut self, path: impl Into<PathBuf>) -> bool {
        let path = path.into();
        if self.contains(&path) {
            tracing::debug!(path = %path.display(), "already in merge list");
            return false;
        }
        self.paths.push(path);
        true
    }

    /// Append several paths, skipping duplicates. Returns how many were added.
    pub fn extend<I>(&mut self, paths: I) -> usize
    where
        I: IntoIterator,
        I::Item: Into<PathBuf>,
    {
        let mut added = 0;
        for path in paths {
            if self.add(path) {
                added += 1;
            }
        }
        added
    }

    /// Remove and return the entry at `index`.
    pub fn remove(&mut self, index: usize) -> Option<PathBuf> {
        (index < self.paths.len()).then(|| self.paths.remove(index))
    }

    /// Swap the entry at `index` with the one before it.
    pub fn move_up(&mut self, index: usize) -> bool {
        if index == 0 || index >= self.paths.len() {
            return false;
        }
        self.paths.swap(index - 1, index);
        true
    }

    /// Swap the entry at `index` with the one after it.
    pub fn move_down(&mut self, index: usize) -> bool {
        if index + 1 >= self.paths.len() {
            return false;
        }
        self.paths.swap(index, index + 1);
        true
    }

    /// Empty the list.
    pub fn clear(&mut self) {
        self.paths.clear();
    }

    /// Whether `path` is queued.
    pub fn contains(&self, path: &Path) -> bool {
        self.paths.iter().any(|queued| queued == path)
    }

    /// Queued paths in order.
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    /// Number of queued paths.
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Whether nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Check that there is enough to merge.
    ///
    /// # Errors
    ///
    /// Returns [`SoPdfError::NotEnoughFiles`] with fewer than two entries.
    pub fn ensure_mergeable(&self) -> Result<()> {
        if self.paths.len() < MIN_MERGE_FILES {
            return Err(SoPdfError::NotEnoughFiles {
                count: self.paths.len(),
            });
        }
        Ok(())
    }
}

impl<P: Into<PathBuf>> FromIterator<P> for MergeList {
    fn from_iter<I: IntoIterator<Item = P>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}
