//! PDF merging operations.
//!
//! This module provides:
//! - [`MergeList`], the ordered and duplicate-free queue of inputs
//! - [`Merger`], which concatenates whole documents in queue order
//!
//! # Examples
//!
//! ```no_run
//! use sopdf::merge::{MergeList, Merger};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut list = MergeList::new();
//! list.add("a.pdf");
//! list.add("b.pdf");
//! list.move_up(1);
//!
//! let result = Merger::new().merge_list(&list).await?;
//! println!("Merged {} pages", result.statistics.total_pages);
//! # Ok(())
//! # }
//! ```

pub mod list;
pub mod merger;

pub use list::{MIN_MERGE_FILES, MergeList};
pub use merger::{MergeResult, MergeStatistics, Merger};
