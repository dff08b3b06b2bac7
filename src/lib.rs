//! An ordered set backed by a skip list.
//!
//! Values are kept in several linked levels of decreasing density. Level 0
//! links every value in order; each node also joins a random number of the
//! levels above it, drawn from a truncated geometric distribution. Searches
//! start on the highest level in use and drop a level whenever the next value
//! would overshoot, giving O(log n) expected insertion, lookup and removal
//! without any rebalancing.
//!
//! ```
//! use skipset::{NoDispose, SkipList};
//!
//! let mut set = SkipList::new(8, 0.5, |a: &i32, b: &i32| b.cmp(a), NoDispose)?;
//! for value in [3, 1, 2] {
//!     set.insert(value)?;
//! }
//! assert!(set.contains(&2));
//! assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec![3, 2, 1]);
//! # Ok::<(), skipset::SkipListError>(())
//! ```
//!
//! The list has no internal synchronization. Callers sharing it between
//! threads wrap it in a lock of their choosing.

mod comparator;
mod dispose;
mod error;
mod height_control;
mod iter;
mod node;
mod options;
mod skiplist;

pub use comparator::{Comparator, OrdComparator};
pub use dispose::{Dispose, NoDispose};
pub use error::{Result, SkipListError};
pub use height_control::{GeometricalGenerator, HeightControl};
pub use iter::Iter;
pub use options::{Options, DEFAULT_MAX_LEVEL, DEFAULT_PROBABILITY};
pub use skiplist::SkipList;
