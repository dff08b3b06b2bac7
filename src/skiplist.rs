use std::cmp::Ordering;
use std::fmt;
use std::marker::PhantomData;
use std::ptr::NonNull;

use log::{debug, trace, warn};

use crate::comparator::{Comparator, OrdComparator};
use crate::dispose::{Dispose, NoDispose};
use crate::error::{Result, SkipListError};
use crate::height_control::{GeometricalGenerator, HeightControl};
use crate::node::{Link, Node};
use crate::options::{Options, DEFAULT_MAX_LEVEL};

/// Where a descent currently stands: on the head, or on a real node.
enum Predecessor<T> {
    Head,
    Node(NonNull<Node<T>>),
}

impl<T> Clone for Predecessor<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Predecessor<T> {}

/// An ordered set of values kept in a skip list.
///
/// The order, and therefore what counts as a duplicate, is decided by the
/// comparator `C`. Values the list lets go of are handed to the disposer `D`
/// exactly once.
///
/// A comparator that only looks at part of the value turns the set into a
/// dictionary: entries are found by a probe carrying just the key.
///
/// ```
/// use skipset::{NoDispose, SkipList};
///
/// let by_key = |lhs: &(u32, &str), rhs: &(u32, &str)| lhs.0.cmp(&rhs.0);
/// let mut ports = SkipList::new(8, 0.5, by_key, NoDispose)?;
/// ports.insert((443, "https"))?;
/// ports.insert((22, "ssh"))?;
///
/// assert_eq!(ports.get(&(22, "")), Some(&(22, "ssh")));
/// // Same key, so this is a duplicate and the old entry stays.
/// assert!(!ports.insert((22, "telnet"))?);
/// assert_eq!(ports.get(&(22, "")).map(|entry| entry.1), Some("ssh"));
/// # Ok::<(), skipset::SkipListError>(())
/// ```
pub struct SkipList<T, C = OrdComparator, D: Dispose<T> = NoDispose> {
    /// Forward links of the head. The head is a value-less node which has the
    /// maximum possible height; every search begins here and `head_[0]` is
    /// the first element, if any. It is never removed nor compared.
    head_: Vec<Link<T>>,

    /// Number of elements in the SkipList
    length_: usize,

    /// Number of levels currently in use. Always within `1..=max_level_`,
    /// even when the list is empty.
    level_: usize,

    /// Maximum height the `controller_` can generate. Stored here so that
    /// descents don't need to go through the virtual call.
    max_level_: usize,

    /// Used to generate the height for any given node when inserting data.
    /// Only `insert` calls into it.
    controller_: Box<dyn HeightControl + Send>,

    comparator_: C,
    disposer_: D,

    _owns: PhantomData<Box<Node<T>>>,
}

// The list owns its nodes outright; raw links never escape it. `&self`
// methods never touch `controller_`.
unsafe impl<T: Send, C: Send, D: Send + Dispose<T>> Send for SkipList<T, C, D> {}
unsafe impl<T: Sync, C: Sync, D: Sync + Dispose<T>> Sync for SkipList<T, C, D> {}

impl<T: Ord> Default for SkipList<T> {
    fn default() -> Self {
        let controller: GeometricalGenerator = Default::default();

        SkipList {
            head_: vec![None; DEFAULT_MAX_LEVEL],
            length_: 0,
            level_: 1,
            max_level_: DEFAULT_MAX_LEVEL,
            controller_: Box::new(controller),
            comparator_: OrdComparator,
            disposer_: NoDispose,
            _owns: PhantomData,
        }
    }
}

impl<T, C: Comparator<T>, D: Dispose<T>> SkipList<T, C, D> {
    /// Creates an empty list whose nodes reach at most `max_level` levels,
    /// promoted with probability `probability`.
    pub fn new(max_level: usize, probability: f64, comparator: C, disposer: D) -> Result<Self> {
        Self::with_options(&Options::new(max_level, probability), comparator, disposer)
    }

    pub fn with_options(options: &Options, comparator: C, disposer: D) -> Result<Self> {
        let controller = GeometricalGenerator::from_options(options)?;
        Self::with_controller(Box::new(controller), comparator, disposer)
    }

    /// Creates an empty list drawing node heights from `controller`.
    pub fn with_controller(
        controller: Box<dyn HeightControl + Send>,
        comparator: C,
        disposer: D,
    ) -> Result<Self> {
        let max_level = controller.max_height();
        if max_level == 0 {
            return Err(SkipListError::InvalidMaxLevel(max_level));
        }

        let mut head_ = Vec::new();
        head_
            .try_reserve_exact(max_level)
            .map_err(|_| SkipListError::AllocationFailed { height: max_level })?;
        head_.resize(max_level, None);

        debug!("created skip list with max level {}", max_level);

        Ok(SkipList {
            head_,
            length_: 0,
            level_: 1,
            max_level_: max_level,
            controller_: controller,
            comparator_: comparator,
            disposer_: disposer,
            _owns: PhantomData,
        })
    }
}

impl<T, C, D: Dispose<T>> SkipList<T, C, D> {
    /// Returns the number of values stored in the structure.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.length_
    }

    /// Returns `true` if there are no values stored within the structure.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.length_ == 0
    }

    /// Number of levels currently in use, between 1 and `max_level`.
    #[inline(always)]
    pub fn level(&self) -> usize {
        self.level_
    }

    /// Returns the maximum reachable height of the SkipList.
    #[inline(always)]
    pub fn max_level(&self) -> usize {
        self.max_level_
    }

    /// Returns the smallest value, if any.
    pub fn first(&self) -> Option<&T> {
        self.head_[0].map(|node| unsafe { &*node.as_ptr() }.value())
    }

    pub(crate) fn head(&self) -> Link<T> {
        self.head_[0]
    }

    fn next(&self, at: Predecessor<T>, level: usize) -> Link<T> {
        match at {
            Predecessor::Head => self.head_[level],
            Predecessor::Node(node) => unsafe { node.as_ref() }.next(level),
        }
    }

    fn forward_mut(&mut self, at: Predecessor<T>, level: usize) -> &mut Link<T> {
        match at {
            Predecessor::Head => &mut self.head_[level],
            // Nodes are only reachable through this list, and `&mut self`
            // guarantees nobody else is looking at them.
            Predecessor::Node(node) => unsafe { (*node.as_ptr()).forward_mut(level) },
        }
    }

    /// Returns the largest value, if any.
    pub fn last(&self) -> Option<&T> {
        let mut current = Predecessor::Head;

        for level in (0..self.level_).rev() {
            while let Some(next) = self.next(current, level) {
                current = Predecessor::Node(next);
            }
        }

        match current {
            Predecessor::Head => None,
            Predecessor::Node(node) => Some(unsafe { &*node.as_ptr() }.value()),
        }
    }

    /// Lowers `level_` past any empty top levels, never below 1.
    fn shrink_level(&mut self) {
        let before = self.level_;
        while self.level_ > 1 && self.head_[self.level_ - 1].is_none() {
            self.level_ -= 1;
        }

        if self.level_ != before {
            trace!("level shrank from {} to {}", before, self.level_);
        }
    }

    /// Detaches every node from the head and resets the bookkeeping,
    /// returning the first detached node.
    fn detach_all(&mut self) -> Link<T> {
        let first = self.head_[0];
        for link in self.head_.iter_mut() {
            *link = None;
        }
        self.length_ = 0;
        self.level_ = 1;
        first
    }
}

impl<T, C: Comparator<T>, D: Dispose<T>> SkipList<T, C, D> {
    #[inline]
    fn compare(&self, node: NonNull<Node<T>>, value: &T) -> Ordering {
        self.comparator_.compare(unsafe { node.as_ref() }.value(), value)
    }

    /// Finds the last node that compares strictly less than `value`, which
    /// may be the head.
    fn find_lower_bound(&self, value: &T) -> Predecessor<T> {
        let mut current = Predecessor::Head;

        for level in (0..self.level_).rev() {
            while let Some(next) = self.next(current, level) {
                if self.compare(next, value) == Ordering::Less {
                    current = Predecessor::Node(next);
                } else {
                    break;
                }
            }
        }

        current
    }

    /// Same as `find_lower_bound`, also building the update path: for every
    /// level `i`, the last node visited on that level before descending.
    /// Levels at or above `level_` point at the head, so a node taller than
    /// the current level is linked straight from it.
    fn find_lower_bound_with_updates(
        &self,
        value: &T,
    ) -> Result<(Predecessor<T>, Vec<Predecessor<T>>)> {
        let mut updates = Vec::new();
        updates
            .try_reserve_exact(self.max_level_)
            .map_err(|_| SkipListError::AllocationFailed { height: self.max_level_ })?;
        updates.resize(self.max_level_, Predecessor::Head);

        let mut current = Predecessor::Head;
        for level in (0..self.level_).rev() {
            while let Some(next) = self.next(current, level) {
                if self.compare(next, value) == Ordering::Less {
                    current = Predecessor::Node(next);
                } else {
                    break;
                }
            }

            updates[level] = current;
        }

        Ok((current, updates))
    }

    /// Returns the stored value comparing equal to `value`, if any.
    pub fn get(&self, value: &T) -> Option<&T> {
        let lower_bound = self.find_lower_bound(value);

        match self.next(lower_bound, 0) {
            Some(node) if self.compare(node, value) == Ordering::Equal => {
                Some(unsafe { &*node.as_ptr() }.value())
            }
            _ => None,
        }
    }

    /// Returns `true` if a value comparing equal to `value` is in the list.
    #[inline(always)]
    pub fn contains(&self, value: &T) -> bool {
        self.get(value).is_some()
    }

    /// Adds `value` unless an equal value is already present.
    ///
    /// Returns `Ok(true)` if the value was added and `Ok(false)` if it was a
    /// duplicate, in which case it is dropped without reaching the disposer.
    /// On error the list is left exactly as it was.
    pub fn insert(&mut self, value: T) -> Result<bool> {
        let (lower_bound, updates) = self.find_lower_bound_with_updates(&value)?;

        if let Some(next) = self.next(lower_bound, 0) {
            // The lower bound's next node, if present, could be the same
            // as the value we are inserting, so we can abort early here
            if self.compare(next, &value) == Ordering::Equal {
                return Ok(false);
            }
        }

        let height = self.controller_.get_height();
        if height == 0 || height > self.max_level_ {
            warn!("height controller produced out of range height {}", height);
            return Err(SkipListError::InvalidHeight {
                height,
                max_level: self.max_level_,
            });
        }

        // Every comparator call happens before the first link is rewritten,
        // so a panicking comparator leaves the list untouched.
        debug_assert!(updates.iter().enumerate().take(height).all(|(level, update)| {
            self.next(*update, level)
                .map_or(true, |successor| self.compare(successor, &value) == Ordering::Greater)
        }));

        let node = Node::allocate(value, height).map_err(|err| {
            warn!("failed to allocate node of height {}", height);
            err
        })?;

        for (level, update) in updates.iter().enumerate().take(height) {
            let successor = self.next(*update, level);

            // The new node takes over the predecessor's link before the
            // predecessor is pointed at it.
            unsafe { (*node.as_ptr()).link_to(level, successor) };
            *self.forward_mut(*update, level) = Some(node);
        }

        if height > self.level_ {
            trace!("level rose from {} to {}", self.level_, height);
            self.level_ = height;
        }

        self.length_ += 1;
        Ok(true)
    }

    /// Unlinks the node comparing equal to `value` and frees it, returning
    /// its value.
    ///
    /// The update predecessor of each level is consumed as soon as the
    /// descent leaves it: whenever its forward link on that level points at
    /// the target, the link is redirected past the target. Levels above the
    /// target's height never point at it and are left alone.
    fn unlink(&mut self, value: &T) -> Option<T> {
        let mut current = Predecessor::Head;
        let mut target: Link<T> = None;

        for level in (0..self.level_).rev() {
            while let Some(next) = self.next(current, level) {
                match self.compare(next, value) {
                    Ordering::Less => current = Predecessor::Node(next),
                    Ordering::Equal => {
                        debug_assert!(target.map_or(true, |found| found == next));
                        let successor = unsafe { next.as_ref() }.next(level);
                        *self.forward_mut(current, level) = successor;
                        target = Some(next);
                        break;
                    }
                    Ordering::Greater => break,
                }
            }
        }

        let node = target?;
        debug_assert!(unsafe { node.as_ref() }.height() <= self.level_);

        self.length_ -= 1;
        self.shrink_level();

        // The node is no longer reachable from any link.
        Some(unsafe { Node::free(node) })
    }

    /// Removes the value comparing equal to `value` and hands it to the
    /// disposer. Returns `false` if no such value was present.
    pub fn remove(&mut self, value: &T) -> bool {
        match self.unlink(value) {
            Some(removed) => {
                self.disposer_.dispose(removed);
                true
            }
            None => false,
        }
    }

    /// Removes the value comparing equal to `value` and returns it to the
    /// caller. The disposer is not involved.
    pub fn take(&mut self, value: &T) -> Option<T> {
        self.unlink(value)
    }
}

impl<T, C, D: Dispose<T>> SkipList<T, C, D> {
    /// Removes all elements, handing each one to the disposer. The list
    /// remains usable afterwards.
    pub fn clear(&mut self) {
        let released = self.length_;

        // Everything is detached up front: should the disposer panic, the
        // remaining nodes leak instead of staying reachable.
        let mut link = self.detach_all();
        while let Some(node) = link {
            unsafe {
                link = node.as_ref().next(0);
                let value = Node::free(node);
                self.disposer_.dispose(value);
            }
        }

        if released > 0 {
            debug!("cleared {} values", released);
        }
    }
}

impl<T, C, D: Dispose<T>> Drop for SkipList<T, C, D> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T: fmt::Debug, C, D: Dispose<T>> fmt::Debug for SkipList<T, C, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
