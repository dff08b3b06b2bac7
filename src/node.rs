use std::alloc::{self, Layout};
use std::ptr::NonNull;

use crate::error::{Result, SkipListError};

/// A forward link: the next node on some level, if any.
pub(crate) type Link<T> = Option<NonNull<Node<T>>>;

#[derive(Debug)]
pub(crate) struct Node<T> {
    forward_: Vec<Link<T>>,
    value_: T,
}

impl<T> Node<T> {
    /// Allocates an unlinked node taking part in levels `0..height`.
    ///
    /// Both the link vector and the node itself are allocated fallibly, so
    /// running out of memory is reported instead of aborting. On failure
    /// nothing is leaked.
    pub fn allocate(value: T, height: usize) -> Result<NonNull<Node<T>>> {
        debug_assert!(height >= 1);

        let mut forward_ = Vec::new();
        forward_
            .try_reserve_exact(height)
            .map_err(|_| SkipListError::AllocationFailed { height })?;
        forward_.resize(height, None);

        let layout = Layout::new::<Node<T>>();
        // `Node` always holds a `Vec`, so the layout is never zero sized.
        let raw = unsafe { alloc::alloc(layout) } as *mut Node<T>;
        let ptr = NonNull::new(raw).ok_or(SkipListError::AllocationFailed { height })?;

        unsafe {
            ptr.as_ptr().write(Node {
                forward_,
                value_: value,
            });
        }

        Ok(ptr)
    }

    /// Releases the node and its link vector, handing back the value.
    ///
    /// # Safety
    ///
    /// `ptr` must come from `Node::allocate`, must not be freed twice, and
    /// must no longer be reachable from any link.
    pub unsafe fn free(ptr: NonNull<Node<T>>) -> T {
        let Node { forward_, value_ } = unsafe { ptr.as_ptr().read() };
        unsafe { alloc::dealloc(ptr.as_ptr() as *mut u8, Layout::new::<Node<T>>()) };
        drop(forward_);
        value_
    }

    // Node of height 1 only keeps a pointer to the next node on level 0, node
    // of height 2 also keeps a pointer to the next node on level 1, and so on.
    pub fn height(&self) -> usize {
        self.forward_.len()
    }

    pub fn next(&self, level: usize) -> Link<T> {
        debug_assert!(level < self.height());
        self.forward_[level]
    }

    pub fn link_to(&mut self, level: usize, destination: Link<T>) {
        debug_assert!(level < self.height());
        self.forward_[level] = destination;
    }

    pub fn forward_mut(&mut self, level: usize) -> &mut Link<T> {
        debug_assert!(level < self.height());
        &mut self.forward_[level]
    }

    pub fn value(&self) -> &T {
        &self.value_
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new() {
        let value = 3;
        let height = 5;
        let node = Node::allocate(value, height).unwrap();
        unsafe {
            assert_eq!(*node.as_ref().value(), value);
            assert_eq!(node.as_ref().height(), height);
            assert_eq!(Node::free(node), value);
        }
    }

    #[test]
    fn next_empty() {
        let height = 5;
        let node = Node::allocate(42, height).unwrap();
        unsafe {
            for level in 0..height {
                assert!(node.as_ref().next(level).is_none());
            }
            Node::free(node);
        }
    }

    #[test]
    fn link_singleton() {
        let height = 5;
        let linked_level = 0;

        let mut node = Node::allocate(4, height).unwrap();
        let next_node = Node::allocate(12312, height).unwrap();

        unsafe {
            node.as_mut().link_to(linked_level, Some(next_node));

            for level in 0..node.as_ref().height() {
                match node.as_ref().next(level) {
                    Some(next) if level == linked_level => {
                        assert_eq!(*next.as_ref().value(), 12312);
                    }
                    Some(_) => panic!("unexpected link on level {}", level),
                    None => assert_ne!(level, linked_level),
                }
            }

            *node.as_mut().forward_mut(linked_level) = None;
            assert!(node.as_ref().next(linked_level).is_none());

            Node::free(next_node);
            Node::free(node);
        }
    }

    #[test]
    fn free_returns_owned_value() {
        let node = Node::allocate(String::from("owned"), 2).unwrap();
        let value = unsafe { Node::free(node) };
        assert_eq!(value, "owned");
    }

    #[test]
    fn absurd_height_fails() {
        let result = Node::allocate(1u8, usize::MAX);
        assert_eq!(
            result.unwrap_err(),
            SkipListError::AllocationFailed { height: usize::MAX }
        );
    }
}
