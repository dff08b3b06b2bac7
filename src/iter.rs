use std::iter::FusedIterator;
use std::marker::PhantomData;

use crate::dispose::Dispose;
use crate::node::{Link, Node};
use crate::skiplist::SkipList;

/// Walks level 0 of a `SkipList`, yielding values in ascending order.
pub struct Iter<'a, T> {
    current: Link<T>,
    remaining: usize,
    _list: PhantomData<&'a Node<T>>,
}

// Only shared references to the values ever come out of an `Iter`.
unsafe impl<T: Sync> Send for Iter<'_, T> {}
unsafe impl<T: Sync> Sync for Iter<'_, T> {}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new<C, D: Dispose<T>>(list: &'a SkipList<T, C, D>) -> Iter<'a, T> {
        Iter {
            current: list.head(),
            remaining: list.len(),
            _list: PhantomData,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node: &'a Node<T> = unsafe { &*self.current?.as_ptr() };
        self.current = node.next(0);
        self.remaining -= 1;
        Some(node.value())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Iter {
            current: self.current,
            remaining: self.remaining,
            _list: PhantomData,
        }
    }
}

impl<T, C, D: Dispose<T>> SkipList<T, C, D> {
    /// Iterates over the values in ascending comparator order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self)
    }
}

impl<'a, T, C, D: Dispose<T>> IntoIterator for &'a SkipList<T, C, D> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
