use std::cmp::Ordering;

/// A total order over `T`, used by the `SkipList` for every comparison it
/// makes.
///
/// Implementations must be consistent: `compare(a, b)` always returns the
/// same result for the same pair, and `compare(a, b) == Less` exactly when
/// `compare(b, a) == Greater`. Two values comparing `Equal` are considered the
/// same entry.
pub trait Comparator<T: ?Sized> {
    fn compare(&self, lhs: &T, rhs: &T) -> Ordering;
}

/// A [`Comparator`] which defers to the [`Ord`] implementation of `T`.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrdComparator;

impl<T: Ord + ?Sized> Comparator<T> for OrdComparator {
    #[inline]
    fn compare(&self, lhs: &T, rhs: &T) -> Ordering {
        Ord::cmp(lhs, rhs)
    }
}

impl<T: ?Sized, F> Comparator<T> for F
where
    F: Fn(&T, &T) -> Ordering,
{
    #[inline]
    fn compare(&self, lhs: &T, rhs: &T) -> Ordering {
        self(lhs, rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ord_comparator() {
        assert_eq!(OrdComparator.compare(&1, &2), Ordering::Less);
        assert_eq!(OrdComparator.compare("b", "a"), Ordering::Greater);
        assert_eq!(OrdComparator.compare(&7u8, &7u8), Ordering::Equal);
    }

    #[test]
    fn closure_comparator() {
        let reversed = |lhs: &i32, rhs: &i32| rhs.cmp(lhs);
        assert_eq!(reversed.compare(&1, &2), Ordering::Greater);
        assert_eq!(reversed.compare(&2, &1), Ordering::Less);
    }

    #[test]
    fn key_extracting_comparator() {
        // Only the first field takes part in the order.
        let by_id = |lhs: &(u32, char), rhs: &(u32, char)| lhs.0.cmp(&rhs.0);
        assert_eq!(by_id.compare(&(4, 'x'), &(4, 'y')), Ordering::Equal);
    }
}
