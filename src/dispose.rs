/// Receives every value the `SkipList` lets go of: on `remove`, on `clear`,
/// and when the list itself is dropped.
///
/// Each stored value is handed to the disposer exactly once. Values returned
/// to the caller through `SkipList::take`, and values rejected by `insert`,
/// never reach it.
pub trait Dispose<T> {
    fn dispose(&mut self, value: T);
}

/// The default disposer: the value is simply dropped.
///
/// With a reference type such as `&'a V` for `T`, this makes the list a
/// borrower of its values.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoDispose;

impl<T> Dispose<T> for NoDispose {
    #[inline]
    fn dispose(&mut self, _value: T) {}
}

impl<T, F> Dispose<T> for F
where
    F: FnMut(T),
{
    #[inline]
    fn dispose(&mut self, value: T) {
        self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closure_disposer_receives_value() {
        let mut released = Vec::new();
        {
            let mut disposer = |value: u32| released.push(value);
            disposer.dispose(3);
            disposer.dispose(9);
        }
        assert_eq!(released, vec![3, 9]);
    }

    #[test]
    fn no_dispose_drops() {
        use std::rc::Rc;

        let value = Rc::new(5);
        NoDispose.dispose(Rc::clone(&value));
        assert_eq!(Rc::strong_count(&value), 1);
    }
}
