use crate::ring::{element_mut_of, element_of, next_of, prev_of, Node, Ring};
use std::fmt;
use std::iter::{FromIterator, FusedIterator};
use std::marker::PhantomData;
use std::ptr::NonNull;

/// An iterator over the elements of a `Ring`.
///
/// It uses a pair of nodes `start..end` to represent a half-open subrange
/// of the ring, where `start` is inclusive and `end` is not.
///
/// Though the `Iter` does not hold a reference from the ring,
/// it actually *borrows* (immutably) from the ring, so a phantom
/// marker of `&'a Ring<T>` is added to protect the ring from being
/// written.
///
/// # Examples
///
/// ```compile_fail
/// use ring_queue::Ring;
/// use std::iter::FromIterator;
///
/// let mut ring = Ring::from_iter([1, 2, 3]);
/// let mut iter = ring.iter();
///
/// // Won't compile, because ring is already borrowed immutably.
/// ring.push_back(4);
/// println!("{:?}", iter.next());
/// ```
pub struct Iter<'a, T: 'a> {
    start: NonNull<Node<T>>,
    end: NonNull<Node<T>>,
    _marker: PhantomData<&'a Ring<T>>,
}

impl<'a, T: 'a> Iter<'a, T> {
    pub(crate) fn new(ring: &'a Ring<T>) -> Self {
        let start = ring.front_node();
        let end = ring.ghost_node();
        let _marker = PhantomData;
        Self {
            start,
            end,
            _marker,
        }
    }
}

impl<'a, T: 'a> Clone for Iter<'a, T> {
    fn clone(&self) -> Self {
        Self {
            start: self.start,
            end: self.end,
            _marker: PhantomData,
        }
    }
}

impl<'a, T: fmt::Debug + 'a> fmt::Debug for Iter<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Iter").field(&self.clone().collect::<Vec<_>>()).finish()
    }
}

impl<'a, T: 'a> Iterator for Iter<'a, T> {
    type Item = &'a T;

    /// Return `*start` and reset the iterating range to `(start.next)..end`,
    /// or return `None` if `start..end` is already empty.
    fn next(&mut self) -> Option<Self::Item> {
        if self.start == self.end {
            return None;
        }
        // SAFETY: `start..end` is always a valid range of a ring,
        // and it is not empty here, so it is safe.
        unsafe {
            let current = self.start;
            self.start = next_of(current);
            Some(element_of(current))
        }
    }

    fn last(mut self) -> Option<Self::Item>
    where
        Self: Sized,
    {
        self.next_back()
    }
}

impl<'a, T: 'a> DoubleEndedIterator for Iter<'a, T> {
    /// Reset the iterating range to `start..(end.prev)` and return `*end`,
    /// or return `None` if `start..end` is already empty.
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.start == self.end {
            return None;
        }
        // SAFETY: `start..end` is always a valid range of a ring,
        // and it is not empty here, so it is safe.
        unsafe {
            self.end = prev_of(self.end);
            Some(element_of(self.end))
        }
    }
}

impl<'a, T: 'a> FusedIterator for Iter<'a, T> {}

/// A mutable iterator over the elements of a `Ring`.
///
/// `start..end` denotes a subrange of the ring. Only the elements are
/// mutable, not the linked structure.
pub struct IterMut<'a, T: 'a> {
    start: NonNull<Node<T>>,
    end: NonNull<Node<T>>,
    _marker: PhantomData<&'a mut Ring<T>>,
}

impl<'a, T: 'a> IterMut<'a, T> {
    pub(crate) fn new(ring: &'a mut Ring<T>) -> Self {
        let start = ring.front_node();
        let end = ring.ghost_node();
        let _marker = PhantomData;
        Self {
            start,
            end,
            _marker,
        }
    }
}

impl<'a, T: 'a> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.start == self.end {
            return None;
        }
        // SAFETY: `start..end` is always a valid range of a ring, and every
        // node in it is yielded at most once.
        unsafe {
            let current = self.start;
            self.start = next_of(current);
            Some(element_mut_of(current))
        }
    }

    fn last(mut self) -> Option<Self::Item>
    where
        Self: Sized,
    {
        self.next_back()
    }
}

impl<'a, T: 'a> FusedIterator for IterMut<'a, T> {}

impl<'a, T: 'a> DoubleEndedIterator for IterMut<'a, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.start == self.end {
            return None;
        }
        // SAFETY: same as `next`, from the other side of the range.
        unsafe {
            self.end = prev_of(self.end);
            Some(element_mut_of(self.end))
        }
    }
}

/// An owning iterator over the elements of a `Ring`.
///
/// This `struct` is created by the [`into_iter`] method on [`Ring`]
/// (provided by the `IntoIterator` trait).
///
/// [`into_iter`]: Ring::into_iter
pub struct IntoIter<T> {
    ring: Ring<T>,
}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntoIter")
            .field("ring", &self.ring)
            .finish()
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.ring.pop_front()
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.ring.pop_back()
    }
}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> IntoIterator for Ring<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { ring: self }
    }
}

impl<'a, T> IntoIterator for &'a Ring<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut Ring<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T> FromIterator<T> for Ring<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut ring = Ring::new();
        ring.extend(iter);
        ring
    }
}

impl<T> Extend<T> for Ring<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        iter.into_iter().for_each(|item| self.push_back(item));
    }
}

impl<'a, T: 'a + Copy> Extend<&'a T> for Ring<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied())
    }
}

unsafe impl<T: Sync> Send for Iter<'_, T> {}

unsafe impl<T: Sync> Sync for Iter<'_, T> {}

unsafe impl<T: Send> Send for IterMut<'_, T> {}

unsafe impl<T: Sync> Sync for IterMut<'_, T> {}

#[cfg(test)]
mod tests {
    use crate::ring::Ring;
    use std::iter::FromIterator;

    #[test]
    fn iter_meets_in_the_middle() {
        for len in 0..6 {
            let vec = Vec::from_iter(0..len);
            let ring = Ring::from_iter(vec.iter().copied());
            for mid in 0..=len as usize {
                let mut iter = ring.iter();
                let front = Vec::from_iter(iter.by_ref().take(mid).copied());
                let back = Vec::from_iter(iter.rev().copied());
                assert_eq!(front, vec[..mid]);
                assert_eq!(Vec::from_iter(back.into_iter().rev()), vec[mid..]);
            }
        }
    }

    #[test]
    fn iter_is_fused() {
        let ring = Ring::from_iter([1, 2]);
        let mut iter = ring.iter();
        assert_eq!(iter.next(), Some(&1));
        assert_eq!(iter.next_back(), Some(&2));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next_back(), None);
    }

    #[test]
    fn iter_mut_and_into_iter() {
        let mut ring = Ring::from_iter([1, 2, 3]);
        ring.iter_mut().for_each(|item| *item *= 2);
        for item in &mut ring {
            *item += 1;
        }
        assert_eq!(ring.iter().last(), Some(&7));
        let mut into_iter = ring.into_iter();
        assert_eq!(into_iter.next_back(), Some(7));
        assert_eq!(Vec::from_iter(into_iter), vec![3, 5]);
    }

    #[test]
    fn iter_clones_without_cloning_elements() {
        struct Opaque(u8);
        let ring = Ring::from_iter([Opaque(1), Opaque(2)]);
        let mut iter = ring.iter();
        iter.next();
        let rest = iter.clone();
        assert_eq!(Vec::from_iter(rest.map(|o| o.0)), vec![2]);
        assert_eq!(iter.next().map(|o| o.0), Some(2));

        let debug = Ring::from_iter([1, 2, 3]);
        let mut iter = debug.iter();
        iter.next_back();
        assert_eq!(format!("{:?}", iter), "Iter([1, 2])");
        assert_eq!(iter.count(), 2);
    }

    #[test]
    fn extend_from_refs() {
        let mut ring = Ring::<i32>::new();
        ring.extend(&[1, 2]);
        ring.extend(vec![3]);
        assert_eq!(Vec::from_iter(ring), vec![1, 2, 3]);
    }
}
