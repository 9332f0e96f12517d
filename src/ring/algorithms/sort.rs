use crate::ring::{element_of, move_nodes, next_of, Ring};
use std::cmp::Ordering;

impl<T: Ord> Ring<T> {
    /// Sorts the ring in ascending order.
    ///
    /// The sort is stable and relinks the nodes in place: no element is moved
    /// or cloned, and only *O*(log *n*) stack is used.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n* log *n*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_queue::Ring;
    /// use std::iter::FromIterator;
    ///
    /// let mut ring = Ring::from_iter([3, 1, 2]);
    /// ring.sort();
    /// assert_eq!(Vec::from_iter(ring), vec![1, 2, 3]);
    /// ```
    pub fn sort(&mut self) {
        self.sort_by(T::cmp);
    }

    /// Merges the sorted `other` into the sorted `self`, leaving `other`
    /// empty. See [`Ring::merge_by`].
    pub fn merge(&mut self, other: &mut Self) {
        self.merge_by(other, T::cmp);
    }
}

impl<T> Ring<T> {
    /// Sorts the ring with a comparator function.
    ///
    /// Equal elements keep their relative order.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_queue::Ring;
    /// use std::iter::FromIterator;
    ///
    /// let mut ring = Ring::from_iter([(1, 'a'), (0, 'b'), (1, 'c'), (0, 'd')]);
    /// ring.sort_by(|a, b| b.0.cmp(&a.0));
    /// assert_eq!(
    ///     Vec::from_iter(ring),
    ///     vec![(1, 'a'), (1, 'c'), (0, 'b'), (0, 'd')],
    /// );
    /// ```
    pub fn sort_by<F>(&mut self, mut compare: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        merge_sort(self, &mut compare);
    }

    /// Sorts the ring with a key extraction function.
    pub fn sort_by_key<K, F>(&mut self, mut f: F)
    where
        K: Ord,
        F: FnMut(&T) -> K,
    {
        self.sort_by(|a, b| f(a).cmp(&f(b)));
    }

    /// Merges the nodes of `other` into `self`, where both rings are already
    /// sorted by `compare`. After merging, `other` becomes empty.
    ///
    /// When elements compare equal, the ones from `self` come first.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n* + *m*) time and *O*(1) memory.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_queue::Ring;
    /// use std::iter::FromIterator;
    ///
    /// let mut ring = Ring::from_iter([(1, 'a'), (3, 'a')]);
    /// let mut other = Ring::from_iter([(1, 'b'), (2, 'b'), (4, 'b')]);
    /// ring.merge_by(&mut other, |a, b| a.0.cmp(&b.0));
    ///
    /// assert!(other.is_empty());
    /// assert_eq!(
    ///     Vec::from_iter(ring),
    ///     vec![(1, 'a'), (1, 'b'), (2, 'b'), (3, 'a'), (4, 'b')],
    /// );
    /// ```
    pub fn merge_by<F>(&mut self, other: &mut Self, mut compare: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        merge_into(self, other, &mut compare);
    }
}

/// Sort `ring` by splitting it at its middle node into two rings, sorting
/// both, and merging them back.
fn merge_sort<T, F>(ring: &mut Ring<T>, compare: &mut F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    if ring.is_empty() || ring.is_singular() {
        return;
    }
    // With at least two nodes, the middle node is never the front node,
    // so both halves are non-empty.
    let (middle, back) = (ring.middle_node(), ring.back_node());
    // SAFETY: `middle..=back` is a valid range of non-ghost nodes in the ring.
    let mut right = Ring::from_detached(unsafe { ring.detach_nodes(middle, back) });
    merge_sort(ring, compare);
    merge_sort(&mut right, compare);
    merge_into(ring, &mut right, compare);
}

fn merge_into<T, F>(merged: &mut Ring<T>, to_merge: &mut Ring<T>, compare: &mut F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    let (merged_end, to_merge_end) = (merged.ghost_node(), to_merge.ghost_node());
    let mut current = merged.front_node();
    // SAFETY: `current` is always a non-ghost node of `merged` inside the loop,
    // and every moved run `front..=back` is a range of non-ghost nodes at the
    // front of `to_merge`.
    unsafe {
        while current != merged_end && !to_merge.is_empty() {
            let front = to_merge.front_node();
            if compare(element_of(front), element_of(current)) != Ordering::Less {
                current = next_of(current);
                continue;
            }
            // Find the run `front..=back` in `to_merge`, where all the elements
            // are strictly less than `*current`.
            let mut back = front;
            while next_of(back) != to_merge_end
                && compare(element_of(next_of(back)), element_of(current)) == Ordering::Less
            {
                back = next_of(back);
            }
            // Move the run to the node before `current`.
            move_nodes(front, back, current);
        }
    }
    merged.append(to_merge);
}

#[cfg(test)]
mod tests {
    use crate::ring::Ring;
    use proptest::prelude::*;
    use std::iter::FromIterator;

    #[test]
    fn sort_small_rings() {
        fn test_sort(input: &[i32]) {
            let mut ring = Ring::from_iter(input.iter().copied());
            ring.sort();
            let mut expected = input.to_vec();
            expected.sort();
            assert_eq!(ring.assert_well_formed(), input.len());
            assert_eq!(Vec::from_iter(ring), expected);
        }
        test_sort(&[]);
        test_sort(&[1]);
        test_sort(&[2, 1]);
        test_sort(&[1, 2]);
        test_sort(&[3, 3, 3]);
        test_sort(&[5, 4, 3, 2, 1]);
        test_sort(&[1, 5, 2, 4, 3, 3, 0]);
    }

    #[test]
    fn merge_keeps_self_first_on_ties() {
        let mut ring = Ring::from_iter([(1, 0), (2, 0), (2, 1)]);
        let mut other = Ring::from_iter([(0, 2), (2, 2), (3, 2)]);
        ring.merge_by(&mut other, |a, b| a.0.cmp(&b.0));
        assert!(other.is_empty());
        assert_eq!(other.assert_well_formed(), 0);
        assert_eq!(ring.assert_well_formed(), 6);
        assert_eq!(
            Vec::from_iter(ring),
            vec![(0, 2), (1, 0), (2, 0), (2, 1), (2, 2), (3, 2)]
        );
    }

    #[test]
    fn merge_with_empty_sides() {
        let mut ring = Ring::new();
        let mut other = Ring::from_iter([1, 2]);
        ring.merge(&mut other);
        assert_eq!(Vec::from_iter(ring.iter().copied()), vec![1, 2]);
        ring.merge(&mut other);
        assert_eq!(Vec::from_iter(ring), vec![1, 2]);
    }

    proptest! {
        #[test]
        fn sort_by_matches_stable_sort(vec in prop::collection::vec((0..8u8, any::<u16>()), 0..64)) {
            let mut ring = Ring::from_iter(vec.iter().copied());
            ring.sort_by_key(|pair| pair.0);
            let mut expected = vec.clone();
            expected.sort_by_key(|pair| pair.0);
            prop_assert_eq!(ring.assert_well_formed(), vec.len());
            prop_assert_eq!(Vec::from_iter(ring), expected);
        }

        #[test]
        fn merge_matches_stable_sort(
            mut left in prop::collection::vec((0..8u8, Just(0u8)), 0..32),
            mut right in prop::collection::vec((0..8u8, Just(1u8)), 0..32),
        ) {
            left.sort();
            right.sort();
            let mut ring = Ring::from_iter(left.iter().copied());
            let mut other = Ring::from_iter(right.iter().copied());
            ring.merge_by(&mut other, |a, b| a.0.cmp(&b.0));

            let mut expected = left.clone();
            expected.extend(right.iter().copied());
            expected.sort_by_key(|pair| pair.0);
            prop_assert!(other.is_empty());
            prop_assert_eq!(Vec::from_iter(ring), expected);
        }
    }
}
