use crate::ring::{move_node, next_of, Ring};

impl<T> Ring<T> {
    /// Swaps every two adjacent elements, by relinking their nodes. If the
    /// ring has an odd length, the last element stays in place.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time and *O*(1) memory.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_queue::Ring;
    /// use std::iter::FromIterator;
    ///
    /// let mut ring = Ring::from_iter(0..5);
    /// ring.swap_pairs();
    /// assert_eq!(Vec::from_iter(ring), vec![1, 0, 3, 2, 4]);
    /// ```
    pub fn swap_pairs(&mut self) {
        let ghost = self.ghost_node();
        let mut first = self.front_node();
        // SAFETY: `first` and `second` are both non-ghost nodes of the ring when
        // moved, and they are distinct.
        unsafe {
            while first != ghost && next_of(first) != ghost {
                let second = next_of(first);
                move_node(second, first);
                first = next_of(first);
            }
        }
    }

    /// Reverses the order of the elements in place.
    ///
    /// The original front node stays still while every node after it is moved
    /// to the front, one by one.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time and *O*(1) memory.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_queue::Ring;
    /// use std::iter::FromIterator;
    ///
    /// let mut ring = Ring::from_iter(['a', 'b', 'c']);
    /// ring.reverse();
    /// assert_eq!(Vec::from_iter(ring), vec!['c', 'b', 'a']);
    /// ```
    pub fn reverse(&mut self) {
        let (ghost, anchor) = (self.ghost_node(), self.front_node());
        if anchor == ghost {
            return;
        }
        // SAFETY: `anchor.next` is a non-ghost node in the loop, and it is never
        // the current front node, which is at or before `anchor`.
        unsafe {
            while next_of(anchor) != ghost {
                move_node(next_of(anchor), self.front_node());
            }
        }
    }

    /// Reverses the elements in every group of `k` consecutive elements. A
    /// trailing group shorter than `k` keeps its order.
    ///
    /// It is a no-op if `k <= 1`.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time and *O*(1) memory.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_queue::Ring;
    /// use std::iter::FromIterator;
    ///
    /// let mut ring = Ring::from_iter(0..8);
    /// ring.reverse_groups(3);
    /// assert_eq!(Vec::from_iter(ring), vec![2, 1, 0, 5, 4, 3, 6, 7]);
    /// ```
    pub fn reverse_groups(&mut self, k: usize) {
        if k <= 1 {
            return;
        }
        let mut done = Ring::new();
        while let Some(mut group) = self.cut(k) {
            group.reverse();
            done.append(&mut group);
        }
        self.prepend(&mut done);
    }
}

#[cfg(test)]
mod tests {
    use crate::ring::Ring;
    use proptest::prelude::*;
    use std::iter::FromIterator;

    #[test]
    fn transforms_on_tiny_rings() {
        let mut empty = Ring::<i32>::new();
        empty.swap_pairs();
        empty.reverse();
        empty.reverse_groups(2);
        assert_eq!(empty.assert_well_formed(), 0);

        let mut single = Ring::from_iter([7]);
        single.swap_pairs();
        single.reverse();
        single.reverse_groups(3);
        assert_eq!(Vec::from_iter(single), vec![7]);
    }

    #[test]
    fn swap_pairs_with_even_and_odd_lengths() {
        let mut ring = Ring::from_iter(0..4);
        ring.swap_pairs();
        assert_eq!(ring.assert_well_formed(), 4);
        assert_eq!(Vec::from_iter(ring.iter().copied()), vec![1, 0, 3, 2]);
        ring.push_back(4);
        ring.swap_pairs();
        assert_eq!(Vec::from_iter(ring), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn reverse_groups_leaves_partial_tail() {
        fn test_reverse_groups(len: i32, k: usize, expected: &[i32]) {
            let mut ring = Ring::from_iter(0..len);
            ring.reverse_groups(k);
            assert_eq!(ring.assert_well_formed(), len as usize);
            assert_eq!(Vec::from_iter(ring), expected);
        }
        test_reverse_groups(6, 2, &[1, 0, 3, 2, 5, 4]);
        test_reverse_groups(6, 3, &[2, 1, 0, 5, 4, 3]);
        test_reverse_groups(5, 3, &[2, 1, 0, 3, 4]);
        test_reverse_groups(5, 5, &[4, 3, 2, 1, 0]);
        test_reverse_groups(5, 6, &[0, 1, 2, 3, 4]);
        test_reverse_groups(5, 1, &[0, 1, 2, 3, 4]);
        test_reverse_groups(5, 0, &[0, 1, 2, 3, 4]);
    }

    proptest! {
        #[test]
        fn reverse_matches_vec(vec in prop::collection::vec(any::<i16>(), 0..48)) {
            let mut ring = Ring::from_iter(vec.iter().copied());
            ring.reverse();
            let mut expected = vec.clone();
            expected.reverse();
            prop_assert_eq!(Vec::from_iter(ring.iter().copied()), expected);
            ring.reverse();
            prop_assert_eq!(Vec::from_iter(ring), vec);
        }

        #[test]
        fn reverse_groups_matches_chunks(vec in prop::collection::vec(any::<i16>(), 0..48), k in 0..10usize) {
            let mut ring = Ring::from_iter(vec.iter().copied());
            ring.reverse_groups(k);
            let mut expected = vec.clone();
            if k > 1 {
                expected.chunks_exact_mut(k).for_each(<[i16]>::reverse);
            }
            prop_assert_eq!(ring.assert_well_formed(), vec.len());
            prop_assert_eq!(Vec::from_iter(ring.iter().copied()), expected);
            ring.reverse_groups(k);
            prop_assert_eq!(Vec::from_iter(ring), vec);
        }

        #[test]
        fn swap_pairs_twice_restores(vec in prop::collection::vec(any::<i16>(), 0..48)) {
            let mut ring = Ring::from_iter(vec.iter().copied());
            ring.swap_pairs();
            let mut expected = vec.clone();
            expected.chunks_exact_mut(2).for_each(|pair| pair.swap(0, 1));
            prop_assert_eq!(Vec::from_iter(ring.iter().copied()), expected);
            ring.swap_pairs();
            prop_assert_eq!(Vec::from_iter(ring), vec);
        }
    }
}
