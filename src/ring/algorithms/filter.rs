use crate::ring::{element_of, next_of, prev_of, Node, Ring};
use std::cmp::Ordering;

impl<T> Ring<T> {
    /// Removes the element at index `floor(n / 2)` and returns it, or `None` if
    /// the ring is empty.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_queue::Ring;
    /// use std::iter::FromIterator;
    ///
    /// let mut ring = Ring::from_iter([0, 1, 2, 3, 4, 5]);
    /// assert_eq!(ring.remove_middle(), Some(3));
    /// assert_eq!(ring.remove_middle(), Some(2));
    /// assert_eq!(Vec::from_iter(ring), vec![0, 1, 4, 5]);
    /// ```
    pub fn remove_middle(&mut self) -> Option<T> {
        let middle = self.middle_node();
        if middle == self.ghost_node() {
            return None;
        }
        // SAFETY: `middle` is a non-ghost node of the ring.
        let node = unsafe { self.detach_node(middle) };
        Some(Node::into_element(node))
    }

    /// Removes every run of two or more adjacent elements that `same` considers
    /// equal, all of its members included. Elements that have no equal
    /// neighbour are kept in order.
    ///
    /// On a sorted ring, this keeps exactly the values that occur once.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_queue::Ring;
    /// use std::iter::FromIterator;
    ///
    /// let mut ring = Ring::from_iter(["a", "A", "b", "c", "C", "c"]);
    /// ring.retain_unique_by(|x, y| x.eq_ignore_ascii_case(y));
    /// assert_eq!(Vec::from_iter(ring), vec!["b"]);
    /// ```
    pub fn retain_unique_by<F>(&mut self, mut same: F)
    where
        F: FnMut(&T, &T) -> bool,
    {
        let ghost = self.ghost_node();
        let mut front = self.front_node();
        // SAFETY: `front..=back` is always a range of non-ghost nodes in the ring,
        // and `next` is read before the range is detached.
        unsafe {
            while front != ghost {
                let mut back = front;
                while next_of(back) != ghost && same(element_of(next_of(back)), element_of(front))
                {
                    back = next_of(back);
                }
                let next = next_of(back);
                if back != front {
                    drop(Ring::from_detached(self.detach_nodes(front, back)));
                }
                front = next;
            }
        }
    }

    /// Keeps only the elements that are not followed by a strictly smaller one,
    /// according to `compare`. The remaining elements are sorted.
    ///
    /// Each node is compared with the kept nodes before it, which are removed
    /// backwards while they are greater, so every node is removed at most once.
    ///
    /// # Complexity
    ///
    /// This operation should compute in amortized *O*(*n*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_queue::Ring;
    /// use std::iter::FromIterator;
    ///
    /// let mut ring = Ring::from_iter([5, 1, 6, 2]);
    /// ring.retain_sorted_by(|a, b| b.cmp(a));
    /// assert_eq!(Vec::from_iter(ring), vec![6, 2]);
    /// ```
    pub fn retain_sorted_by<F>(&mut self, mut compare: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        let ghost = self.ghost_node();
        let mut current = self.front_node();
        // SAFETY: `current` is a non-ghost node of the ring inside the loop, and
        // every detached `prev` is a non-ghost node before it.
        unsafe {
            while current != ghost {
                loop {
                    let prev = prev_of(current);
                    if prev == ghost
                        || compare(element_of(current), element_of(prev)) != Ordering::Less
                    {
                        break;
                    }
                    drop(self.detach_node(prev));
                }
                current = next_of(current);
            }
        }
    }
}

impl<T: PartialEq> Ring<T> {
    /// Removes every run of two or more adjacent equal elements. See
    /// [`Ring::retain_unique_by`].
    pub fn retain_unique(&mut self) {
        self.retain_unique_by(T::eq);
    }
}

impl<T: Ord> Ring<T> {
    /// Keeps only the elements with no strictly smaller element after them.
    /// See [`Ring::retain_sorted_by`].
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_queue::Ring;
    /// use std::iter::FromIterator;
    ///
    /// let mut ring = Ring::from_iter([5, 2, 4, 7, 1]);
    /// ring.retain_sorted();
    /// assert_eq!(Vec::from_iter(ring), vec![1]);
    /// ```
    pub fn retain_sorted(&mut self) {
        self.retain_sorted_by(T::cmp);
    }
}
