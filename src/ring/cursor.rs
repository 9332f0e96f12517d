use crate::ring::{element_mut_of, element_of, next_of, prev_of, Node, Ring};
use std::fmt;
use std::fmt::Formatter;
use std::ptr::NonNull;

/// A cursor over a `Ring`.
///
/// A `Cursor` is like an iterator, except that it can freely seek back-and-forth.
///
/// In a ring with length *n*, there are *n* + 1 valid locations for the cursor,
/// indexed by 0, 1, ..., *n*, where *n* is the ghost node of the ring.
///
/// # Examples
///
/// Here is a simple example showing how the cursors work. (The ghost node of the
/// ring is denoted by `#`).
/// ```
/// use ring_queue::Ring;
/// use std::iter::FromIterator;
///
/// // Create a ring: [ A B C D #]
/// let ring = Ring::from_iter(['A', 'B', 'C', 'D']);
///
/// // Create a cursor at start: [|A B C D #]
/// let mut cursor = ring.cursor_start();
/// assert_eq!(cursor.current(), Some(&'A'));
///
/// // Move cursor forward: [ A|B C D #]
/// assert!(cursor.move_next().is_ok());
/// assert_eq!(cursor.current(), Some(&'B'));
///
/// // Create a cursor in the end: [ A B C D|#]
/// let mut cursor = ring.cursor_end();
/// assert_eq!(cursor.current(), None);
/// assert!(cursor.move_next().is_err());
///
/// // Move cursor forward, cyclically: [|A B C D #]
/// cursor.move_next_cyclic();
/// assert_eq!(cursor.current(), Some(&'A'));
/// ```
#[derive(Clone)]
pub struct Cursor<'a, T: 'a> {
    pub(crate) current: NonNull<Node<T>>,
    pub(crate) ring: &'a Ring<T>,
}

/// A cursor over a `Ring` with editing operations.
///
/// A `CursorMut` is like an iterator, except that it can freely seek back-and-forth,
/// and can safely mutate the ring during iteration. References it yields are
/// tied to its own lifetime, so it cannot yield multiple elements at once.
///
/// ```compile_fail
/// use ring_queue::Ring;
/// use std::iter::FromIterator;
///
/// let mut ring = Ring::from_iter([1, 2, 3]);
/// let mut cursor = ring.cursor_start_mut();
/// println!("{:?}", ring.back());
/// println!("{:?}", cursor.current());
/// ```
pub struct CursorMut<'a, T: 'a> {
    pub(crate) current: NonNull<Node<T>>,
    pub(crate) ring: &'a mut Ring<T>,
}

macro_rules! impl_cursor {
    ($CURSOR:ident) => {
        // Private methods
        impl<'a, T: 'a> $CURSOR<'a, T> {
            pub(crate) fn is_ghost_node(&self) -> bool {
                self.current == self.ring.ghost_node()
            }
            pub(crate) fn is_front_node(&self) -> bool {
                self.prev_node() == self.ring.ghost_node()
            }
            pub(crate) fn next_node(&self) -> NonNull<Node<T>> {
                // SAFETY: `current.next` is always valid since it is a cyclic ring.
                unsafe { next_of(self.current) }
            }
            pub(crate) fn prev_node(&self) -> NonNull<Node<T>> {
                // SAFETY: `current.prev` is always valid since it is a cyclic ring.
                unsafe { prev_of(self.current) }
            }
        }

        impl<'a, T: 'a> $CURSOR<'a, T> {
            /// Returns `true` if the `Ring` is empty. See [`Ring::is_empty`].
            pub fn is_empty(&self) -> bool {
                self.ring.is_empty()
            }

            /// Returns `true` if the cursor is at the ghost node.
            pub fn is_at_end(&self) -> bool {
                self.is_ghost_node()
            }

            /// Move the cursor to the next position, where passing
            /// through the ghost node is allowed.
            ///
            /// This operation should compute in *O*(*1*) time.
            pub fn move_next_cyclic(&mut self) {
                self.current = self.next_node();
            }

            /// Move the cursor to the previous position, where passing
            /// through the ghost node is allowed.
            ///
            /// This operation should compute in *O*(*1*) time.
            pub fn move_prev_cyclic(&mut self) {
                self.current = self.prev_node();
            }

            /// Move the cursor to the next position, or return an error
            /// when passing through the ghost node is happened.
            ///
            /// This operation should compute in *O*(*1*) time.
            pub fn move_next(&mut self) -> Result<(), &'static str> {
                if !self.is_ghost_node() {
                    self.move_next_cyclic();
                    return Ok(());
                }
                Err("`move_next` across ghost boundary")
            }

            /// Move the cursor to the previous position, or return an error
            /// when passing through the ghost node is happened.
            ///
            /// This operation should compute in *O*(*1*) time.
            pub fn move_prev(&mut self) -> Result<(), &'static str> {
                if !self.is_front_node() {
                    self.move_prev_cyclic();
                    return Ok(());
                }
                Err("`move_prev` across ghost boundary")
            }

            /// Move forward the cursor by given steps, or return the number of
            /// steps actually taken when passing through the ghost node is happened.
            ///
            /// If an error occurs, the cursor will stay at the ghost node.
            ///
            /// This operation should compute in *O*(*n*) time.
            ///
            /// # Examples
            ///
            /// ```
            /// use ring_queue::Ring;
            /// use std::iter::FromIterator;
            ///
            /// let ring = Ring::from_iter([1, 2, 3]);
            /// let mut cursor = ring.cursor_start();
            ///
            /// assert!(cursor.seek_forward(2).is_ok());
            /// assert_eq!(cursor.current(), Some(&3));
            ///
            /// assert_eq!(cursor.seek_forward(5), Err(1));
            /// assert_eq!(cursor.previous(), Some(&3));
            /// ```
            pub fn seek_forward(&mut self, steps: usize) -> Result<(), usize> {
                (0..steps).try_for_each(|i| self.move_next().map_err(|_| i))
            }

            /// Move backward the cursor by given steps, or return the number of
            /// steps actually taken when passing through the ghost node is happened.
            ///
            /// If an error occurs, the cursor will stay at the first node.
            ///
            /// This operation should compute in *O*(*n*) time.
            pub fn seek_backward(&mut self, steps: usize) -> Result<(), usize> {
                (0..steps).try_for_each(|i| self.move_prev().map_err(|_| i))
            }

            /// Set the cursor to the start of the ring (i.e. the first node).
            #[inline]
            pub fn move_to_start(&mut self) {
                self.current = self.ring.front_node();
            }

            /// Set the cursor to the end of the ring (i.e. the ghost node).
            #[inline]
            pub fn move_to_end(&mut self) {
                self.current = self.ring.ghost_node();
            }
        }

        impl<'a, T: fmt::Debug + 'a> fmt::Debug for $CURSOR<'a, T> {
            fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
                f.debug_struct(stringify!($CURSOR))
                    .field("ring", &self.ring)
                    .field("current", &self.current())
                    .finish()
            }
        }
    };
}

impl_cursor!(CursorMut);
impl_cursor!(Cursor);

impl<'a, T: 'a> Cursor<'a, T> {
    pub(crate) fn new(ring: &'a Ring<T>, current: NonNull<Node<T>>) -> Self {
        Self { current, ring }
    }

    /// Return an immutable reference of current node of the cursor,
    /// or return `None` if it is located at the ghost node.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_queue::Ring;
    /// use std::iter::FromIterator;
    ///
    /// let ring = Ring::from_iter([1, 2, 3]);
    /// let mut cursor = ring.cursor_start();
    /// assert_eq!(cursor.current(), Some(&1));
    /// cursor.move_to_end();
    /// assert_eq!(cursor.current(), None);
    /// ```
    pub fn current(&self) -> Option<&'a T> {
        if self.is_ghost_node() {
            return None;
        }
        // SAFETY: it is safe because non-ghost nodes must hold a
        // valid element.
        unsafe { Some(element_of(self.current)) }
    }

    /// Return an immutable reference of previous node of the cursor,
    /// or return `None` if it is located at the first node.
    pub fn previous(&self) -> Option<&'a T> {
        if self.is_front_node() {
            return None;
        }
        // SAFETY: it is safe because the previous node of a non-first node
        // is never a ghost node, and non-ghost nodes must hold a valid element.
        Some(unsafe { element_of(self.prev_node()) })
    }
}

impl<'a, T: 'a> CursorMut<'a, T> {
    pub(crate) fn new(ring: &'a mut Ring<T>, current: NonNull<Node<T>>) -> Self {
        Self { current, ring }
    }

    /// Insert a new item between the adjacent nodes `prev` and `next`.
    ///
    /// It is unsafe because it does not check whether `prev` and `next`
    /// belong to the ring that the cursor points to.
    unsafe fn insert_between(&mut self, prev: NonNull<Node<T>>, next: NonNull<Node<T>>, item: T) {
        let node = Node::new_detached(item);
        self.ring.attach_node(prev, next, node);
    }
}

// Methods that does not change the linking structure of the ring.
impl<'a, T: 'a> CursorMut<'a, T> {
    /// Return a reference of current node of the cursor, or return `None`
    /// if it is located at the ghost node.
    pub fn current(&self) -> Option<&T> {
        if self.is_ghost_node() {
            return None;
        }
        // SAFETY: it is safe because non-ghost nodes must hold a
        // valid element.
        unsafe { Some(element_of(self.current)) }
    }

    /// Return a reference of previous node of the cursor, or return `None`
    /// if it is located at the first node.
    pub fn previous(&self) -> Option<&T> {
        if self.is_front_node() {
            return None;
        }
        // SAFETY: the previous node of a non-first node is never a ghost node.
        Some(unsafe { element_of(self.prev_node()) })
    }

    /// Return a mutable reference of current node of the cursor,
    /// or return `None` if it is located at the ghost node.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_queue::Ring;
    /// use std::iter::FromIterator;
    ///
    /// let mut ring = Ring::from_iter([1, 2, 3]);
    ///
    /// let mut cursor = ring.cursor_start_mut();
    /// *cursor.current_mut().unwrap() *= 5;
    /// assert_eq!(cursor.current(), Some(&5));
    ///
    /// // Cannot mutate the ghost node.
    /// assert!(ring.cursor_end_mut().current_mut().is_none());
    /// ```
    pub fn current_mut(&mut self) -> Option<&mut T> {
        if self.is_ghost_node() {
            return None;
        }
        // SAFETY: it is safe because non-ghost nodes must hold a
        // valid element.
        unsafe { Some(element_mut_of(self.current)) }
    }

    /// Temporarily view the ring via an immutable reference.
    pub fn view(&self) -> &Ring<T> {
        self.ring
    }
}

// Methods that might change the linking structure of the ring.
impl<'a, T: 'a> CursorMut<'a, T> {
    /// Add an element before the cursor position. The cursor stays put.
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_queue::Ring;
    /// use std::iter::FromIterator;
    ///
    /// let mut ring = Ring::from_iter([1, 2, 3]);
    /// let mut cursor = ring.cursor_start_mut();
    /// cursor.move_next().unwrap();
    ///
    /// cursor.insert(4); // becomes [1, 4, 2, 3]
    /// assert_eq!(cursor.current(), Some(&2));
    ///
    /// cursor.move_to_end();
    /// cursor.insert(5); // becomes [1, 4, 2, 3, 5]
    /// assert_eq!(cursor.previous(), Some(&5));
    ///
    /// assert_eq!(Vec::from_iter(ring), vec![1, 4, 2, 3, 5]);
    /// ```
    pub fn insert(&mut self, item: T) {
        // SAFETY: `self.current` is a valid node in the ring, and so is its previous node.
        unsafe { self.insert_between(self.prev_node(), self.current, item) };
    }

    /// Add an element after the cursor position. The cursor stays put.
    ///
    /// At the ghost node, this inserts at the front of the ring.
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_queue::Ring;
    /// use std::iter::FromIterator;
    ///
    /// let mut ring = Ring::from_iter([1, 2, 3]);
    /// let mut cursor = ring.cursor_start_mut();
    ///
    /// cursor.insert_after(4); // becomes [1, 4, 2, 3]
    /// assert_eq!(cursor.current(), Some(&1));
    ///
    /// cursor.move_to_end();
    /// cursor.insert_after(0); // becomes [0, 1, 4, 2, 3]
    ///
    /// assert_eq!(Vec::from_iter(ring), vec![0, 1, 4, 2, 3]);
    /// ```
    pub fn insert_after(&mut self, item: T) {
        // SAFETY: `self.current` is a valid node in the ring, and so is its next node.
        unsafe { self.insert_between(self.current, self.next_node(), item) };
    }

    /// Remove the element at the cursor and return it, or return `None`
    /// if the cursor is at the ghost node. After removal, the cursor
    /// is moved to the next node unless no removing is happened.
    ///
    /// This operation should compute in *O*(*1*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_queue::Ring;
    /// use std::iter::FromIterator;
    ///
    /// let mut ring = Ring::from_iter(0..5);
    /// let mut cursor = ring.cursor_start_mut();
    /// cursor.seek_forward(2).unwrap();
    ///
    /// assert_eq!(cursor.remove(), Some(2)); // becomes [0, 1, 3, 4]
    /// assert_eq!(cursor.current(), Some(&3));
    ///
    /// cursor.move_to_end();
    /// assert_eq!(cursor.remove(), None);
    ///
    /// assert_eq!(Vec::from_iter(ring), vec![0, 1, 3, 4]);
    /// ```
    pub fn remove(&mut self) -> Option<T> {
        if self.is_ghost_node() {
            return None;
        }
        let next = self.next_node();
        // SAFETY: `self.current` is a valid non-ghost node in the ring, so it is safe.
        let node = unsafe { self.ring.detach_node(self.current) };
        self.current = next;
        Some(Node::into_element(node))
    }

    /// Remove the element before the cursor and return it, or return `None` if
    /// the cursor is at the first node. The cursor is not moved.
    ///
    /// This operation should compute in *O*(*1*) time.
    pub fn backspace(&mut self) -> Option<T> {
        if self.is_front_node() {
            return None;
        }
        // SAFETY: the previous node of a non-first node is a valid non-ghost node.
        let node = unsafe { self.ring.detach_node(self.prev_node()) };
        Some(Node::into_element(node))
    }

    /// Split the ring into two after the current element (inclusive). This will
    /// return a new ring consisting of everything after the cursor (inclusive),
    /// with the original ring retaining everything before (exclusive).
    ///
    /// If the cursor is pointing at the ghost node, `None` will be returned.
    ///
    /// This operation should compute in *O*(*1*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_queue::Ring;
    /// use std::iter::FromIterator;
    ///
    /// let mut ring = Ring::from_iter(0..10);
    /// let mut cursor = ring.cursor_start_mut();
    /// cursor.seek_forward(5).unwrap();
    ///
    /// let ring2 = cursor.split().unwrap();
    /// assert_eq!(cursor.current(), None);
    ///
    /// assert_eq!(Vec::from_iter(ring2), vec![5, 6, 7, 8, 9]);
    /// assert_eq!(Vec::from_iter(ring), vec![0, 1, 2, 3, 4]);
    /// ```
    pub fn split(&mut self) -> Option<Ring<T>> {
        if self.is_ghost_node() {
            return None;
        }
        // After splitting, the current node is pointing to the ghost node.
        let current = std::mem::replace(&mut self.current, self.ring.ghost_node());
        // SAFETY: since current is a non-ghost node, the range from current to
        // the back node is a valid range in the ring, and thus it is safe.
        unsafe {
            let back = self.ring.back_node();
            Some(Ring::from_detached(self.ring.detach_nodes(current, back)))
        }
    }

    /// Split the ring into two before the current element (exclusive). This will
    /// return a new ring consisting of everything before the cursor (exclusive),
    /// with the original ring retaining everything after (inclusive).
    ///
    /// If the cursor is pointing at the front node, `None` will be returned.
    ///
    /// This operation should compute in *O*(*1*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_queue::Ring;
    /// use std::iter::FromIterator;
    ///
    /// let mut ring = Ring::from_iter(0..10);
    /// let mut cursor = ring.cursor_start_mut();
    /// cursor.seek_forward(5).unwrap();
    ///
    /// let ring2 = cursor.split_before().unwrap();
    /// assert_eq!(cursor.current(), Some(&5));
    ///
    /// assert_eq!(Vec::from_iter(ring2), vec![0, 1, 2, 3, 4]);
    /// assert_eq!(Vec::from_iter(ring), vec![5, 6, 7, 8, 9]);
    /// ```
    pub fn split_before(&mut self) -> Option<Ring<T>> {
        if self.is_front_node() {
            return None;
        }
        // SAFETY: since current is a non-front node, the range from the front node
        // to the previous node is a valid range in the ring, and thus it is safe.
        unsafe {
            let (front, back) = (self.ring.front_node(), self.prev_node());
            Some(Ring::from_detached(self.ring.detach_nodes(front, back)))
        }
    }

    /// Splice another ring between the current node and its previous node.
    ///
    /// This operation should compute in *O*(*1*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_queue::Ring;
    /// use std::iter::FromIterator;
    ///
    /// let mut ring = Ring::from_iter([0, 1, 7, 8, 9]);
    /// let ring2 = Ring::from_iter([2, 3, 4, 5, 6]);
    /// let mut cursor = ring.cursor_start_mut();
    /// cursor.seek_forward(2).unwrap();
    ///
    /// cursor.splice(ring2);
    /// assert_eq!(cursor.current(), Some(&7));
    ///
    /// assert_eq!(Vec::from_iter(ring), Vec::from_iter(0..10));
    /// ```
    pub fn splice(&mut self, other: Ring<T>) {
        if let Some(detached) = other.into_detached() {
            // SAFETY: `self.current.prev` and `self.current` are valid nodes in the ring,
            // and they are adjacent, so it is safe.
            unsafe {
                let prev = self.prev_node();
                self.ring.attach_nodes(prev, self.current, detached);
            }
        }
    }
}

unsafe impl<T: Sync> Send for Cursor<'_, T> {}

unsafe impl<T: Sync> Sync for Cursor<'_, T> {}

unsafe impl<T: Send> Send for CursorMut<'_, T> {}

unsafe impl<T: Sync> Sync for CursorMut<'_, T> {}

#[cfg(test)]
mod tests {
    use crate::ring::Ring;
    use std::iter::FromIterator;

    #[test]
    fn cursor_walks_both_ways() {
        let ring = Ring::from_iter(0..4);
        let mut cursor = ring.cursor_start();
        assert!(cursor.move_prev().is_err());
        assert_eq!(cursor.seek_forward(4), Ok(()));
        assert!(cursor.is_at_end());
        assert_eq!(cursor.seek_backward(5), Err(4));
        assert_eq!(cursor.current(), Some(&0));
        cursor.move_prev_cyclic();
        assert!(cursor.is_at_end());
        assert_eq!(cursor.previous(), Some(&3));
        cursor.move_to_start();
        assert_eq!(cursor.current(), Some(&0));
    }

    #[test]
    fn cursor_mut_views_its_ring() {
        let mut ring = Ring::from_iter(0..3);
        let mut cursor = ring.cursor_end_mut();
        cursor.move_to_start();
        cursor.remove();
        assert_eq!(cursor.view(), &Ring::from_iter(1..3));
        assert_eq!(cursor.view().len(), 2);
    }

    #[test]
    fn cursor_on_empty_ring() {
        let mut ring = Ring::<i32>::new();
        let mut cursor = ring.cursor_start_mut();
        assert!(cursor.is_empty());
        assert!(cursor.is_at_end());
        assert!(cursor.move_next().is_err());
        assert!(cursor.move_prev().is_err());
        assert_eq!(cursor.remove(), None);
        assert_eq!(cursor.backspace(), None);
        assert!(cursor.split().is_none());
        assert!(cursor.split_before().is_none());
        cursor.insert_after(1);
        cursor.insert(0);
        assert_eq!(Vec::from_iter(ring.iter().copied()), vec![1, 0]);
        ring.assert_well_formed();
    }

    #[test]
    fn cursor_removes_while_walking() {
        let mut ring = Ring::from_iter(0..10);
        let mut cursor = ring.cursor_start_mut();
        while let Some(&value) = cursor.current() {
            if value % 3 == 0 {
                cursor.remove();
            } else {
                cursor.move_next_cyclic();
            }
        }
        assert_eq!(ring.assert_well_formed(), 6);
        assert_eq!(Vec::from_iter(ring), vec![1, 2, 4, 5, 7, 8]);
    }
}
