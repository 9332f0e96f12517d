use std::fmt::{Debug, Formatter};
use std::marker::PhantomData;
use std::ptr::NonNull;

use crate::ring::cursor::{Cursor, CursorMut};
use crate::ring::iterator::{Iter, IterMut};

pub mod cursor;
pub mod iterator;

mod algorithms;

pub use algorithms::shuffle::Uniform;

/// The `Ring` is a circular doubly-linked list terminated by a ghost (sentinel)
/// node. It allows inserting, removing and relinking elements at a known
/// position in constant time. In compromise, accessing elements at any position
/// and computing the length take *O*(*n*) time.
///
/// The `Ring` only holds a pointer to its ghost node. The ghost node carries no
/// payload; `ghost.next` is the first element and `ghost.prev` the last one.
/// An empty ring is a ghost node pointing to itself in both directions.
///
/// The length is never cached, so every mutation is reflected by the very
/// next traversal.
///
/// # Naming Conventions
///
/// - `front..=back`: a closed range of ring nodes, both inclusive;
/// - `start..end`: a half-open range of ring nodes, left inclusive and right
///   exclusive (probably the ghost node).
pub struct Ring<T> {
    ghost: NonNull<Node<Erased>>,
    _marker: PhantomData<Box<Node<T>>>,
}

#[repr(C)]
pub(crate) struct Node<T> {
    pub(crate) next: NonNull<Node<T>>,
    pub(crate) prev: NonNull<Node<T>>,
    pub(crate) element: T,
}

struct Erased;

/// Nodes fragment detached from a ring, used in cutting or splicing.
///
/// When detached from a ring, reading of `front.prev` and `back.next`
/// is invalid.
pub(crate) struct DetachedNodes<T> {
    pub(crate) front: NonNull<Node<T>>,
    pub(crate) back: NonNull<Node<T>>,
    _marker: PhantomData<Box<Node<T>>>,
}

// Link helpers. They go through raw places so that the ghost node, whose
// allocation has no `element`, is never viewed as a whole `Node<T>`.

#[inline]
pub(crate) unsafe fn next_of<T>(node: NonNull<Node<T>>) -> NonNull<Node<T>> {
    (*node.as_ptr()).next
}

#[inline]
pub(crate) unsafe fn prev_of<T>(node: NonNull<Node<T>>) -> NonNull<Node<T>> {
    (*node.as_ptr()).prev
}

/// Returns the element of a non-ghost node.
#[inline]
pub(crate) unsafe fn element_of<'a, T>(node: NonNull<Node<T>>) -> &'a T {
    &(*node.as_ptr()).element
}

#[inline]
pub(crate) unsafe fn element_mut_of<'a, T>(node: NonNull<Node<T>>) -> &'a mut T {
    &mut (*node.as_ptr()).element
}

#[inline]
pub(crate) unsafe fn connect<T>(prev: NonNull<Node<T>>, next: NonNull<Node<T>>) {
    (*prev.as_ptr()).next = next;
    (*next.as_ptr()).prev = prev;
}

/// Move the single node `from` to the position right before `to`.
///
/// `from` and `to` may belong to different rings, but must not be the same
/// node, and `from` must not be a ghost node.
pub(crate) unsafe fn move_node<T>(from: NonNull<Node<T>>, to: NonNull<Node<T>>) {
    move_nodes(from, from, to);
}

/// Move the range `from_front..=from_back` to the position right before `to`.
///
/// `to` must not lie inside the moved range, and the range must not contain
/// a ghost node.
pub(crate) unsafe fn move_nodes<T>(
    from_front: NonNull<Node<T>>,
    from_back: NonNull<Node<T>>,
    to: NonNull<Node<T>>,
) {
    connect(prev_of(from_front), next_of(from_back));
    connect(prev_of(to), from_front);
    connect(from_back, to);
}

// private methods
impl<T> Ring<T> {
    pub(crate) fn ghost_node(&self) -> NonNull<Node<T>> {
        self.ghost.cast()
    }
    pub(crate) fn front_node(&self) -> NonNull<Node<T>> {
        // SAFETY: `ghost.next` is always valid (either `ghost` itself, or the first element
        // in the ring).
        unsafe { next_of(self.ghost_node()) }
    }
    pub(crate) fn back_node(&self) -> NonNull<Node<T>> {
        // SAFETY: `ghost.prev` is always valid (either `ghost` itself, or the last element
        // in the ring).
        unsafe { prev_of(self.ghost_node()) }
    }

    /// Locate the node at index `floor(n / 2)` with a slow/fast walk, or the
    /// ghost node if the ring is empty.
    pub(crate) fn middle_node(&self) -> NonNull<Node<T>> {
        let ghost = self.ghost_node();
        let mut slow = self.front_node();
        let mut fast = slow;
        // SAFETY: both cursors only follow `next` links of a well-formed ring and
        // stop at the ghost node.
        unsafe {
            while fast != ghost && next_of(fast) != ghost {
                slow = next_of(slow);
                fast = next_of(next_of(fast));
            }
        }
        slow
    }

    /// Detach a single node `node` from the ring, and return it as a box.
    ///
    /// It is unsafe because it does not check whether `node` belongs to the ring,
    /// or whether it is the ghost node.
    ///
    /// If the `node` does not belong to the ring, this function call will make
    /// the ring ill-formed.
    pub(crate) unsafe fn detach_node(&mut self, node: NonNull<Node<T>>) -> Box<Node<T>> {
        connect(prev_of(node), next_of(node));
        Box::from_raw(node.as_ptr())
    }

    /// Attach a single node `node` to the ring, between `prev` and `next`.
    ///
    /// It is unsafe because it does not check whether `prev` and `next` belongs
    /// to the ring, or whether the `prev` and `next` is adjacent (only in
    /// `#[cfg(debug_assertions)]`).
    pub(crate) unsafe fn attach_node(
        &mut self,
        prev: NonNull<Node<T>>,
        next: NonNull<Node<T>>,
        node: NonNull<Node<T>>,
    ) {
        #[cfg(debug_assertions)]
        assert_adjacent(prev, next);
        connect(prev, node);
        connect(node, next);
        #[cfg(debug_assertions)]
        {
            assert_adjacent(prev, node);
            assert_adjacent(node, next);
        }
    }

    /// Detach a range of nodes `front..=back` from the ring, and return the detached
    /// nodes.
    ///
    /// It is unsafe because it does not check whether `front..=back` is a valid range
    /// (i.e. `front` must **NOT** be at the right of `back`), or whether it belongs
    /// to the ring.
    pub(crate) unsafe fn detach_nodes(
        &mut self,
        front: NonNull<Node<T>>,
        back: NonNull<Node<T>>,
    ) -> DetachedNodes<T> {
        connect(prev_of(front), next_of(back));
        DetachedNodes::new(front, back)
    }

    /// Attach a range of detached nodes to the ring, between `prev` and `next`.
    ///
    /// It is unsafe because it does not check whether `prev` and `next` belongs
    /// to the ring, or whether the `prev` and `next` is adjacent (only in
    /// `#[cfg(debug_assertions)]`).
    pub(crate) unsafe fn attach_nodes(
        &mut self,
        prev: NonNull<Node<T>>,
        next: NonNull<Node<T>>,
        detached: DetachedNodes<T>,
    ) {
        #[cfg(debug_assertions)]
        assert_adjacent(prev, next);
        connect(prev, detached.front);
        connect(detached.back, next);
        #[cfg(debug_assertions)]
        {
            assert_adjacent(prev, detached.front);
            assert_adjacent(detached.back, next);
        }
    }

    /// Detach all nodes from the ring, and return the detached nodes, or return
    /// `None` if the ring is empty.
    pub(crate) fn detach_all_nodes(&mut self) -> Option<DetachedNodes<T>> {
        if self.is_empty() {
            return None;
        }
        // SAFETY: `self.front_node()..=self.back_node()` is a valid range.
        unsafe { Some(self.detach_nodes(self.front_node(), self.back_node())) }
    }

    /// Construct a ring from detached nodes.
    pub(crate) fn from_detached(detached: DetachedNodes<T>) -> Self {
        let mut ring = Ring::new();
        // SAFETY: the ghost node of a new ring is adjacent to itself.
        unsafe {
            ring.attach_nodes(ring.ghost_node(), ring.ghost_node(), detached);
        }
        ring
    }

    /// Like [`Ring::detach_all_nodes`], but consume the ring.
    pub(crate) fn into_detached(mut self) -> Option<DetachedNodes<T>> {
        self.detach_all_nodes()
    }
}

impl<T> Ring<T> {
    /// Create an empty `Ring`.
    ///
    /// # Examples
    /// ```
    /// use ring_queue::Ring;
    /// let ring: Ring<u32> = Ring::new();
    /// assert!(ring.is_empty());
    /// ```
    #[inline]
    pub fn new() -> Self {
        let ghost = new_ghost();
        let _marker = PhantomData;
        Self { ghost, _marker }
    }

    /// Returns `true` if the `Ring` has no element.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.front_node() == self.ghost_node()
    }

    /// Returns `true` if the `Ring` has exactly one element.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_queue::Ring;
    ///
    /// let mut ring = Ring::new();
    /// assert!(!ring.is_singular());
    /// ring.push_back(1);
    /// assert!(ring.is_singular());
    /// ring.push_back(2);
    /// assert!(!ring.is_singular());
    /// ```
    #[inline]
    pub fn is_singular(&self) -> bool {
        !self.is_empty() && self.front_node() == self.back_node()
    }

    /// Returns the number of elements, counted by walking the ring.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Removes all elements from the `Ring`.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    #[inline]
    pub fn clear(&mut self) {
        while self.pop_front().is_some() {}
    }

    /// Provides a reference to the front element, or `None` if the ring is
    /// empty.
    #[inline]
    pub fn front(&self) -> Option<&T> {
        self.cursor_start().current()
    }

    /// Provides a mutable reference to the front element, or `None` if the ring
    /// is empty.
    #[inline]
    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.iter_mut().next()
    }

    /// Provides a reference to the back element, or `None` if the ring is
    /// empty.
    #[inline]
    pub fn back(&self) -> Option<&T> {
        self.cursor_end().previous()
    }

    /// Provides a mutable reference to the back element, or `None` if the ring
    /// is empty.
    #[inline]
    pub fn back_mut(&mut self) -> Option<&mut T> {
        self.iter_mut().next_back()
    }

    /// Provides a reference to the element at index `floor(n / 2)`, the one
    /// [`Ring::remove_middle`] would remove.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_queue::Ring;
    /// use std::iter::FromIterator;
    ///
    /// assert_eq!(Ring::from_iter([0, 1, 2]).middle(), Some(&1));
    /// assert_eq!(Ring::from_iter([0, 1, 2, 3]).middle(), Some(&2));
    /// assert_eq!(Ring::<i32>::new().middle(), None);
    /// ```
    pub fn middle(&self) -> Option<&T> {
        let middle = self.middle_node();
        if middle == self.ghost_node() {
            return None;
        }
        // SAFETY: non-ghost nodes hold a valid element.
        Some(unsafe { element_of(middle) })
    }

    /// Adds an element first in the ring.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    pub fn push_front(&mut self, elt: T) {
        self.cursor_start_mut().insert(elt);
    }

    /// Removes the first element and returns it, or `None` if the ring is
    /// empty.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_queue::Ring;
    ///
    /// let mut ring = Ring::new();
    /// assert_eq!(ring.pop_front(), None);
    ///
    /// ring.push_front(1);
    /// ring.push_front(3);
    /// assert_eq!(ring.pop_front(), Some(3));
    /// assert_eq!(ring.pop_front(), Some(1));
    /// assert_eq!(ring.pop_front(), None);
    /// ```
    pub fn pop_front(&mut self) -> Option<T> {
        self.cursor_start_mut().remove()
    }

    /// Appends an element to the back of a ring.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    pub fn push_back(&mut self, elt: T) {
        self.cursor_end_mut().insert(elt);
    }

    /// Removes the last element from a ring and returns it, or `None` if
    /// it is empty.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    pub fn pop_back(&mut self) -> Option<T> {
        self.cursor_end_mut().backspace()
    }

    /// Provides a cursor at the first node.
    ///
    /// The cursor is pointing to the "ghost" node if the ring is empty.
    pub fn cursor_start(&self) -> Cursor<'_, T> {
        Cursor::new(self, self.front_node())
    }

    /// Provides a cursor at the ghost node.
    pub fn cursor_end(&self) -> Cursor<'_, T> {
        Cursor::new(self, self.ghost_node())
    }

    /// Provides a cursor with editing operations at the first node.
    ///
    /// The cursor is pointing to the "ghost" node if the ring is empty.
    pub fn cursor_start_mut(&mut self) -> CursorMut<'_, T> {
        let front = self.front_node();
        CursorMut::new(self, front)
    }

    /// Provides a cursor with editing operations at the ghost node.
    pub fn cursor_end_mut(&mut self) -> CursorMut<'_, T> {
        let ghost = self.ghost_node();
        CursorMut::new(self, ghost)
    }

    /// Provides a forward iterator.
    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self)
    }

    /// Provides a forward iterator with mutable references.
    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut::new(self)
    }

    /// Moves all elements from `other` to the end of the ring.
    ///
    /// This reuses all the nodes from `other` and moves them into `self`. After
    /// this operation, `other` becomes empty.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time and *O*(1) memory.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_queue::Ring;
    ///
    /// let mut ring1 = Ring::new();
    /// ring1.push_back('a');
    ///
    /// let mut ring2 = Ring::new();
    /// ring2.push_back('b');
    /// ring2.push_back('c');
    ///
    /// ring1.append(&mut ring2);
    ///
    /// let mut iter = ring1.iter();
    /// assert_eq!(iter.next(), Some(&'a'));
    /// assert_eq!(iter.next(), Some(&'b'));
    /// assert_eq!(iter.next(), Some(&'c'));
    /// assert!(iter.next().is_none());
    ///
    /// assert!(ring2.is_empty());
    /// ```
    pub fn append(&mut self, other: &mut Self) {
        if let Some(detached) = other.detach_all_nodes() {
            // `self.back_node()` and `self.ghost_node()` are valid
            // nodes in the ring and they are adjacent, so it is safe.
            unsafe { self.attach_nodes(self.back_node(), self.ghost_node(), detached) }
        }
    }

    /// Moves all elements from `other` to the beginning of the ring.
    ///
    /// After this operation, `other` becomes empty.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time and *O*(1) memory.
    pub fn prepend(&mut self, other: &mut Self) {
        if let Some(detached) = other.detach_all_nodes() {
            // `self.ghost_node()` and `self.front_node()` are valid
            // nodes in the ring and they are adjacent, so it is safe.
            unsafe { self.attach_nodes(self.ghost_node(), self.front_node(), detached) }
        }
    }

    /// Cuts the first `count` elements off into a new ring, keeping the rest
    /// in `self`. Returns `None`, leaving `self` untouched, if the ring holds
    /// fewer than `count` elements.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(`count`) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_queue::Ring;
    /// use std::iter::FromIterator;
    ///
    /// let mut ring = Ring::from_iter(0..5);
    /// let front = ring.cut(2).unwrap();
    /// assert_eq!(Vec::from_iter(front), vec![0, 1]);
    /// assert_eq!(Vec::from_iter(ring.iter().copied()), vec![2, 3, 4]);
    ///
    /// assert!(ring.cut(4).is_none());
    /// assert_eq!(ring.len(), 3);
    /// ```
    pub fn cut(&mut self, count: usize) -> Option<Ring<T>> {
        let mut cursor = self.cursor_start_mut();
        cursor.seek_forward(count).ok()?;
        Some(cursor.split_before().unwrap_or_default())
    }

    /// Splits the ring into two at the given index. Returns everything after
    /// the given index (inclusive).
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Panics
    ///
    /// Panics if `at > len`
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_queue::Ring;
    ///
    /// let mut ring = Ring::new();
    ///
    /// ring.push_front(1);
    /// ring.push_front(2);
    /// ring.push_front(3);
    ///
    /// let mut split = ring.split_off(2);
    ///
    /// assert_eq!(split.pop_front(), Some(1));
    /// assert_eq!(split.pop_front(), None);
    /// ```
    pub fn split_off(&mut self, at: usize) -> Ring<T> {
        let mut cursor = self.cursor_start_mut();
        cursor
            .seek_forward(at)
            .expect("Cannot split off at a nonexistent index");
        cursor.split().unwrap_or_default()
    }
}

impl<T: Debug> Debug for Ring<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Default for Ring<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Node<T> {
    /// Create a detached node with given element.
    pub(crate) fn new_detached(element: T) -> NonNull<Node<T>> {
        let node = Box::new(Node {
            next: NonNull::dangling(),
            prev: NonNull::dangling(),
            element,
        });
        NonNull::from(Box::leak(node))
    }

    pub(crate) fn into_element(self: Box<Self>) -> T {
        self.element
    }
}

impl<T> DetachedNodes<T> {
    /// It is unsafe because it must be guaranteed that `front..=back` is
    /// a valid range.
    unsafe fn new(front: NonNull<Node<T>>, back: NonNull<Node<T>>) -> Self {
        let _marker = PhantomData;
        Self {
            front,
            back,
            _marker,
        }
    }
}

fn new_ghost() -> NonNull<Node<Erased>> {
    let ghost = Node::new_detached(Erased);
    // SAFETY: `ghost` is freshly allocated and uniquely owned here.
    unsafe { connect(ghost, ghost) };
    ghost
}

#[cfg(debug_assertions)]
fn assert_adjacent<T>(prev: NonNull<Node<T>>, next: NonNull<Node<T>>) {
    unsafe {
        assert_eq!(next_of(prev), next);
        assert_eq!(prev_of(next), prev);
    }
}

impl<T> Drop for Ring<T> {
    fn drop(&mut self) {
        self.clear();
        // SAFETY: the ghost node was leaked from a box in `new_ghost`, and it is
        // the last node left in the ring.
        unsafe { drop(Box::from_raw(self.ghost.as_ptr())) };
    }
}

unsafe impl<T: Send> Send for Ring<T> {}

unsafe impl<T: Sync> Sync for Ring<T> {}

#[cfg(test)]
impl<T> Ring<T> {
    /// Walk the ring in both directions, checking every link pair, and return
    /// the number of elements.
    pub(crate) fn assert_well_formed(&self) -> usize {
        let ghost = self.ghost_node();
        let (mut forward, mut backward) = (0, 0);
        unsafe {
            let mut node = ghost;
            loop {
                let next = next_of(node);
                assert_eq!(prev_of(next), node, "`next.prev` does not lead back");
                node = next;
                if node == ghost {
                    break;
                }
                forward += 1;
            }
            loop {
                let prev = prev_of(node);
                assert_eq!(next_of(prev), node, "`prev.next` does not lead back");
                node = prev;
                if node == ghost {
                    break;
                }
                backward += 1;
            }
        }
        assert_eq!(forward, backward);
        assert_eq!(forward, self.len());
        forward
    }
}
