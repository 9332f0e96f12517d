use crate::error::QueueError;
use crate::ring::iterator::Iter;
use crate::ring::{Ring, Uniform};
use std::convert::TryFrom;

pub mod chain;

pub use chain::{merge_all, Chain, QueueContext, QueueId};

/// A queue element, owning a copy of the string inserted by the caller.
///
/// Elements are ordered by the bytes of their values.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Element {
    value: String,
}

impl Element {
    /// Copies `value` with a fallible allocation.
    fn try_new(value: &str) -> Result<Self, QueueError> {
        let mut owned = String::new();
        owned.try_reserve_exact(value.len())?;
        owned.push_str(value);
        Ok(Self { value: owned })
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn into_value(self) -> String {
        self.value
    }

    /// Copies the value into `buf` as a NUL-terminated string, truncated to
    /// `buf.len() - 1` bytes. The rest of `buf` is zeroed. An empty `buf` is
    /// left untouched.
    fn copy_to(&self, buf: &mut [u8]) {
        if buf.is_empty() {
            return;
        }
        let len = self.value.len().min(buf.len() - 1);
        buf[..len].copy_from_slice(&self.value.as_bytes()[..len]);
        buf[len..].fill(0);
    }
}

/// A queue of strings, kept in a [`Ring`].
///
/// Insertion copies the string once; every other operation only relinks
/// nodes. The size is not cached.
///
/// # Examples
///
/// ```
/// use ring_queue::Queue;
///
/// let mut queue = Queue::new();
/// queue.insert_tail("b")?;
/// queue.insert_tail("c")?;
/// queue.insert_head("a")?;
/// assert_eq!(queue.values(), ["a", "b", "c"]);
///
/// let mut buf = [0xff; 4];
/// let removed = queue.remove_tail(Some(&mut buf));
/// assert_eq!(removed.map(|e| e.into_value()), Some("c".to_owned()));
/// assert_eq!(&buf, b"c\0\0\0");
/// # Ok::<(), ring_queue::QueueError>(())
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct Queue {
    ring: Ring<Element>,
}

impl Queue {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self { ring: Ring::new() }
    }

    /// Inserts a copy of `value` at the head of the queue.
    ///
    /// # Errors
    ///
    /// Returns [`QueueError::Alloc`] if the copy cannot be allocated, leaving
    /// the queue unchanged.
    pub fn insert_head(&mut self, value: &str) -> Result<(), QueueError> {
        self.ring.push_front(Element::try_new(value)?);
        Ok(())
    }

    /// Inserts a copy of `value` at the tail of the queue.
    ///
    /// # Errors
    ///
    /// Returns [`QueueError::Alloc`] if the copy cannot be allocated, leaving
    /// the queue unchanged.
    pub fn insert_tail(&mut self, value: &str) -> Result<(), QueueError> {
        self.ring.push_back(Element::try_new(value)?);
        Ok(())
    }

    /// Removes the head element and hands it to the caller, or returns `None`
    /// if the queue is empty.
    ///
    /// If `buf` is given, the removed value is also copied into it as a
    /// NUL-terminated string, truncated to fit.
    pub fn remove_head(&mut self, buf: Option<&mut [u8]>) -> Option<Element> {
        let element = self.ring.pop_front()?;
        if let Some(buf) = buf {
            element.copy_to(buf);
        }
        Some(element)
    }

    /// Removes the tail element and hands it to the caller, or returns `None`
    /// if the queue is empty. See [`Queue::remove_head`].
    pub fn remove_tail(&mut self, buf: Option<&mut [u8]>) -> Option<Element> {
        let element = self.ring.pop_back()?;
        if let Some(buf) = buf {
            element.copy_to(buf);
        }
        Some(element)
    }

    /// Returns the number of elements, by walking the queue.
    pub fn size(&self) -> usize {
        self.ring.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ring.is_empty()
    }

    /// Deletes the element at index `floor(n / 2)`. Returns `false` if the
    /// queue is empty.
    pub fn delete_mid(&mut self) -> bool {
        self.ring.remove_middle().is_some()
    }

    /// Deletes every element whose value occurs more than once, all copies
    /// included. The queue is expected to be sorted. Returns `false` only if
    /// the queue is empty.
    ///
    /// ```
    /// use ring_queue::Queue;
    ///
    /// let mut queue = Queue::new();
    /// for value in ["a", "a", "b", "c", "c", "c"] {
    ///     queue.insert_tail(value)?;
    /// }
    /// assert!(queue.delete_dup());
    /// assert_eq!(queue.values(), ["b"]);
    /// # Ok::<(), ring_queue::QueueError>(())
    /// ```
    pub fn delete_dup(&mut self) -> bool {
        if self.ring.is_empty() {
            return false;
        }
        self.ring.retain_unique();
        true
    }

    /// Swaps every two adjacent elements.
    pub fn swap(&mut self) {
        self.ring.swap_pairs();
    }

    pub fn reverse(&mut self) {
        self.ring.reverse();
    }

    /// Reverses every group of `k` elements; a trailing shorter group keeps
    /// its order. Nothing happens if `k <= 1`.
    pub fn reverse_k(&mut self, k: isize) {
        if let Ok(k) = usize::try_from(k) {
            self.ring.reverse_groups(k);
        }
    }

    /// Sorts the queue, in descending order if `descend` is set. The sort is
    /// stable.
    pub fn sort(&mut self, descend: bool) {
        if descend {
            self.ring.sort_by(|a, b| b.cmp(a));
        } else {
            self.ring.sort();
        }
    }

    /// Deletes every element that has a strictly smaller element anywhere
    /// after it, and returns the remaining size.
    ///
    /// ```
    /// use ring_queue::Queue;
    ///
    /// let mut queue = Queue::new();
    /// for value in ["5", "1", "6", "2"] {
    ///     queue.insert_tail(value)?;
    /// }
    /// assert_eq!(queue.ascend(), 2);
    /// assert_eq!(queue.values(), ["1", "2"]);
    /// # Ok::<(), ring_queue::QueueError>(())
    /// ```
    pub fn ascend(&mut self) -> usize {
        self.ring.retain_sorted();
        self.size()
    }

    /// Deletes every element that has a strictly greater element anywhere
    /// after it, and returns the remaining size.
    pub fn descend(&mut self) -> usize {
        self.ring.retain_sorted_by(|a, b| b.cmp(a));
        self.size()
    }

    /// Merges `other` into `self`, where both are sorted in the direction
    /// given by `descend`. `other` is left empty.
    pub fn merge(&mut self, other: &mut Queue, descend: bool) {
        if descend {
            self.ring.merge_by(&mut other.ring, |a, b| b.cmp(a));
        } else {
            self.ring.merge(&mut other.ring);
        }
    }

    /// Shuffles the queue with the given random source.
    pub fn shuffle<U: Uniform + ?Sized>(&mut self, rng: &mut U) {
        self.ring.shuffle(rng);
    }

    pub fn front(&self) -> Option<&Element> {
        self.ring.front()
    }

    pub fn back(&self) -> Option<&Element> {
        self.ring.back()
    }

    pub fn iter(&self) -> Iter<'_, Element> {
        self.ring.iter()
    }

    /// Returns the values from head to tail.
    pub fn values(&self) -> Vec<&str> {
        self.ring.iter().map(Element::value).collect()
    }

    /// Provides read-only access to the underlying ring.
    pub fn ring(&self) -> &Ring<Element> {
        &self.ring
    }
}

impl<'a> IntoIterator for &'a Queue {
    type Item = &'a Element;
    type IntoIter = Iter<'a, Element>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::Queue;
    use crate::error::QueueError;
    use proptest::prelude::*;

    fn queue_of(values: &[&str]) -> Queue {
        let mut queue = Queue::new();
        for value in values {
            queue.insert_tail(value).unwrap();
        }
        queue
    }

    #[test]
    fn queue_insert_and_remove() {
        let mut queue = Queue::new();
        assert_eq!(queue.size(), 0);
        assert!(queue.remove_head(None).is_none());
        assert!(queue.remove_tail(None).is_none());

        queue.insert_head("b").unwrap();
        queue.insert_head("a").unwrap();
        queue.insert_tail("c").unwrap();
        assert_eq!(queue.size(), 3);
        assert_eq!(queue.front().map(|e| e.value()), Some("a"));
        assert_eq!(queue.back().map(|e| e.value()), Some("c"));

        let head = queue.remove_head(None).unwrap();
        assert_eq!(head.value(), "a");
        let tail = queue.remove_tail(None).unwrap();
        assert_eq!(tail.into_value(), "c");
        assert_eq!(queue.values(), ["b"]);
        queue.ring().assert_well_formed();
    }

    #[test]
    fn remove_copies_into_buffer() {
        let mut queue = queue_of(&["hello", "hi", "x"]);

        let mut buf = [0xff_u8; 4];
        queue.remove_head(Some(&mut buf));
        assert_eq!(&buf, b"hel\0");

        let mut buf = [0xff_u8; 6];
        queue.remove_head(Some(&mut buf));
        assert_eq!(&buf, b"hi\0\0\0\0");

        let mut buf = [0xff_u8; 0];
        let removed = queue.remove_tail(Some(&mut buf));
        assert_eq!(removed.map(|e| e.into_value()), Some("x".to_owned()));
        assert!(queue.is_empty());
    }

    #[test]
    fn delete_mid_and_dup() {
        let mut queue = queue_of(&["0", "1", "2", "3"]);
        assert!(queue.delete_mid());
        assert_eq!(queue.values(), ["0", "1", "3"]);

        let mut single = queue_of(&["only"]);
        assert!(single.delete_mid());
        assert!(single.is_empty());
        assert!(!single.delete_mid());

        let mut queue = queue_of(&["1", "1", "2", "3", "3", "3"]);
        assert!(queue.delete_dup());
        assert_eq!(queue.values(), ["2"]);
        let mut queue = queue_of(&["1", "1"]);
        assert!(queue.delete_dup());
        assert!(queue.is_empty());
        assert!(!queue.delete_dup());
    }

    #[test]
    fn swap_reverse_and_reverse_k() {
        let mut queue = queue_of(&["a", "b", "c", "d", "e"]);
        queue.swap();
        assert_eq!(queue.values(), ["b", "a", "d", "c", "e"]);
        queue.reverse();
        assert_eq!(queue.values(), ["e", "c", "d", "a", "b"]);
        queue.reverse_k(2);
        assert_eq!(queue.values(), ["c", "e", "a", "d", "b"]);
        queue.reverse_k(-3);
        queue.reverse_k(0);
        queue.reverse_k(1);
        assert_eq!(queue.values(), ["c", "e", "a", "d", "b"]);
        queue.ring().assert_well_formed();
    }

    #[test]
    fn sort_both_directions() {
        let mut queue = queue_of(&["b", "d", "a", "c", "a"]);
        queue.sort(false);
        assert_eq!(queue.values(), ["a", "a", "b", "c", "d"]);
        queue.sort(true);
        assert_eq!(queue.values(), ["d", "c", "b", "a", "a"]);
        queue.sort(true);
        assert_eq!(queue.values(), ["d", "c", "b", "a", "a"]);
    }

    #[test]
    fn ascend_and_descend() {
        let mut queue = queue_of(&["5", "1", "6", "2"]);
        assert_eq!(queue.ascend(), 2);
        assert_eq!(queue.values(), ["1", "2"]);

        let mut queue = queue_of(&["5", "1", "6", "2"]);
        assert_eq!(queue.descend(), 2);
        assert_eq!(queue.values(), ["6", "2"]);

        let mut queue = queue_of(&["5", "2", "4", "7", "1"]);
        assert_eq!(queue.ascend(), 1);
        assert_eq!(queue.values(), ["1"]);

        let mut queue = queue_of(&["5", "2", "4", "7", "1"]);
        assert_eq!(queue.descend(), 2);
        assert_eq!(queue.values(), ["7", "1"]);

        assert_eq!(Queue::new().ascend(), 0);
        assert_eq!(Queue::new().descend(), 0);
    }

    #[test]
    fn merge_both_directions() {
        let mut queue = queue_of(&["1", "3", "5"]);
        let mut other = queue_of(&["2", "4", "6"]);
        queue.merge(&mut other, false);
        assert!(other.is_empty());
        assert_eq!(queue.values(), ["1", "2", "3", "4", "5", "6"]);

        let mut queue = queue_of(&["5", "3", "1"]);
        let mut other = queue_of(&["6", "4", "2"]);
        queue.merge(&mut other, true);
        assert_eq!(queue.values(), ["6", "5", "4", "3", "2", "1"]);
    }

    #[test]
    fn equal_queues_deduplicate_in_sets() {
        use std::collections::HashSet;

        let mut queues = HashSet::new();
        assert!(queues.insert(queue_of(&["a", "b"])));
        assert!(!queues.insert(queue_of(&["a", "b"])));
        assert!(queues.insert(queue_of(&["b", "a"])));
        let mut sorted = queue_of(&["b", "a"]);
        sorted.sort(false);
        assert!(queues.contains(&sorted));
        assert_eq!(queues.len(), 2);
    }

    #[test]
    fn alloc_error_converts() {
        let reserve = Vec::<u8>::new().try_reserve(usize::MAX).unwrap_err();
        let error = QueueError::from(reserve.clone());
        assert_eq!(error, QueueError::Alloc(reserve));
        assert_eq!(error.to_string(), "failed to allocate an element value");
    }

    proptest! {
        #[test]
        fn sort_matches_vec(values in prop::collection::vec("[a-c]{0,2}", 0..32), descend in any::<bool>()) {
            let refs: Vec<&str> = values.iter().map(String::as_str).collect();
            let mut queue = queue_of(&refs);
            queue.sort(descend);
            let mut expected = refs.clone();
            expected.sort();
            if descend {
                expected.reverse();
            }
            prop_assert_eq!(queue.size(), values.len());
            prop_assert_eq!(queue.values(), expected);
        }
    }
}
