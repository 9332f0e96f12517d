use crate::error::QueueError;
use crate::queue::Queue;
use crate::ring::Ring;

/// Identifies a queue inside a [`Chain`]. Ids are never reused by a chain.
pub type QueueId = usize;

/// A queue owned by a [`Chain`], together with its id.
#[derive(Debug)]
pub struct QueueContext {
    id: QueueId,
    queue: Queue,
}

impl QueueContext {
    pub fn id(&self) -> QueueId {
        self.id
    }

    pub fn queue(&self) -> &Queue {
        &self.queue
    }

    pub fn queue_mut(&mut self) -> &mut Queue {
        &mut self.queue
    }

    /// The current size of the queue, counted on demand.
    pub fn size(&self) -> usize {
        self.queue.size()
    }
}

/// A ring of queue contexts, the owner of every queue created through it.
///
/// # Examples
///
/// ```
/// use ring_queue::Chain;
///
/// let mut chain = Chain::new();
/// let (first, second) = (chain.new_queue(), chain.new_queue());
/// chain.get_mut(first).unwrap().insert_tail("b")?;
/// chain.get_mut(second).unwrap().insert_tail("a")?;
///
/// assert_eq!(chain.merge(false)?, 2);
/// assert_eq!(chain.len(), 1);
/// assert_eq!(chain.get(first).unwrap().values(), ["a", "b"]);
/// # Ok::<(), ring_queue::QueueError>(())
/// ```
#[derive(Debug, Default)]
pub struct Chain {
    contexts: Ring<QueueContext>,
    next_id: QueueId,
}

impl Chain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty queue at the back of the chain and returns its id.
    pub fn new_queue(&mut self) -> QueueId {
        let id = self.next_id;
        self.next_id += 1;
        self.contexts.push_back(QueueContext {
            id,
            queue: Queue::new(),
        });
        id
    }

    /// Removes the queue with the given id from the chain and drops it with
    /// all of its elements.
    ///
    /// # Errors
    ///
    /// Returns [`QueueError::NoSuchQueue`] if no queue has this id.
    pub fn free_queue(&mut self, id: QueueId) -> Result<(), QueueError> {
        let mut cursor = self.contexts.cursor_start_mut();
        while let Some(context) = cursor.current() {
            if context.id == id {
                cursor.remove();
                return Ok(());
            }
            cursor.move_next_cyclic();
        }
        Err(QueueError::NoSuchQueue(id))
    }

    pub fn get(&self, id: QueueId) -> Option<&Queue> {
        self.contexts
            .iter()
            .find(|context| context.id == id)
            .map(QueueContext::queue)
    }

    pub fn get_mut(&mut self, id: QueueId) -> Option<&mut Queue> {
        self.contexts
            .iter_mut()
            .find(|context| context.id == id)
            .map(QueueContext::queue_mut)
    }

    /// Returns the number of queues in the chain.
    pub fn len(&self) -> usize {
        self.contexts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contexts.is_empty()
    }

    pub fn contexts(&self) -> &Ring<QueueContext> {
        &self.contexts
    }

    /// Merges every queue into the first one. See [`merge_all`].
    pub fn merge(&mut self, descend: bool) -> Result<usize, QueueError> {
        merge_all(&mut self.contexts, descend)
    }
}

/// Merges the sorted queues of every context into the queue of the first
/// context, and drops the other, now empty, contexts. Returns the size of the
/// merged queue.
///
/// Every queue must be sorted in the direction given by `descend`.
///
/// # Errors
///
/// Returns [`QueueError::EmptyChain`] if `contexts` is empty.
pub fn merge_all(contexts: &mut Ring<QueueContext>, descend: bool) -> Result<usize, QueueError> {
    if contexts.is_empty() {
        return Err(QueueError::EmptyChain);
    }
    let rest = contexts.split_off(1);
    let first = contexts.front_mut().ok_or(QueueError::EmptyChain)?;
    for mut context in rest {
        first.queue.merge(&mut context.queue, descend);
    }
    Ok(first.size())
}

#[cfg(test)]
mod tests {
    use super::{merge_all, Chain};
    use crate::error::QueueError;

    fn chain_of(queues: &[&[&str]]) -> Chain {
        let mut chain = Chain::new();
        for values in queues {
            let id = chain.new_queue();
            let queue = chain.get_mut(id).unwrap();
            for value in *values {
                queue.insert_tail(value).unwrap();
            }
        }
        chain
    }

    #[test]
    fn chain_creates_and_frees_queues() {
        let mut chain = Chain::new();
        assert!(chain.is_empty());
        let ids = [chain.new_queue(), chain.new_queue(), chain.new_queue()];
        assert_eq!(ids, [0, 1, 2]);
        chain.get_mut(1).unwrap().insert_head("x").unwrap();
        assert_eq!(chain.get(1).map(|queue| queue.size()), Some(1));

        assert_eq!(chain.free_queue(1), Ok(()));
        assert_eq!(chain.free_queue(1), Err(QueueError::NoSuchQueue(1)));
        assert!(chain.get(1).is_none());
        assert_eq!(chain.len(), 2);
        assert_eq!(chain.new_queue(), 3);

        let ids: Vec<_> = chain.contexts().iter().map(|context| context.id()).collect();
        assert_eq!(ids, [0, 2, 3]);
        chain.contexts().assert_well_formed();
    }

    #[test]
    fn merge_all_into_first_context() {
        let mut chain = chain_of(&[&["3"], &["1"], &["2"]]);
        assert_eq!(chain.merge(false), Ok(3));
        assert_eq!(chain.len(), 1);
        let first = chain.contexts().front().unwrap();
        assert_eq!(first.id(), 0);
        assert_eq!(first.queue().values(), ["1", "2", "3"]);
    }

    #[test]
    fn merge_all_descending() {
        let mut chain = chain_of(&[&["5", "1"], &[], &["6", "4", "2"], &["3"]]);
        assert_eq!(chain.merge(true), Ok(6));
        assert_eq!(
            chain.get(0).unwrap().values(),
            ["6", "5", "4", "3", "2", "1"]
        );
        assert!(chain.get(2).is_none());
    }

    #[test]
    fn merge_all_edge_cases() {
        let mut chain = Chain::new();
        assert_eq!(chain.merge(false), Err(QueueError::EmptyChain));

        let mut chain = chain_of(&[&["b", "a"]]);
        assert_eq!(merge_all(&mut chain.contexts, false), Ok(2));
        assert_eq!(chain.get(0).unwrap().values(), ["b", "a"]);
    }
}
