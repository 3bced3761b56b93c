//! Adapter from concrete queue implementations to the [`WorkQueue`] contract.
//!
//! Each backend reports its own underflow/overflow type; the adapter maps
//! them onto [`QueueError`] so callers see one error identity no matter
//! which backend is plugged in.

use crate::queue::linked::{LinkedQueue, LinkedQueueError};
use crate::queue::std_queue::{StdQueue, StdQueueError};
use crate::queue::{QueueError, QueueResult, QueueStrategy, WorkQueue};

/// What a queue implementation must offer to sit behind a [`QueueAdapter`].
pub trait FifoBackend<T>: Sized {
    type Error: Into<QueueError>;

    const STRATEGY: QueueStrategy;

    fn push(&mut self, item: T) -> Result<(), Self::Error>;
    fn pop(&mut self) -> Result<T, Self::Error>;
    fn peek(&self) -> Result<T, Self::Error>;
    fn is_empty(&self) -> bool;
    fn is_full(&self) -> bool;
    fn len(&self) -> usize;
    fn duplicate(&self) -> Result<Self, Self::Error>;
}

impl From<LinkedQueueError> for QueueError {
    fn from(e: LinkedQueueError) -> Self {
        match e {
            LinkedQueueError::Underflow => QueueError::Underflow,
            LinkedQueueError::Overflow => QueueError::Overflow,
        }
    }
}

impl From<StdQueueError> for QueueError {
    fn from(e: StdQueueError) -> Self {
        match e {
            StdQueueError::Underflow => QueueError::Underflow,
            StdQueueError::Overflow => QueueError::Overflow,
        }
    }
}

impl<T: Clone> FifoBackend<T> for LinkedQueue<T> {
    type Error = LinkedQueueError;

    const STRATEGY: QueueStrategy = QueueStrategy::Linked;

    fn push(&mut self, item: T) -> Result<(), Self::Error> {
        self.enqueue(item)
    }

    fn pop(&mut self) -> Result<T, Self::Error> {
        self.dequeue()
    }

    fn peek(&self) -> Result<T, Self::Error> {
        self.front()
    }

    fn is_empty(&self) -> bool {
        LinkedQueue::is_empty(self)
    }

    fn is_full(&self) -> bool {
        LinkedQueue::is_full(self)
    }

    fn len(&self) -> usize {
        LinkedQueue::len(self)
    }

    fn duplicate(&self) -> Result<Self, Self::Error> {
        self.try_clone()
    }
}

impl<T: Clone> FifoBackend<T> for StdQueue<T> {
    type Error = StdQueueError;

    const STRATEGY: QueueStrategy = QueueStrategy::Std;

    fn push(&mut self, item: T) -> Result<(), Self::Error> {
        self.enqueue(item)
    }

    fn pop(&mut self) -> Result<T, Self::Error> {
        self.dequeue()
    }

    fn peek(&self) -> Result<T, Self::Error> {
        self.front()
    }

    fn is_empty(&self) -> bool {
        StdQueue::is_empty(self)
    }

    fn is_full(&self) -> bool {
        StdQueue::is_full(self)
    }

    fn len(&self) -> usize {
        StdQueue::len(self)
    }

    fn duplicate(&self) -> Result<Self, Self::Error> {
        Ok(self.clone())
    }
}

#[derive(Debug)]
pub struct QueueAdapter<Q> {
    queue: Q,
}

impl<Q> QueueAdapter<Q> {
    pub fn new(queue: Q) -> Self {
        Self { queue }
    }

    pub fn inner(&self) -> &Q {
        &self.queue
    }

    pub fn swap(&mut self, other: &mut Self) {
        std::mem::swap(&mut self.queue, &mut other.queue);
    }
}

impl<T, Q> WorkQueue<T> for QueueAdapter<Q>
where
    T: Clone + 'static,
    Q: FifoBackend<T> + 'static,
{
    fn enqueue(&mut self, item: T) -> QueueResult<()> {
        self.queue.push(item).map_err(Into::into)
    }

    fn dequeue(&mut self) -> QueueResult<T> {
        self.queue.pop().map_err(Into::into)
    }

    fn front(&self) -> QueueResult<T> {
        self.queue.peek().map_err(Into::into)
    }

    fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    fn is_full(&self) -> bool {
        self.queue.is_full()
    }

    fn len(&self) -> usize {
        self.queue.len()
    }

    fn strategy(&self) -> QueueStrategy {
        Q::STRATEGY
    }

    fn try_clone(&self) -> QueueResult<Box<dyn WorkQueue<T>>> {
        let copy = self.queue.duplicate().map_err(Into::into)?;
        Ok(Box::new(QueueAdapter::new(copy)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queue::free_list::FreeList;
    use rstest::rstest;

    fn linked(limit: usize) -> Box<dyn WorkQueue<u8>> {
        let free_list = FreeList::with_limit(limit);
        Box::new(QueueAdapter::new(
            LinkedQueue::with_free_list(free_list, 0).unwrap(),
        ))
    }

    fn std_queue() -> Box<dyn WorkQueue<u8>> {
        Box::new(QueueAdapter::new(StdQueue::new(0)))
    }

    #[rstest]
    #[case::linked(linked(8))]
    #[case::std(std_queue())]
    fn given_any_backend_when_empty_then_same_underflow(#[case] mut queue: Box<dyn WorkQueue<u8>>) {
        assert_eq!(queue.dequeue(), Err(QueueError::Underflow));
        assert_eq!(queue.front(), Err(QueueError::Underflow));
        assert!(!queue.is_full());
    }

    #[rstest]
    #[case::linked(linked(8))]
    #[case::std(std_queue())]
    fn given_any_backend_when_cloned_then_independent(#[case] mut queue: Box<dyn WorkQueue<u8>>) {
        queue.enqueue(1).unwrap();
        queue.enqueue(2).unwrap();

        let mut copy = queue.try_clone().unwrap();
        copy.dequeue().unwrap();

        assert_eq!(queue.len(), 2);
        assert_eq!(queue.front(), Ok(1));
        assert_eq!(copy.front(), Ok(2));
        assert_eq!(copy.strategy(), queue.strategy());
    }

    #[test]
    fn given_linked_backend_when_pool_exhausted_then_normalized_overflow() {
        let mut queue = linked(2);
        queue.enqueue(1).unwrap();
        assert_eq!(queue.enqueue(2), Err(QueueError::Overflow));
    }

    #[test]
    fn given_adapters_when_swapped_then_contents_exchanged() {
        let mut a = QueueAdapter::new(StdQueue::new(0));
        let mut b = QueueAdapter::new(StdQueue::new(0));
        WorkQueue::<u8>::enqueue(&mut a, 1).unwrap();

        a.swap(&mut b);

        assert!(WorkQueue::<u8>::is_empty(&a));
        assert_eq!(WorkQueue::<u8>::front(&b), Ok(1));
    }
}
