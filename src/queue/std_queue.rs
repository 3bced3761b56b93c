//! FIFO queue over the standard `VecDeque`.

use std::collections::VecDeque;

use thiserror::Error;
use tracing::trace;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StdQueueError {
    #[error("queue is empty")]
    Underflow,
    #[error("queue could not grow")]
    Overflow,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StdQueue<T> {
    items: VecDeque<T>,
}

impl<T> StdQueue<T> {
    pub fn new(size_hint: usize) -> Self {
        Self {
            items: VecDeque::with_capacity(size_hint),
        }
    }

    pub fn enqueue(&mut self, new_item: T) -> Result<(), StdQueueError> {
        self.items
            .try_reserve(1)
            .map_err(|_| StdQueueError::Overflow)?;
        self.items.push_back(new_item);
        trace!("std queue: enqueue, len {}", self.items.len());
        Ok(())
    }

    pub fn dequeue(&mut self) -> Result<T, StdQueueError> {
        self.items.pop_front().ok_or(StdQueueError::Underflow)
    }

    pub fn front(&self) -> Result<T, StdQueueError>
    where
        T: Clone,
    {
        self.items.front().cloned().ok_or(StdQueueError::Underflow)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        false
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn swap(&mut self, other: &mut Self) {
        std::mem::swap(&mut self.items, &mut other.items);
    }
}

impl<T> Default for StdQueue<T> {
    fn default() -> Self {
        Self::new(0)
    }
}
