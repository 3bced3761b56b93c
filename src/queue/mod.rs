//! Work queues for breadth-first traversal
//!
//! `WorkQueue` is the FIFO contract the level-order iterator programs
//! against. Two implementations sit behind it, picked by [`QueueStrategy`]:
//! a linked queue recycling its nodes through a [`FreeList`], and a plain
//! `VecDeque`.

pub mod adapter;
pub mod free_list;
pub mod linked;
pub mod std_queue;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;
use tracing::instrument;

use crate::errors::TreeError;

pub use adapter::{FifoBackend, QueueAdapter};
pub use free_list::{FreeList, FreeListStats};
pub use linked::{LinkedQueue, LinkedQueueError};
pub use std_queue::{StdQueue, StdQueueError};

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueError {
    #[error("dequeue or front on an empty queue")]
    Underflow,
    #[error("enqueue failed: no room for another node")]
    Overflow,
}

impl From<QueueError> for TreeError {
    fn from(e: QueueError) -> Self {
        match e {
            QueueError::Underflow => TreeError::Underflow(e.to_string()),
            QueueError::Overflow => TreeError::Overflow(e.to_string()),
        }
    }
}

pub type QueueResult<T> = Result<T, QueueError>;

/// FIFO contract shared by all queue implementations.
pub trait WorkQueue<T> {
    /// Place `item` at the tail. `Overflow` when no node can be obtained.
    fn enqueue(&mut self, item: T) -> QueueResult<()>;

    /// Remove and return the head. `Underflow` when empty.
    fn dequeue(&mut self) -> QueueResult<T>;

    /// Copy of the head without removing it. `Underflow` when empty.
    fn front(&self) -> QueueResult<T>;

    fn is_empty(&self) -> bool;

    fn is_full(&self) -> bool;

    fn len(&self) -> usize;

    fn strategy(&self) -> QueueStrategy;

    /// Independent deep copy; the clone shares no pending work with `self`.
    fn try_clone(&self) -> QueueResult<Box<dyn WorkQueue<T>>>;
}

/// Which queue backs a level-order walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum QueueStrategy {
    /// `LQueue`: linked list with a free list of nodes
    #[default]
    Linked,
    /// `STLQueue`: standard double-ended queue
    Std,
}

impl QueueStrategy {
    pub const ALL: [QueueStrategy; 2] = [QueueStrategy::Linked, QueueStrategy::Std];

    pub fn as_str(&self) -> &'static str {
        match self {
            QueueStrategy::Linked => "LQueue",
            QueueStrategy::Std => "STLQueue",
        }
    }
}

impl FromStr for QueueStrategy {
    type Err = TreeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LQueue" => Ok(QueueStrategy::Linked),
            "STLQueue" => Ok(QueueStrategy::Std),
            other => Err(TreeError::unknown_queue(other)),
        }
    }
}

impl fmt::Display for QueueStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for QueueStrategy {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for QueueStrategy {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}

/// Build an empty queue for `strategy`, sized with `size_hint`.
#[instrument(level = "debug")]
pub fn make_queue<T: Clone + 'static>(
    strategy: QueueStrategy,
    size_hint: usize,
) -> QueueResult<Box<dyn WorkQueue<T>>> {
    match strategy {
        QueueStrategy::Linked => {
            let queue = LinkedQueue::new(size_hint)?;
            Ok(Box::new(QueueAdapter::new(queue)))
        }
        QueueStrategy::Std => Ok(Box::new(QueueAdapter::new(StdQueue::new(size_hint)))),
    }
}
