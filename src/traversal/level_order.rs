use tracing::trace;

use crate::domain::Tree;
use crate::errors::TreeResult;
use crate::queue::{make_queue, QueueStrategy, WorkQueue};

/// Initial free-list reservation for a level-order queue.
pub const QUEUE_SIZE_HINT: usize = 50;

/// Breadth-first, left before right within a level.
///
/// The queue holds the frontier; `front` mirrors the head of the queue and
/// is the iterator's current position.
pub struct LevelOrder<T> {
    queue: Box<dyn WorkQueue<Tree<T>>>,
    front: Tree<T>,
}

impl<T: 'static> LevelOrder<T> {
    pub fn new(root: &Tree<T>, strategy: QueueStrategy) -> TreeResult<Self> {
        let mut queue = make_queue(strategy, QUEUE_SIZE_HINT)?;
        if root.is_null() {
            return Ok(Self {
                queue,
                front: Tree::null(),
            });
        }
        queue.enqueue(root.clone())?;
        let front = queue.front()?;
        Ok(Self { queue, front })
    }

    pub fn end(strategy: QueueStrategy) -> TreeResult<Self> {
        Ok(Self {
            queue: make_queue(strategy, 0)?,
            front: Tree::null(),
        })
    }
}

impl<T> LevelOrder<T> {
    pub fn current(&self) -> &Tree<T> {
        &self.front
    }

    pub fn strategy(&self) -> QueueStrategy {
        self.queue.strategy()
    }

    pub fn advance(&mut self) -> TreeResult<()> {
        if self.queue.is_empty() {
            return Ok(());
        }
        self.queue.dequeue()?;

        let left = self.front.left()?;
        if !left.is_null() {
            self.queue.enqueue(left)?;
        }
        let right = self.front.right()?;
        if !right.is_null() {
            self.queue.enqueue(right)?;
        }

        self.front = if self.queue.is_empty() {
            Tree::null()
        } else {
            self.queue.front()?
        };
        trace!("level order: {} pending", self.queue.len());
        Ok(())
    }

    pub fn try_clone(&self) -> TreeResult<Self> {
        Ok(Self {
            queue: self.queue.try_clone()?,
            front: self.front.clone(),
        })
    }
}
