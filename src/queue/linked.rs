//! FIFO queue over a circular doubly-linked list with a dummy node.
//!
//! The sentinel is allocated with the queue and never leaves it; the head of
//! the queue is `sentinel.next`, the tail is `sentinel.prev`, and the queue is
//! empty exactly when the sentinel links to itself. Every node, the sentinel
//! included, comes from (and returns to) a [`FreeList`].

use std::fmt;

use generational_arena::Index;
use thiserror::Error;
use tracing::{instrument, trace};

use crate::queue::free_list::FreeList;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkedQueueError {
    #[error("linked queue is empty")]
    Underflow,
    #[error("linked queue could not allocate a node")]
    Overflow,
}

pub struct LinkedQueue<T> {
    free_list: FreeList<T>,
    sentinel: Index,
    count: usize,
}

impl<T: 'static> LinkedQueue<T> {
    /// Queue backed by the thread-wide pool for `T`, pre-filled with `size_hint` nodes.
    pub fn new(size_hint: usize) -> Result<Self, LinkedQueueError> {
        Self::with_free_list(FreeList::shared(), size_hint)
    }
}

impl<T> LinkedQueue<T> {
    #[instrument(level = "debug", skip(free_list))]
    pub fn with_free_list(free_list: FreeList<T>, size_hint: usize) -> Result<Self, LinkedQueueError> {
        free_list.reserve(size_hint);
        let sentinel = free_list.allocate().ok_or(LinkedQueueError::Overflow)?;
        Ok(Self {
            free_list,
            sentinel,
            count: 0,
        })
    }

    pub fn free_list(&self) -> &FreeList<T> {
        &self.free_list
    }

    /// Append at the tail.
    pub fn enqueue(&mut self, new_item: T) -> Result<(), LinkedQueueError> {
        let tail = {
            let pool = self.free_list.pool.borrow();
            pool.arena.get(self.sentinel).map(|sentinel| sentinel.prev)
        }
        .ok_or(LinkedQueueError::Overflow)?;
        let idx = self.free_list.allocate().ok_or(LinkedQueueError::Overflow)?;
        let mut pool = self.free_list.pool.borrow_mut();
        if let Some(slot) = pool.arena.get_mut(idx) {
            slot.item = Some(new_item);
            slot.prev = tail;
            slot.next = self.sentinel;
        }
        if let Some(prev) = pool.arena.get_mut(tail) {
            prev.next = idx;
        }
        if let Some(sentinel) = pool.arena.get_mut(self.sentinel) {
            sentinel.prev = idx;
        }
        self.count += 1;
        trace!("linked queue: enqueue, len {}", self.count);
        Ok(())
    }

    /// Unlink and return the head.
    pub fn dequeue(&mut self) -> Result<T, LinkedQueueError> {
        if self.is_empty() {
            return Err(LinkedQueueError::Underflow);
        }
        let (head, item) = {
            let mut pool = self.free_list.pool.borrow_mut();
            let head = pool
                .arena
                .get(self.sentinel)
                .map(|sentinel| sentinel.next)
                .ok_or(LinkedQueueError::Underflow)?;
            let (next, item) = match pool.arena.get_mut(head) {
                Some(slot) => (slot.next, slot.item.take()),
                None => return Err(LinkedQueueError::Underflow),
            };
            if let Some(sentinel) = pool.arena.get_mut(self.sentinel) {
                sentinel.next = next;
            }
            if let Some(after) = pool.arena.get_mut(next) {
                after.prev = self.sentinel;
            }
            (head, item)
        };
        self.count -= 1;
        self.free_list.release(head);
        trace!("linked queue: dequeue, len {}", self.count);
        item.ok_or(LinkedQueueError::Underflow)
    }

    /// Copy of the head item.
    pub fn front(&self) -> Result<T, LinkedQueueError>
    where
        T: Clone,
    {
        if self.is_empty() {
            return Err(LinkedQueueError::Underflow);
        }
        let pool = self.free_list.pool.borrow();
        pool.arena
            .get(self.sentinel)
            .and_then(|sentinel| pool.arena.get(sentinel.next))
            .and_then(|head| head.item.clone())
            .ok_or(LinkedQueueError::Underflow)
    }

    pub fn is_empty(&self) -> bool {
        let pool = self.free_list.pool.borrow();
        pool.arena
            .get(self.sentinel)
            .map_or(true, |sentinel| sentinel.next == self.sentinel)
    }

    /// Never full: growth is bounded only by the free list.
    pub fn is_full(&self) -> bool {
        false
    }

    pub fn len(&self) -> usize {
        self.count
    }

    /// Items front to back.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        let pool = self.free_list.pool.borrow();
        let mut items = Vec::with_capacity(self.count);
        let mut cursor = pool.arena.get(self.sentinel).map(|s| s.next);
        while let Some(idx) = cursor {
            if idx == self.sentinel {
                break;
            }
            match pool.arena.get(idx) {
                Some(slot) => {
                    if let Some(item) = &slot.item {
                        items.push(item.clone());
                    }
                    cursor = Some(slot.next);
                }
                None => break,
            }
        }
        items
    }

    /// Deep copy onto the same free list.
    pub fn try_clone(&self) -> Result<Self, LinkedQueueError>
    where
        T: Clone,
    {
        let mut copy = Self::with_free_list(self.free_list.clone(), 0)?;
        for item in self.to_vec() {
            copy.enqueue(item)?;
        }
        Ok(copy)
    }

    /// Exchange contents with `other`. Only pointers move; cannot fail.
    pub fn swap(&mut self, other: &mut Self) {
        std::mem::swap(self, other);
    }
}

impl<T> Drop for LinkedQueue<T> {
    fn drop(&mut self) {
        while self.dequeue().is_ok() {}
        self.free_list.release(self.sentinel);
    }
}

impl<T: Clone + PartialEq> PartialEq for LinkedQueue<T> {
    fn eq(&self, other: &Self) -> bool {
        self.count == other.count && self.to_vec() == other.to_vec()
    }
}

impl<T> fmt::Debug for LinkedQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinkedQueue")
            .field("len", &self.count)
            .field("sentinel", &self.sentinel)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn queue(free_list: &FreeList<u32>) -> LinkedQueue<u32> {
        LinkedQueue::with_free_list(free_list.clone(), 0).unwrap()
    }

    #[test]
    fn given_items_when_dequeued_then_fifo_order() {
        let free_list = FreeList::new();
        let mut q = queue(&free_list);
        for i in 1..=3 {
            q.enqueue(i).unwrap();
        }

        assert_eq!(q.front(), Ok(1));
        assert_eq!(q.dequeue(), Ok(1));
        assert_eq!(q.dequeue(), Ok(2));
        assert_eq!(q.dequeue(), Ok(3));
        assert!(q.is_empty());
    }

    #[test]
    fn given_empty_queue_when_dequeue_or_front_then_underflow() {
        let free_list = FreeList::new();
        let mut q = queue(&free_list);
        assert_eq!(q.dequeue(), Err(LinkedQueueError::Underflow));
        assert_eq!(q.front(), Err(LinkedQueueError::Underflow));
    }

    #[test]
    fn given_dequeued_nodes_when_enqueuing_again_then_nodes_recycled() {
        let free_list = FreeList::new();
        let mut q = queue(&free_list);
        q.enqueue(1).unwrap();
        q.enqueue(2).unwrap();
        q.dequeue().unwrap();
        q.dequeue().unwrap();
        let fresh_before = free_list.stats().fresh;

        q.enqueue(3).unwrap();
        q.enqueue(4).unwrap();

        assert_eq!(free_list.stats().fresh, fresh_before);
        assert_eq!(q.to_vec(), vec![3, 4]);
    }

    #[test]
    fn given_node_limit_when_enqueue_exceeds_then_overflow() {
        // sentinel + two items
        let free_list = FreeList::with_limit(3);
        let mut q = queue(&free_list);
        q.enqueue(1).unwrap();
        q.enqueue(2).unwrap();
        assert_eq!(q.enqueue(3), Err(LinkedQueueError::Overflow));
        assert_eq!(q.len(), 2);
    }

    #[test]
    fn given_queue_when_cloned_then_copies_are_independent() {
        let free_list = FreeList::new();
        let mut original = queue(&free_list);
        original.enqueue(1).unwrap();
        original.enqueue(2).unwrap();

        let mut copy = original.try_clone().unwrap();
        copy.dequeue().unwrap();
        copy.enqueue(9).unwrap();

        assert_eq!(original.to_vec(), vec![1, 2]);
        assert_eq!(copy.to_vec(), vec![2, 9]);
        assert_ne!(original, copy);
    }

    #[test]
    fn given_two_queues_when_swapped_then_contents_exchanged() {
        let free_list = FreeList::new();
        let mut a = queue(&free_list);
        let mut b = queue(&free_list);
        a.enqueue(1).unwrap();
        b.enqueue(2).unwrap();
        b.enqueue(3).unwrap();

        a.swap(&mut b);

        assert_eq!(a.to_vec(), vec![2, 3]);
        assert_eq!(b.to_vec(), vec![1]);
    }

    #[test]
    fn given_queue_when_dropped_then_all_nodes_parked() {
        let free_list = FreeList::new();
        {
            let mut q = queue(&free_list);
            q.enqueue(1).unwrap();
            q.enqueue(2).unwrap();
        }
        assert_eq!(free_list.live(), 0);
        assert_eq!(free_list.parked(), 3);
        assert_eq!(free_list.drain(), 3);
    }
}
