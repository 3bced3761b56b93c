//! Free list of queue nodes.
//!
//! Queue nodes live in a generational arena. Releasing a node does not give
//! its slot back: the slot is parked on the free list and handed out again by
//! the next allocation, from any queue sharing the pool. Fresh slots are only
//! created when nothing is parked. `reserve` pre-fills the list, `drain`
//! returns every parked slot to the arena.

use std::any::{Any, TypeId};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use generational_arena::{Arena, Index};
use tracing::{debug, instrument, trace};

/// One cell of a circular doubly-linked list.
#[derive(Debug)]
pub(crate) struct Slot<T> {
    pub(crate) item: Option<T>,
    pub(crate) next: Index,
    pub(crate) prev: Index,
}

pub(crate) struct Pool<T> {
    pub(crate) arena: Arena<Slot<T>>,
    parked: Vec<Index>,
    limit: Option<usize>,
    fresh: usize,
    reused: usize,
}

impl<T> Pool<T> {
    fn has_room(&self) -> bool {
        self.limit.map_or(true, |limit| self.arena.len() < limit)
    }

    fn insert_parked(&mut self) -> Index {
        let idx = self.arena.insert_with(|idx| Slot {
            item: None,
            next: idx,
            prev: idx,
        });
        self.fresh += 1;
        idx
    }
}

/// Allocation counters, mostly for tests and `-ddd` output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FreeListStats {
    /// Slots created from scratch
    pub fresh: usize,
    /// Allocations served from the free list
    pub reused: usize,
    /// Slots currently parked
    pub parked: usize,
    /// Slots currently linked into some queue
    pub live: usize,
}

/// Shared handle to a node pool. Clones share the same pool.
pub struct FreeList<T> {
    pub(crate) pool: Rc<RefCell<Pool<T>>>,
}

thread_local! {
    static SHARED_POOLS: RefCell<HashMap<TypeId, Box<dyn Any>>> = RefCell::new(HashMap::new());
}

impl<T> FreeList<T> {
    pub fn new() -> Self {
        Self::build(None)
    }

    /// Pool that never owns more than `limit` slots, parked ones included.
    pub fn with_limit(limit: usize) -> Self {
        Self::build(Some(limit))
    }

    fn build(limit: Option<usize>) -> Self {
        Self {
            pool: Rc::new(RefCell::new(Pool {
                arena: Arena::new(),
                parked: Vec::new(),
                limit,
                fresh: 0,
                reused: 0,
            })),
        }
    }

    pub fn set_limit(&self, limit: Option<usize>) {
        self.pool.borrow_mut().limit = limit;
    }

    pub fn limit(&self) -> Option<usize> {
        self.pool.borrow().limit
    }

    /// Hand out a self-linked, empty slot: parked first, fresh otherwise.
    /// `None` when the pool is at its limit.
    pub(crate) fn allocate(&self) -> Option<Index> {
        let mut pool = self.pool.borrow_mut();
        if let Some(idx) = pool.parked.pop() {
            if let Some(slot) = pool.arena.get_mut(idx) {
                slot.next = idx;
                slot.prev = idx;
                pool.reused += 1;
                trace!("free list: reuse {:?}", idx);
                return Some(idx);
            }
        }
        if !pool.has_room() {
            return None;
        }
        let idx = pool.insert_parked();
        trace!("free list: fresh {:?}", idx);
        Some(idx)
    }

    /// Park a slot for reuse, dropping whatever item it still holds.
    pub(crate) fn release(&self, idx: Index) {
        let item = {
            let mut pool = self.pool.borrow_mut();
            let item = match pool.arena.get_mut(idx) {
                Some(slot) => {
                    slot.next = idx;
                    slot.prev = idx;
                    slot.item.take()
                }
                None => return,
            };
            pool.parked.push(idx);
            item
        };
        // dropped outside the borrow: the item may own handles with their own drop glue
        drop(item);
    }

    /// Make sure at least `hint` slots are parked, bounded by the limit.
    #[instrument(level = "debug", skip(self))]
    pub fn reserve(&self, hint: usize) -> usize {
        let mut pool = self.pool.borrow_mut();
        let mut added = 0;
        while pool.parked.len() < hint && pool.has_room() {
            let idx = pool.insert_parked();
            pool.parked.push(idx);
            added += 1;
        }
        debug!("free list: reserved {} slots, {} parked", added, pool.parked.len());
        added
    }

    /// Free every parked slot. Slots linked into live queues are untouched.
    #[instrument(level = "debug", skip(self))]
    pub fn drain(&self) -> usize {
        let mut pool = self.pool.borrow_mut();
        let parked = std::mem::take(&mut pool.parked);
        let count = parked.len();
        for idx in parked {
            pool.arena.remove(idx);
        }
        debug!("free list: drained {} slots", count);
        count
    }

    pub fn parked(&self) -> usize {
        self.pool.borrow().parked.len()
    }

    pub fn live(&self) -> usize {
        let pool = self.pool.borrow();
        pool.arena.len() - pool.parked.len()
    }

    pub fn stats(&self) -> FreeListStats {
        let pool = self.pool.borrow();
        FreeListStats {
            fresh: pool.fresh,
            reused: pool.reused,
            parked: pool.parked.len(),
            live: pool.arena.len() - pool.parked.len(),
        }
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.pool, &other.pool)
    }
}

impl<T: 'static> FreeList<T> {
    /// The per-item-type pool shared by every queue on this thread.
    pub fn shared() -> Self {
        SHARED_POOLS.with(|pools| {
            let mut pools = pools.borrow_mut();
            let entry = pools
                .entry(TypeId::of::<T>())
                .or_insert_with(|| Box::new(FreeList::<T>::new()));
            if let Some(existing) = entry.downcast_ref::<FreeList<T>>() {
                return existing.clone();
            }
            let fresh = FreeList::<T>::new();
            *entry = Box::new(fresh.clone());
            fresh
        })
    }
}

impl<T> Clone for FreeList<T> {
    fn clone(&self) -> Self {
        Self {
            pool: Rc::clone(&self.pool),
        }
    }
}

impl<T> Default for FreeList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for FreeList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FreeList")
            .field("limit", &self.limit())
            .field("stats", &self.stats())
            .finish()
    }
}
