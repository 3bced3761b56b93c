//! Shared-ownership handle over the node graph.
//!
//! A `Handle` is either null or one strong reference to a live pointee.
//! Cloning bumps the use-count, dropping releases it; when the last handle
//! goes away the pointee is dropped, which in turn drops the handles it owns
//! (so releasing a root cascades down to every exclusively-owned child).

use std::fmt;
use std::rc::{Rc, Weak};

use crate::errors::{TreeError, TreeResult};

pub struct Handle<N> {
    ptr: Option<Rc<N>>,
}

impl<N> Handle<N> {
    /// The null handle: owns nothing, compares equal only to other null handles.
    pub fn null() -> Self {
        Self { ptr: None }
    }

    /// Take ownership of a freshly built pointee (use-count starts at 1).
    pub fn new(node: N) -> Self {
        Self {
            ptr: Some(Rc::new(node)),
        }
    }

    pub fn is_null(&self) -> bool {
        self.ptr.is_none()
    }

    /// Number of live handles sharing the pointee, 0 for the null handle.
    pub fn use_count(&self) -> usize {
        self.ptr.as_ref().map_or(0, Rc::strong_count)
    }

    /// Dereference; a null handle is a contract violation and reported as such.
    pub fn get(&self) -> TreeResult<&N> {
        self.ptr
            .as_deref()
            .ok_or_else(|| TreeError::NoImplementation("dereference of a null handle".into()))
    }

    pub fn node(&self) -> Option<&N> {
        self.ptr.as_deref()
    }

    /// Identity comparison: same pointee, or both null.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (&self.ptr, &other.ptr) {
            (Some(a), Some(b)) => Rc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }

    /// Take the pointee out when this is its last handle; otherwise hand
    /// the handle back untouched.
    pub fn try_unwrap(self) -> Result<N, Self> {
        match self.ptr {
            Some(rc) => Rc::try_unwrap(rc).map_err(|rc| Self { ptr: Some(rc) }),
            None => Err(Self::null()),
        }
    }

    /// Non-owning observer, used to check when the pointee is released.
    pub fn downgrade(&self) -> Option<Weak<N>> {
        self.ptr.as_ref().map(Rc::downgrade)
    }
}

impl<N> Clone for Handle<N> {
    fn clone(&self) -> Self {
        Self {
            ptr: self.ptr.clone(),
        }
    }

    /// Assignment: release the old pointee, then share the new one.
    /// Assigning a handle to itself leaves the count untouched.
    fn clone_from(&mut self, source: &Self) {
        if !self.ptr_eq(source) {
            self.ptr = source.ptr.clone();
        }
    }
}

impl<N> Default for Handle<N> {
    fn default() -> Self {
        Self::null()
    }
}

impl<N: fmt::Debug> fmt::Debug for Handle<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.ptr {
            Some(node) => f
                .debug_struct("Handle")
                .field("use_count", &Rc::strong_count(node))
                .field("node", node)
                .finish(),
            None => write!(f, "Handle(null)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_new_handle_when_cloned_then_use_count_increments() {
        let first = Handle::new(7);
        assert_eq!(first.use_count(), 1);

        let second = first.clone();
        assert_eq!(first.use_count(), 2);
        assert!(first.ptr_eq(&second));

        drop(second);
        assert_eq!(first.use_count(), 1);
    }

    #[test]
    fn given_last_handle_when_dropped_then_pointee_released() {
        let handle = Handle::new(String::from("node"));
        let watcher = handle.downgrade().unwrap();
        let alias = handle.clone();

        drop(handle);
        assert!(watcher.upgrade().is_some());

        drop(alias);
        assert!(watcher.upgrade().is_none());
    }

    #[test]
    fn given_handle_when_assigned_to_itself_then_count_unchanged() {
        let mut handle = Handle::new(1);
        let same = handle.clone();
        handle.clone_from(&same);
        assert_eq!(handle.use_count(), 2);
    }

    #[test]
    fn given_handle_when_reassigned_then_old_pointee_released() {
        let mut handle = Handle::new(1);
        let watcher = handle.downgrade().unwrap();
        let other = Handle::new(2);

        handle.clone_from(&other);

        assert!(watcher.upgrade().is_none());
        assert_eq!(other.use_count(), 2);
        assert_eq!(*handle.get().unwrap(), 2);
    }

    #[test]
    fn given_null_handle_when_dereferenced_then_errors() {
        let handle: Handle<i32> = Handle::null();
        assert!(handle.is_null());
        assert_eq!(handle.use_count(), 0);
        assert!(matches!(handle.get(), Err(TreeError::NoImplementation(_))));
        assert!(handle.ptr_eq(&Handle::default()));
    }

    #[test]
    fn given_shared_handle_when_try_unwrap_then_handle_returned() {
        let first = Handle::new(5);
        let second = first.clone();

        let back = first.try_unwrap().unwrap_err();
        assert_eq!(back.use_count(), 2);
        drop(second);

        assert_eq!(back.try_unwrap().ok(), Some(5));
        assert!(Handle::<i32>::null().try_unwrap().is_err());
    }
}
