use tracing::trace;

use crate::domain::Tree;
use crate::errors::TreeResult;

/// Node, then left subtree, then right subtree.
///
/// The top of the stack is always the current node.
pub struct PreOrder<T> {
    stack: Vec<Tree<T>>,
    current: Tree<T>,
}

impl<T> PreOrder<T> {
    pub fn new(root: &Tree<T>) -> Self {
        if root.is_null() {
            return Self::end();
        }
        Self {
            stack: vec![root.clone()],
            current: root.clone(),
        }
    }

    pub fn end() -> Self {
        Self {
            stack: Vec::new(),
            current: Tree::null(),
        }
    }

    pub fn current(&self) -> &Tree<T> {
        &self.current
    }

    pub fn advance(&mut self) -> TreeResult<()> {
        if self.stack.pop().is_none() {
            return Ok(());
        }

        // right goes in first so the left subtree is walked first
        let right = self.current.right()?;
        if !right.is_null() {
            self.stack.push(right);
        }
        let left = self.current.left()?;
        if !left.is_null() {
            self.stack.push(left);
        }

        self.current = self.stack.last().cloned().unwrap_or_default();
        trace!("pre order: {} pending", self.stack.len());
        Ok(())
    }
}

impl<T> Clone for PreOrder<T> {
    fn clone(&self) -> Self {
        Self {
            stack: self.stack.clone(),
            current: self.current.clone(),
        }
    }
}
