use tracing::trace;

use crate::domain::Tree;
use crate::errors::TreeResult;

/// Left subtree, then node, then right subtree.
pub struct InOrder<T> {
    stack: Vec<Tree<T>>,
    current: Tree<T>,
}

impl<T> InOrder<T> {
    pub fn new(root: &Tree<T>) -> TreeResult<Self> {
        let mut iter = Self::end();
        iter.descend_left(root.clone())?;
        iter.current = iter.stack.pop().unwrap_or_default();
        Ok(iter)
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

    /// Push `tree` and its whole left spine.
    fn descend_left(&mut self, mut tree: Tree<T>) -> TreeResult<()> {
        while !tree.is_null() {
            let left = tree.left()?;
            self.stack.push(tree);
            tree = left;
        }
        Ok(())
    }

    pub fn advance(&mut self) -> TreeResult<()> {
        if self.current.is_null() {
            return Ok(());
        }
        let right = self.current.right()?;
        if !right.is_null() {
            self.descend_left(right)?;
        }
        self.current = self.stack.pop().unwrap_or_default();
        trace!("in order: {} pending", self.stack.len());
        Ok(())
    }
}

impl<T> Clone for InOrder<T> {
    fn clone(&self) -> Self {
        Self {
            stack: self.stack.clone(),
            current: self.current.clone(),
        }
    }
}
