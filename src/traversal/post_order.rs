use tracing::trace;

use crate::domain::Tree;
use crate::errors::TreeResult;

/// Left subtree, then right subtree, then node.
///
/// The stack holds the path from the root down to the current position,
/// each frame flagged once its right subtree has been entered. The flag is
/// what decides when a parent is due, so a subtree reachable through both
/// children of the same parent is walked twice.
pub struct PostOrder<T> {
    stack: Vec<(Tree<T>, bool)>,
    current: Tree<T>,
}

impl<T> PostOrder<T> {
    pub fn new(root: &Tree<T>) -> TreeResult<Self> {
        let mut iter = Self::end();
        iter.descend(root.clone())?;
        iter.current = iter.pop();
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

    /// Push the path to the first leaf of `tree`, going left when possible
    /// and right otherwise.
    fn descend(&mut self, mut tree: Tree<T>) -> TreeResult<()> {
        while !tree.is_null() {
            let left = tree.left()?;
            if !left.is_null() {
                self.stack.push((tree, false));
                tree = left;
                continue;
            }
            let right = tree.right()?;
            if !right.is_null() {
                self.stack.push((tree, true));
                tree = right;
                continue;
            }
            self.stack.push((tree, true));
            break;
        }
        Ok(())
    }

    fn pop(&mut self) -> Tree<T> {
        self.stack.pop().map(|(tree, _)| tree).unwrap_or_default()
    }

    pub fn advance(&mut self) -> TreeResult<()> {
        if self.current.is_null() {
            return Ok(());
        }
        let pending_right = match self.stack.last_mut() {
            Some((top, expanded)) if !*expanded => {
                *expanded = true;
                Some(top.right()?)
            }
            _ => None,
        };
        if let Some(right) = pending_right.filter(|right| !right.is_null()) {
            self.descend(right)?;
        }
        self.current = self.pop();
        trace!("post order: depth {}", self.stack.len());
        Ok(())
    }
}

impl<T> Clone for PostOrder<T> {
    fn clone(&self) -> Self {
        Self {
            stack: self.stack.clone(),
            current: self.current.clone(),
        }
    }
}
