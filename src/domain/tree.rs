//! Tree handles: cheap, copyable views onto a shared node graph.

use std::fmt;

use tracing::instrument;

use crate::domain::handle::Handle;
use crate::domain::node::{Node, NodeRef};
use crate::errors::{TreeError, TreeResult};
use crate::queue::QueueStrategy;
use crate::traversal::{TraversalOrder, TreeIterator};
use crate::visitor::Visitor;

/// A handle onto a (sub)tree.
///
/// Equality is identity: two trees are equal when they wrap the very same
/// node, or are both null. The null tree doubles as the end marker of every
/// traversal.
pub struct Tree<T> {
    root: NodeRef<T>,
}

impl<T> Tree<T> {
    pub fn null() -> Self {
        Self {
            root: Handle::null(),
        }
    }

    pub fn new(node: Node<T>) -> Self {
        Self {
            root: Handle::new(node),
        }
    }

    /// Alias an existing node; bumps its use-count.
    pub fn from_handle(root: &NodeRef<T>) -> Self {
        Self { root: root.clone() }
    }

    pub fn is_null(&self) -> bool {
        self.root.is_null()
    }

    pub fn handle(&self) -> &NodeRef<T> {
        &self.root
    }

    pub fn into_handle(self) -> NodeRef<T> {
        self.root
    }

    pub fn node(&self) -> TreeResult<&Node<T>> {
        self.root.node().ok_or_else(|| TreeError::null_tree("node"))
    }

    pub fn use_count(&self) -> usize {
        self.root.use_count()
    }

    /// Value stored at the root; fails on operators and on the null tree.
    pub fn item(&self) -> TreeResult<&T> {
        self.node()
            .map_err(|_| TreeError::null_tree("item"))?
            .value()
    }

    /// Left subtree, the null tree when there is none.
    pub fn left(&self) -> TreeResult<Tree<T>> {
        let node = self.root.node().ok_or_else(|| TreeError::null_tree("left"))?;
        Ok(node.left().map(Tree::from_handle).unwrap_or_default())
    }

    /// Right subtree, the null tree when there is none.
    pub fn right(&self) -> TreeResult<Tree<T>> {
        let node = self
            .root
            .node()
            .ok_or_else(|| TreeError::null_tree("right"))?;
        Ok(node.right().map(Tree::from_handle).unwrap_or_default())
    }

    /// Dispatch `visitor` on the root node only.
    pub fn accept(&self, visitor: &mut dyn Visitor<T>) -> TreeResult<()> {
        self.root
            .node()
            .ok_or_else(|| TreeError::null_tree("accept"))?
            .accept(visitor)
    }

    /// Longest root-to-leaf path, counted in nodes.
    pub fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack: Vec<(&NodeRef<T>, usize)> = vec![(&self.root, 1)];
        while let Some((handle, depth)) = stack.pop() {
            let Some(node) = handle.node() else { continue };
            max_depth = max_depth.max(depth);
            stack.extend(node.left().into_iter().map(|l| (l, depth + 1)));
            stack.extend(node.right().into_iter().map(|r| (r, depth + 1)));
        }
        max_depth
    }

    /// Number of nodes reachable from the root, shared nodes counted once
    /// per path that reaches them.
    pub fn size(&self) -> usize {
        let mut count = 0;
        let mut stack: Vec<&NodeRef<T>> = vec![&self.root];
        while let Some(handle) = stack.pop() {
            let Some(node) = handle.node() else { continue };
            count += 1;
            stack.extend(node.left());
            stack.extend(node.right());
        }
        count
    }
}

impl<T: 'static> Tree<T> {
    /// Begin-iterator for the traversal order named `order`.
    ///
    /// Level-order uses the default queue strategy; see [`Tree::begin_with`].
    #[instrument(level = "debug", skip(self))]
    pub fn begin(&self, order: &str) -> TreeResult<TreeIterator<T>> {
        self.iter(order.parse()?)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn begin_with(&self, order: &str, queue: &str) -> TreeResult<TreeIterator<T>> {
        self.iter_with(order.parse()?, queue.parse()?)
    }

    /// End-iterator for the traversal order named `order`.
    #[instrument(level = "debug", skip(self))]
    pub fn end(&self, order: &str) -> TreeResult<TreeIterator<T>> {
        self.end_of(order.parse()?)
    }

    pub fn end_of(&self, order: TraversalOrder) -> TreeResult<TreeIterator<T>> {
        TreeIterator::end(order, QueueStrategy::default())
    }

    pub fn iter(&self, order: TraversalOrder) -> TreeResult<TreeIterator<T>> {
        self.iter_with(order, QueueStrategy::default())
    }

    pub fn iter_with(
        &self,
        order: TraversalOrder,
        queue: QueueStrategy,
    ) -> TreeResult<TreeIterator<T>> {
        TreeIterator::begin(self, order, queue)
    }
}

impl<T> Clone for Tree<T> {
    fn clone(&self) -> Self {
        Self {
            root: self.root.clone(),
        }
    }

    fn clone_from(&mut self, source: &Self) {
        self.root.clone_from(&source.root);
    }
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Self::null()
    }
}

impl<T> PartialEq for Tree<T> {
    fn eq(&self, other: &Self) -> bool {
        self.root.ptr_eq(&other.root)
    }
}

impl<T> Eq for Tree<T> {}

impl<T> From<Node<T>> for Tree<T> {
    fn from(node: Node<T>) -> Self {
        Tree::new(node)
    }
}

impl<T: fmt::Debug> fmt::Debug for Tree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.root.node() {
            Some(node) => f.debug_tuple("Tree").field(node).finish(),
            None => write!(f, "Tree(null)"),
        }
    }
}

impl<T: fmt::Display> fmt::Display for Tree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.root.node() {
            Some(node) => write!(f, "{}", node),
            None => write!(f, "<null>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::builder::{add, leaf, mul, neg};

    #[test]
    fn given_tree_when_left_and_right_then_alias_children() {
        let tree = add(leaf(1), leaf(2));

        let left = tree.left().unwrap();
        let again = tree.left().unwrap();

        assert_eq!(left, again);
        assert_eq!(left.item(), Ok(&1));
        assert_eq!(left.use_count(), 3);
        assert_ne!(left, tree.right().unwrap());
    }

    #[test]
    fn given_leaf_when_children_requested_then_null_trees() {
        let tree = leaf(9);
        assert!(tree.left().unwrap().is_null());
        assert!(tree.right().unwrap().is_null());
    }

    #[test]
    fn given_null_tree_when_queried_then_errors() {
        let tree: Tree<i64> = Tree::null();
        assert!(matches!(tree.item(), Err(TreeError::NoImplementation(_))));
        assert!(matches!(tree.left(), Err(TreeError::NoImplementation(_))));
        assert!(matches!(tree.right(), Err(TreeError::NoImplementation(_))));
        assert_eq!(tree, Tree::default());
    }

    #[test]
    fn given_structurally_equal_trees_when_compared_then_not_equal() {
        assert_ne!(leaf(1), leaf(1));
    }

    #[test]
    fn given_expression_when_measured_then_depth_and_size() {
        let tree = mul(add(leaf(1), leaf(2)), neg(leaf(3)));
        assert_eq!(tree.depth(), 3);
        assert_eq!(tree.size(), 6);
        assert_eq!(Tree::<i64>::null().size(), 0);
    }

    #[test]
    fn given_very_deep_chain_when_measured_and_dropped_then_no_stack_overflow() {
        // Arrange
        let mut tree = leaf(1i64);
        let watcher = tree.handle().downgrade().unwrap();
        for _ in 0..100_000 {
            tree = neg(tree);
        }

        // Act
        let depth = tree.depth();
        let size = tree.size();
        drop(tree);

        // Assert
        assert_eq!(depth, 100_001);
        assert_eq!(size, 100_001);
        assert!(watcher.upgrade().is_none());
    }

    #[test]
    fn given_shared_subtree_when_measured_then_counted_per_path() {
        let shared = add(leaf(1), leaf(2));
        let tree = mul(shared.clone(), shared);
        assert_eq!(tree.size(), 7);
        assert_eq!(tree.depth(), 3);
    }
}
