/*
termtree rendering of expression trees.

Defined as a trait so the same call works on a Tree handle and on a bare NodeRef.
 */
use std::fmt::Display;

use termtree::Tree as TermTree;
use tracing::instrument;

use crate::domain::node::NodeRef;
use crate::domain::tree::Tree;

pub trait TreeConvert {
    fn to_tree_string(&self) -> TermTree<String>;
}

impl<T: Display> TreeConvert for NodeRef<T> {
    fn to_tree_string(&self) -> TermTree<String> {
        match self.node() {
            Some(node) => {
                // Negate keeps its operand on the right; both sides render in order
                let leaves: Vec<_> = node
                    .left()
                    .into_iter()
                    .chain(node.right())
                    .map(|child| child.to_tree_string())
                    .collect();
                TermTree::new(node.to_string()).with_leaves(leaves)
            }
            None => TermTree::new("<null>".to_string()),
        }
    }
}

impl<T: Display> TreeConvert for Tree<T> {
    #[instrument(level = "debug", skip(self))]
    fn to_tree_string(&self) -> TermTree<String> {
        self.handle().to_tree_string()
    }
}
