//! Visitors over expression nodes
//!
//! A node's `accept` picks the visitor method matching its kind; the
//! visitor decides what that kind means. Walking a whole tree is the job
//! of a [`TreeIterator`], see [`drive`].

pub mod eval;

use tracing::instrument;

use crate::domain::Node;
use crate::errors::TreeResult;
use crate::traversal::TreeIterator;

pub use eval::{
    evaluate, evaluate_in, evaluate_reversed, Operand, PostOrderEvaluator, ReversedEvaluator,
};

/// One method per node kind.
///
/// Leaves hand over their value directly; operators hand over the node so
/// a visitor that cares can reach the children.
pub trait Visitor<T> {
    fn visit_leaf(&mut self, item: &T) -> TreeResult<()>;
    fn visit_negate(&mut self, node: &Node<T>) -> TreeResult<()>;
    fn visit_add(&mut self, node: &Node<T>) -> TreeResult<()>;
    fn visit_subtract(&mut self, node: &Node<T>) -> TreeResult<()>;
    fn visit_multiply(&mut self, node: &Node<T>) -> TreeResult<()>;
    fn visit_divide(&mut self, node: &Node<T>) -> TreeResult<()>;
}

/// Apply `visitor` to every node `iter` yields, stopping at the first error.
#[instrument(level = "debug", skip_all, fields(order = %iter.order()))]
pub fn drive<T>(visitor: &mut dyn Visitor<T>, iter: TreeIterator<T>) -> TreeResult<()> {
    for tree in iter {
        tree?.accept(visitor)?;
    }
    Ok(())
}
