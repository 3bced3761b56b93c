//! Tree traversals
//!
//! A [`TreeIterator`] walks a [`Tree`] in one of four orders. Each order is
//! a small state machine over a stack or queue of tree handles; the
//! iterator wraps whichever one was picked at construction time.
//!
//! Walking stops at the end-state: the current position is the null tree
//! and advancing further is a no-op.

pub mod in_order;
pub mod level_order;
pub mod post_order;
pub mod pre_order;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::{debug, instrument};

use crate::domain::Tree;
use crate::errors::{TreeError, TreeResult};
use crate::queue::QueueStrategy;

pub use in_order::InOrder;
pub use level_order::LevelOrder;
pub use post_order::PostOrder;
pub use pre_order::PreOrder;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TraversalOrder {
    #[default]
    LevelOrder,
    PreOrder,
    PostOrder,
    InOrder,
}

impl TraversalOrder {
    pub const ALL: [TraversalOrder; 4] = [
        TraversalOrder::LevelOrder,
        TraversalOrder::PreOrder,
        TraversalOrder::PostOrder,
        TraversalOrder::InOrder,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TraversalOrder::LevelOrder => "Levelorder",
            TraversalOrder::PreOrder => "Preorder",
            TraversalOrder::PostOrder => "Postorder",
            TraversalOrder::InOrder => "Inorder",
        }
    }
}

/// Names are matched exactly; `levelorder` is not `Levelorder`.
impl FromStr for TraversalOrder {
    type Err = TreeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Levelorder" => Ok(TraversalOrder::LevelOrder),
            "Preorder" => Ok(TraversalOrder::PreOrder),
            "Postorder" => Ok(TraversalOrder::PostOrder),
            "Inorder" => Ok(TraversalOrder::InOrder),
            other => Err(TreeError::unknown_traversal(other)),
        }
    }
}

impl fmt::Display for TraversalOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for TraversalOrder {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for TraversalOrder {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}

enum Strategy<T> {
    LevelOrder(LevelOrder<T>),
    PreOrder(PreOrder<T>),
    PostOrder(PostOrder<T>),
    InOrder(InOrder<T>),
}

/// Position within a traversal of a tree.
///
/// Two iterators are equal when they point at the same node, so every
/// exhausted iterator equals the end-iterator of any order. Besides the
/// cursor API (`current`/`advance`/`is_end`) it implements [`Iterator`],
/// yielding each node once; a failure while advancing is reported once and
/// ends the walk.
pub struct TreeIterator<T> {
    strategy: Strategy<T>,
    pending: Option<TreeError>,
    failed: bool,
}

impl<T: 'static> TreeIterator<T> {
    /// Iterator positioned on the first node of `root` in `order`.
    ///
    /// `queue` only matters for level-order walks.
    #[instrument(level = "debug", skip(root))]
    pub fn begin(root: &Tree<T>, order: TraversalOrder, queue: QueueStrategy) -> TreeResult<Self> {
        let strategy = match order {
            TraversalOrder::LevelOrder => Strategy::LevelOrder(LevelOrder::new(root, queue)?),
            TraversalOrder::PreOrder => Strategy::PreOrder(PreOrder::new(root)),
            TraversalOrder::PostOrder => Strategy::PostOrder(PostOrder::new(root)?),
            TraversalOrder::InOrder => Strategy::InOrder(InOrder::new(root)?),
        };
        debug!("begin {} over {} nodes", order, root.size());
        Ok(Self::wrap(strategy))
    }

    /// Iterator already in its end-state.
    pub fn end(order: TraversalOrder, queue: QueueStrategy) -> TreeResult<Self> {
        let strategy = match order {
            TraversalOrder::LevelOrder => Strategy::LevelOrder(LevelOrder::end(queue)?),
            TraversalOrder::PreOrder => Strategy::PreOrder(PreOrder::end()),
            TraversalOrder::PostOrder => Strategy::PostOrder(PostOrder::end()),
            TraversalOrder::InOrder => Strategy::InOrder(InOrder::end()),
        };
        Ok(Self::wrap(strategy))
    }
}

impl<T> TreeIterator<T> {
    fn wrap(strategy: Strategy<T>) -> Self {
        Self {
            strategy,
            pending: None,
            failed: false,
        }
    }

    pub fn order(&self) -> TraversalOrder {
        match &self.strategy {
            Strategy::LevelOrder(_) => TraversalOrder::LevelOrder,
            Strategy::PreOrder(_) => TraversalOrder::PreOrder,
            Strategy::PostOrder(_) => TraversalOrder::PostOrder,
            Strategy::InOrder(_) => TraversalOrder::InOrder,
        }
    }

    /// Queue backing a level-order walk, `None` for the stack-based orders.
    pub fn queue_strategy(&self) -> Option<QueueStrategy> {
        match &self.strategy {
            Strategy::LevelOrder(it) => Some(it.strategy()),
            _ => None,
        }
    }

    /// Node at the current position; the null tree once exhausted.
    pub fn current(&self) -> &Tree<T> {
        match &self.strategy {
            Strategy::LevelOrder(it) => it.current(),
            Strategy::PreOrder(it) => it.current(),
            Strategy::PostOrder(it) => it.current(),
            Strategy::InOrder(it) => it.current(),
        }
    }

    pub fn is_end(&self) -> bool {
        self.current().is_null()
    }

    /// Step to the next node in order. No-op in the end-state.
    pub fn advance(&mut self) -> TreeResult<()> {
        match &mut self.strategy {
            Strategy::LevelOrder(it) => it.advance(),
            Strategy::PreOrder(it) => it.advance(),
            Strategy::PostOrder(it) => it.advance(),
            Strategy::InOrder(it) => it.advance(),
        }
    }

    /// Independent copy; advancing one leaves the other where it was.
    ///
    /// Fallible because a level-order copy has to allocate queue nodes.
    pub fn try_clone(&self) -> TreeResult<Self> {
        let strategy = match &self.strategy {
            Strategy::LevelOrder(it) => Strategy::LevelOrder(it.try_clone()?),
            Strategy::PreOrder(it) => Strategy::PreOrder(it.clone()),
            Strategy::PostOrder(it) => Strategy::PostOrder(it.clone()),
            Strategy::InOrder(it) => Strategy::InOrder(it.clone()),
        };
        Ok(Self {
            strategy,
            pending: self.pending.clone(),
            failed: self.failed,
        })
    }
}

impl<T> PartialEq for TreeIterator<T> {
    fn eq(&self, other: &Self) -> bool {
        self.current() == other.current()
    }
}

impl<T> Iterator for TreeIterator<T> {
    type Item = TreeResult<Tree<T>>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(err) = self.pending.take() {
            return Some(Err(err));
        }
        if self.failed || self.is_end() {
            return None;
        }
        let item = self.current().clone();
        if let Err(err) = self.advance() {
            self.failed = true;
            self.pending = Some(err);
        }
        Some(Ok(item))
    }
}

impl<T: fmt::Debug> fmt::Debug for TreeIterator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TreeIterator")
            .field("order", &self.order())
            .field("current", self.current())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::builder::{add, leaf, mul, neg, Sample};
    use rstest::rstest;

    fn items(order: TraversalOrder, queue: QueueStrategy, tree: &Tree<i64>) -> Vec<String> {
        TreeIterator::begin(tree, order, queue)
            .unwrap()
            .map(|t| t.unwrap().to_string())
            .collect()
    }

    #[rstest]
    #[case("Levelorder", TraversalOrder::LevelOrder)]
    #[case("Preorder", TraversalOrder::PreOrder)]
    #[case("Postorder", TraversalOrder::PostOrder)]
    #[case("Inorder", TraversalOrder::InOrder)]
    fn given_order_name_when_parsed_then_matches(#[case] name: &str, #[case] expected: TraversalOrder) {
        assert_eq!(name.parse::<TraversalOrder>(), Ok(expected));
        assert_eq!(expected.to_string(), name);
    }

    #[rstest]
    #[case("levelorder")]
    #[case("Breadthfirst")]
    #[case("")]
    fn given_unknown_name_when_parsed_then_unknown_order(#[case] name: &str) {
        let err = name.parse::<TraversalOrder>().unwrap_err();
        assert_eq!(
            err,
            TreeError::UnknownOrder(format!(
                "Unknown/None Implemented Traversal Order - {}",
                name
            ))
        );
    }

    #[rstest]
    #[case(TraversalOrder::LevelOrder, &["*", "-", "+", "5", "3", "4"])]
    #[case(TraversalOrder::PreOrder, &["*", "-", "5", "+", "3", "4"])]
    #[case(TraversalOrder::PostOrder, &["5", "-", "3", "4", "+", "*"])]
    #[case(TraversalOrder::InOrder, &["-", "5", "*", "3", "+", "4"])]
    fn given_classic_tree_when_walked_then_expected_sequence(
        #[case] order: TraversalOrder,
        #[case] expected: &[&str],
    ) {
        let tree = Sample::Classic.build();
        for queue in QueueStrategy::ALL {
            assert_eq!(items(order, queue, &tree), expected);
        }
    }

    #[rstest]
    #[case(TraversalOrder::LevelOrder)]
    #[case(TraversalOrder::PreOrder)]
    #[case(TraversalOrder::PostOrder)]
    #[case(TraversalOrder::InOrder)]
    fn given_null_tree_when_begin_then_equals_end(#[case] order: TraversalOrder) {
        let tree: Tree<i64> = Tree::null();
        let begin = TreeIterator::begin(&tree, order, QueueStrategy::default()).unwrap();
        let end = TreeIterator::end(order, QueueStrategy::default()).unwrap();
        assert!(begin.is_end());
        assert!(begin == end);
    }

    #[rstest]
    #[case(TraversalOrder::LevelOrder)]
    #[case(TraversalOrder::PreOrder)]
    #[case(TraversalOrder::PostOrder)]
    #[case(TraversalOrder::InOrder)]
    fn given_end_iterator_when_advanced_then_stays_at_end(#[case] order: TraversalOrder) {
        let mut it = TreeIterator::<i64>::begin(&leaf(1), order, QueueStrategy::Std).unwrap();
        it.advance().unwrap();
        assert!(it.is_end());
        it.advance().unwrap();
        it.advance().unwrap();
        assert!(it.is_end());
    }

    #[test]
    fn given_iterator_when_cloned_then_independent() {
        let tree = mul(neg(leaf(5)), add(leaf(3), leaf(4)));
        for order in TraversalOrder::ALL {
            let mut first = tree.iter(order).unwrap();
            first.advance().unwrap();
            let second = first.try_clone().unwrap();

            first.advance().unwrap();

            assert!(first != second);
            assert_eq!(second.current(), &tree.iter(order).unwrap().nth(1).unwrap().unwrap());
        }
    }

    #[test]
    fn given_iterator_when_current_read_twice_then_same_node() {
        let tree = Sample::Classic.build();
        let it = tree.iter(TraversalOrder::PreOrder).unwrap();
        assert_eq!(it.current(), it.current());
        assert_eq!(it.current(), &tree);
    }

    #[test]
    fn given_level_order_when_built_then_reports_queue() {
        let tree = leaf(1);
        let it = tree.iter_with(TraversalOrder::LevelOrder, QueueStrategy::Std).unwrap();
        assert_eq!(it.queue_strategy(), Some(QueueStrategy::Std));
        assert_eq!(tree.iter(TraversalOrder::InOrder).unwrap().queue_strategy(), None);
    }
}
