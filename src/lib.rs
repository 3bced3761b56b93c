//! exprtree: immutable, reference-counted expression trees.
//!
//! Trees are walked by [`TreeIterator`]s in level, pre, post or in order and
//! evaluated by visitors fed from those walks.
//!
//! # Architecture
//!
//! - `domain`: nodes, the shared handle, `Tree`, sample expressions
//! - `traversal`: the four traversal state machines
//! - `queue`: work queues for level-order walks and their node free list
//! - `visitor`: the visitor contract and the arithmetic evaluators
//! - `config`, `cli`: settings and the `exprtree` command line

pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod exitcode;
pub mod queue;
pub mod traversal;
pub mod util;
pub mod visitor;

pub use domain::{Handle, Node, NodeKind, NodeRef, Sample, Tree, TreeConvert};
pub use errors::{TreeError, TreeResult};
pub use queue::{make_queue, FreeList, QueueError, QueueStrategy, WorkQueue};
pub use traversal::{TraversalOrder, TreeIterator};
pub use visitor::{
    drive, evaluate, evaluate_in, evaluate_reversed, Operand, PostOrderEvaluator,
    ReversedEvaluator, Visitor,
};
