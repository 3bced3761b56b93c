//! Domain layer: the expression tree itself
//!
//! Nodes, the shared-ownership handle that links them, and the `Tree` view
//! callers work with. No I/O, no configuration.

pub mod builder;
pub mod display;
pub mod handle;
pub mod node;
pub mod tree;

pub use builder::{add, div, leaf, mul, neg, sub, Sample};
pub use display::TreeConvert;
pub use handle::Handle;
pub use node::{Node, NodeKind, NodeRef};
pub use tree::Tree;
