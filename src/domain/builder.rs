//! Tree construction helpers and the built-in sample expressions.

use std::fmt;
use std::str::FromStr;

use crate::domain::node::Node;
use crate::domain::tree::Tree;
use crate::errors::TreeError;

pub fn leaf<T>(item: T) -> Tree<T> {
    Tree::new(Node::Leaf(item))
}

pub fn neg<T>(operand: Tree<T>) -> Tree<T> {
    Tree::new(Node::Negate(operand.into_handle()))
}

pub fn add<T>(left: Tree<T>, right: Tree<T>) -> Tree<T> {
    Tree::new(Node::Add(left.into_handle(), right.into_handle()))
}

pub fn sub<T>(left: Tree<T>, right: Tree<T>) -> Tree<T> {
    Tree::new(Node::Subtract(left.into_handle(), right.into_handle()))
}

pub fn mul<T>(left: Tree<T>, right: Tree<T>) -> Tree<T> {
    Tree::new(Node::Multiply(left.into_handle(), right.into_handle()))
}

pub fn div<T>(left: Tree<T>, right: Tree<T>) -> Tree<T> {
    Tree::new(Node::Divide(left.into_handle(), right.into_handle()))
}

/// Named expressions shipped with the binary (there is no text parser).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Sample {
    Sum,
    Difference,
    Negation,
    Product,
    Mixed,
    #[default]
    Classic,
    Nested,
}

impl Sample {
    pub const ALL: [Sample; 7] = [
        Sample::Sum,
        Sample::Difference,
        Sample::Negation,
        Sample::Product,
        Sample::Mixed,
        Sample::Classic,
        Sample::Nested,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Sample::Sum => "sum",
            Sample::Difference => "difference",
            Sample::Negation => "negation",
            Sample::Product => "product",
            Sample::Mixed => "mixed",
            Sample::Classic => "classic",
            Sample::Nested => "nested",
        }
    }

    /// Infix rendering, for listings.
    pub fn expression(&self) -> &'static str {
        match self {
            Sample::Sum => "3 + 4",
            Sample::Difference => "10 - 3",
            Sample::Negation => "-5",
            Sample::Product => "(1 + 2) * 3",
            Sample::Mixed => "1 + (2 - 3)",
            Sample::Classic => "-5 * (3 + 4)",
            Sample::Nested => "(10 - 3) - (8 / 2)",
        }
    }

    pub fn build(&self) -> Tree<i64> {
        match self {
            Sample::Sum => add(leaf(3), leaf(4)),
            Sample::Difference => sub(leaf(10), leaf(3)),
            Sample::Negation => neg(leaf(5)),
            Sample::Product => mul(add(leaf(1), leaf(2)), leaf(3)),
            Sample::Mixed => add(leaf(1), sub(leaf(2), leaf(3))),
            Sample::Classic => mul(neg(leaf(5)), add(leaf(3), leaf(4))),
            Sample::Nested => sub(sub(leaf(10), leaf(3)), div(leaf(8), leaf(2))),
        }
    }
}

impl FromStr for Sample {
    type Err = TreeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Sample::ALL
            .iter()
            .copied()
            .find(|sample| sample.name() == s)
            .ok_or_else(|| TreeError::NoImplementation(format!("no sample named '{}'", s)))
    }
}

impl fmt::Display for Sample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
