//! Stack-based arithmetic evaluation.

use std::fmt;

use tracing::{debug, instrument, trace};

use crate::domain::{Node, Tree};
use crate::errors::{TreeError, TreeResult};
use crate::traversal::TraversalOrder;
use crate::visitor::{drive, Visitor};

/// Values an evaluator can compute with.
///
/// Integer arithmetic is checked: overflow and division by zero are
/// `Arithmetic` errors instead of panics or wrap-around.
pub trait Operand: Clone + fmt::Display {
    fn try_neg(self) -> TreeResult<Self>;
    fn try_add(self, rhs: Self) -> TreeResult<Self>;
    fn try_sub(self, rhs: Self) -> TreeResult<Self>;
    fn try_mul(self, rhs: Self) -> TreeResult<Self>;
    fn try_div(self, rhs: Self) -> TreeResult<Self>;
}

fn overflow<T: fmt::Display>(lhs: &T, op: &str, rhs: &T) -> TreeError {
    TreeError::Arithmetic(format!("{} {} {} overflows", lhs, op, rhs))
}

macro_rules! checked_operand {
    ($($t:ty),*) => {$(
        impl Operand for $t {
            fn try_neg(self) -> TreeResult<Self> {
                self.checked_neg()
                    .ok_or_else(|| TreeError::Arithmetic(format!("-{} overflows", self)))
            }

            fn try_add(self, rhs: Self) -> TreeResult<Self> {
                self.checked_add(rhs).ok_or_else(|| overflow(&self, "+", &rhs))
            }

            fn try_sub(self, rhs: Self) -> TreeResult<Self> {
                self.checked_sub(rhs).ok_or_else(|| overflow(&self, "-", &rhs))
            }

            fn try_mul(self, rhs: Self) -> TreeResult<Self> {
                self.checked_mul(rhs).ok_or_else(|| overflow(&self, "*", &rhs))
            }

            fn try_div(self, rhs: Self) -> TreeResult<Self> {
                if rhs == 0 {
                    return Err(TreeError::Arithmetic(format!("{} / 0: division by zero", self)));
                }
                self.checked_div(rhs).ok_or_else(|| overflow(&self, "/", &rhs))
            }
        }
    )*};
}

checked_operand!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

macro_rules! float_operand {
    ($($t:ty),*) => {$(
        impl Operand for $t {
            fn try_neg(self) -> TreeResult<Self> {
                Ok(-self)
            }

            fn try_add(self, rhs: Self) -> TreeResult<Self> {
                Ok(self + rhs)
            }

            fn try_sub(self, rhs: Self) -> TreeResult<Self> {
                Ok(self - rhs)
            }

            fn try_mul(self, rhs: Self) -> TreeResult<Self> {
                Ok(self * rhs)
            }

            fn try_div(self, rhs: Self) -> TreeResult<Self> {
                Ok(self / rhs)
            }
        }
    )*};
}

float_operand!(f32, f64);

/// Evaluates nodes fed in post-order.
///
/// Leaves push their value; operators pop their operands and push the
/// result. Children arrive left then right, so a binary operator finds
/// its right operand on top of the stack.
#[derive(Debug, Clone)]
pub struct PostOrderEvaluator<T> {
    stack: Vec<T>,
}

impl<T: Operand> PostOrderEvaluator<T> {
    pub fn new() -> Self {
        Self { stack: Vec::new() }
    }

    /// Top of the operand stack, left in place.
    pub fn yield_value(&self) -> TreeResult<T> {
        self.stack
            .last()
            .cloned()
            .ok_or_else(|| TreeError::Underflow("nothing evaluated yet".to_string()))
    }

    /// Operands currently on the stack.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn reset(&mut self) {
        self.stack.clear();
    }

    fn push(&mut self, value: T) {
        trace!("push {}", value);
        self.stack.push(value);
    }

    fn pop(&mut self, kind: &str) -> TreeResult<T> {
        self.stack
            .pop()
            .ok_or_else(|| TreeError::Underflow(format!("missing operand for {}", kind)))
    }

    fn binary(&mut self, kind: &str, op: fn(T, T) -> TreeResult<T>) -> TreeResult<()> {
        let right = self.pop(kind)?;
        let left = self.pop(kind)?;
        let value = op(left, right)?;
        self.push(value);
        Ok(())
    }
}

impl<T: Operand> Default for PostOrderEvaluator<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Operand> Visitor<T> for PostOrderEvaluator<T> {
    fn visit_leaf(&mut self, item: &T) -> TreeResult<()> {
        self.push(item.clone());
        Ok(())
    }

    fn visit_negate(&mut self, _node: &Node<T>) -> TreeResult<()> {
        let operand = self.pop("negate")?;
        self.push(operand.try_neg()?);
        Ok(())
    }

    fn visit_add(&mut self, _node: &Node<T>) -> TreeResult<()> {
        self.binary("add", T::try_add)
    }

    fn visit_subtract(&mut self, _node: &Node<T>) -> TreeResult<()> {
        self.binary("subtract", T::try_sub)
    }

    fn visit_multiply(&mut self, _node: &Node<T>) -> TreeResult<()> {
        self.binary("multiply", T::try_mul)
    }

    fn visit_divide(&mut self, _node: &Node<T>) -> TreeResult<()> {
        self.binary("divide", T::try_div)
    }
}

/// Evaluates nodes fed in reversed pre-order.
///
/// Walking a pre-order sequence back to front puts the right operand on the
/// stack before the left one, so subtraction and division take the first
/// popped value as their left operand. Everything else is the post-order
/// evaluator unchanged.
#[derive(Debug, Clone)]
pub struct ReversedEvaluator<T> {
    inner: PostOrderEvaluator<T>,
}

impl<T: Operand> ReversedEvaluator<T> {
    pub fn new() -> Self {
        Self {
            inner: PostOrderEvaluator::new(),
        }
    }

    pub fn yield_value(&self) -> TreeResult<T> {
        self.inner.yield_value()
    }

    pub fn depth(&self) -> usize {
        self.inner.depth()
    }

    pub fn reset(&mut self) {
        self.inner.reset()
    }

    fn binary_swapped(&mut self, kind: &str, op: fn(T, T) -> TreeResult<T>) -> TreeResult<()> {
        let left = self.inner.pop(kind)?;
        let right = self.inner.pop(kind)?;
        let value = op(left, right)?;
        self.inner.push(value);
        Ok(())
    }
}

impl<T: Operand> Default for ReversedEvaluator<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Operand> Visitor<T> for ReversedEvaluator<T> {
    fn visit_leaf(&mut self, item: &T) -> TreeResult<()> {
        self.inner.visit_leaf(item)
    }

    fn visit_negate(&mut self, node: &Node<T>) -> TreeResult<()> {
        self.inner.visit_negate(node)
    }

    fn visit_add(&mut self, node: &Node<T>) -> TreeResult<()> {
        self.inner.visit_add(node)
    }

    fn visit_subtract(&mut self, _node: &Node<T>) -> TreeResult<()> {
        self.binary_swapped("subtract", T::try_sub)
    }

    fn visit_multiply(&mut self, node: &Node<T>) -> TreeResult<()> {
        self.inner.visit_multiply(node)
    }

    fn visit_divide(&mut self, _node: &Node<T>) -> TreeResult<()> {
        self.binary_swapped("divide", T::try_div)
    }
}

/// Value of `tree`: post-order walk feeding the forward evaluator.
#[instrument(level = "debug", skip(tree))]
pub fn evaluate<T: Operand + 'static>(tree: &Tree<T>) -> TreeResult<T> {
    evaluate_in(tree, TraversalOrder::PostOrder)
}

/// Feed the forward evaluator in `order`.
///
/// Only post-order yields the value of the expression; other orders hand
/// operators to the evaluator before their operands and typically fail
/// with `Underflow`.
pub fn evaluate_in<T: Operand + 'static>(tree: &Tree<T>, order: TraversalOrder) -> TreeResult<T> {
    let mut evaluator = PostOrderEvaluator::new();
    drive(&mut evaluator, tree.iter(order)?)?;
    let value = evaluator.yield_value()?;
    debug!("{} evaluation: {} ({} left on stack)", order, value, evaluator.depth());
    Ok(value)
}

/// Value of `tree`: pre-order sequence consumed back to front by the
/// reversed evaluator.
#[instrument(level = "debug", skip(tree))]
pub fn evaluate_reversed<T: Operand + 'static>(tree: &Tree<T>) -> TreeResult<T> {
    let sequence = tree
        .iter(TraversalOrder::PreOrder)?
        .collect::<TreeResult<Vec<_>>>()?;

    let mut evaluator = ReversedEvaluator::new();
    for node in sequence.iter().rev() {
        node.accept(&mut evaluator)?;
    }
    evaluator.yield_value()
}
