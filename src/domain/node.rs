//! Expression tree nodes.

use std::fmt;

use crate::domain::handle::Handle;
use crate::errors::{TreeError, TreeResult};
use crate::visitor::Visitor;

/// Shared reference to a node; the only way nodes point at each other.
pub type NodeRef<T> = Handle<Node<T>>;

/// One element of an expression tree.
///
/// Operators own their children through [`NodeRef`]s, so a child can be
/// aliased by any number of [`Tree`](crate::domain::Tree) handles without
/// copying. `Negate` carries its single operand on the right.
pub enum Node<T> {
    Leaf(T),
    Negate(NodeRef<T>),
    Add(NodeRef<T>, NodeRef<T>),
    Subtract(NodeRef<T>, NodeRef<T>),
    Multiply(NodeRef<T>, NodeRef<T>),
    Divide(NodeRef<T>, NodeRef<T>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Leaf,
    Negate,
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl NodeKind {
    pub fn symbol(&self) -> &'static str {
        match self {
            NodeKind::Leaf => "",
            NodeKind::Negate | NodeKind::Subtract => "-",
            NodeKind::Add => "+",
            NodeKind::Multiply => "*",
            NodeKind::Divide => "/",
        }
    }
}

impl<T> Node<T> {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Leaf(_) => NodeKind::Leaf,
            Node::Negate(_) => NodeKind::Negate,
            Node::Add(..) => NodeKind::Add,
            Node::Subtract(..) => NodeKind::Subtract,
            Node::Multiply(..) => NodeKind::Multiply,
            Node::Divide(..) => NodeKind::Divide,
        }
    }

    /// Stored value; only leaves carry one.
    pub fn value(&self) -> TreeResult<&T> {
        match self {
            Node::Leaf(item) => Ok(item),
            other => Err(TreeError::NoImplementation(format!(
                "item of a {:?} node",
                other.kind()
            ))),
        }
    }

    /// Left child, `None` when this kind of node has none.
    pub fn left(&self) -> Option<&NodeRef<T>> {
        match self {
            Node::Add(left, _)
            | Node::Subtract(left, _)
            | Node::Multiply(left, _)
            | Node::Divide(left, _) => Some(left),
            Node::Leaf(_) | Node::Negate(_) => None,
        }
    }

    /// Right child; the operand of a unary node lives here.
    pub fn right(&self) -> Option<&NodeRef<T>> {
        match self {
            Node::Negate(child) => Some(child),
            Node::Add(_, right)
            | Node::Subtract(_, right)
            | Node::Multiply(_, right)
            | Node::Divide(_, right) => Some(right),
            Node::Leaf(_) => None,
        }
    }

    /// Move the children out, leaving null handles behind.
    fn take_children(&mut self, out: &mut Vec<NodeRef<T>>) {
        match self {
            Node::Leaf(_) => {}
            Node::Negate(child) => out.push(std::mem::take(child)),
            Node::Add(left, right)
            | Node::Subtract(left, right)
            | Node::Multiply(left, right)
            | Node::Divide(left, right) => {
                out.push(std::mem::take(left));
                out.push(std::mem::take(right));
            }
        }
    }

    /// Double dispatch: the node picks the visitor method, the visitor
    /// decides what it means.
    pub fn accept(&self, visitor: &mut dyn Visitor<T>) -> TreeResult<()> {
        match self {
            Node::Leaf(item) => visitor.visit_leaf(item),
            Node::Negate(_) => visitor.visit_negate(self),
            Node::Add(..) => visitor.visit_add(self),
            Node::Subtract(..) => visitor.visit_subtract(self),
            Node::Multiply(..) => visitor.visit_multiply(self),
            Node::Divide(..) => visitor.visit_divide(self),
        }
    }
}

/// Releases exclusively-owned descendants from an explicit stack, so
/// dropping a long chain does not recurse once per level.
impl<T> Drop for Node<T> {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.take_children(&mut pending);
        while let Some(handle) = pending.pop() {
            if let Ok(mut node) = handle.try_unwrap() {
                node.take_children(&mut pending);
            }
        }
    }
}

impl<T: fmt::Display> fmt::Display for Node<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Leaf(item) => write!(f, "{}", item),
            other => f.write_str(other.kind().symbol()),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Node<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Leaf(item) => f.debug_tuple("Leaf").field(item).finish(),
            Node::Negate(child) => f.debug_tuple("Negate").field(&child.node()).finish(),
            other => {
                let left = other.left().and_then(Handle::node);
                let right = other.right().and_then(Handle::node);
                f.debug_tuple(&format!("{:?}", other.kind()))
                    .field(&left)
                    .field(&right)
                    .finish()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_leaf_when_value_then_returns_item() {
        let node = Node::Leaf(42);
        assert_eq!(node.value(), Ok(&42));
        assert!(node.left().is_none());
        assert!(node.right().is_none());
    }

    #[test]
    fn given_operator_when_value_then_no_implementation() {
        let node = Node::Add(Handle::new(Node::Leaf(1)), Handle::new(Node::Leaf(2)));
        assert!(matches!(node.value(), Err(TreeError::NoImplementation(_))));
    }

    #[test]
    fn given_negate_when_children_then_operand_is_right() {
        let node = Node::Negate(Handle::new(Node::Leaf(5)));
        assert!(node.left().is_none());
        let child = node.right().unwrap().get().unwrap();
        assert_eq!(child.value(), Ok(&5));
    }

    #[test]
    fn given_shared_child_when_parent_dropped_then_child_survives() {
        let child = Handle::new(Node::Leaf(2));
        let watcher = child.downgrade().unwrap();
        let parent = Node::Add(Handle::new(Node::Leaf(1)), child.clone());

        drop(parent);

        assert_eq!(child.use_count(), 1);
        assert!(watcher.upgrade().is_some());
        drop(child);
        assert!(watcher.upgrade().is_none());
    }

    #[test]
    fn given_nodes_when_displayed_then_shows_value_or_symbol() {
        let leaf = Node::Leaf(3);
        let div = Node::Divide(Handle::new(Node::Leaf(6)), Handle::new(Node::Leaf(3)));
        let neg = Node::Negate(Handle::new(Node::Leaf(1)));
        assert_eq!(leaf.to_string(), "3");
        assert_eq!(div.to_string(), "/");
        assert_eq!(neg.to_string(), "-");
    }
}
