use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// A node or handle was asked for something it does not carry
    /// (value of an operator, children of a null tree, ...).
    #[error("No implementation: {0}")]
    NoImplementation(String),

    #[error("{0}")]
    UnknownOrder(String),

    #[error("Underflow: {0}")]
    Underflow(String),

    #[error("Overflow: {0}")]
    Overflow(String),

    #[error("Arithmetic error: {0}")]
    Arithmetic(String),
}

impl TreeError {
    pub fn unknown_traversal(name: &str) -> Self {
        TreeError::UnknownOrder(format!(
            "Unknown/None Implemented Traversal Order - {}",
            name
        ))
    }

    pub fn unknown_queue(name: &str) -> Self {
        TreeError::UnknownOrder(format!("{} is unknown queue strategy", name))
    }

    pub fn null_tree(operation: &str) -> Self {
        TreeError::NoImplementation(format!("{} called on a null tree", operation))
    }
}

pub type TreeResult<T> = Result<T, TreeError>;
