//! CLI-level errors (wraps core and config errors)

use thiserror::Error;

use crate::config::ConfigError;
use crate::errors::TreeError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Tree(#[from] TreeError),

    #[error("config: {0}")]
    Config(#[from] ConfigError),

    #[error("output: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Tree(e) => match e {
                TreeError::UnknownOrder(_) => crate::exitcode::USAGE,
                TreeError::Arithmetic(_) => crate::exitcode::DATAERR,
                TreeError::NoImplementation(_)
                | TreeError::Underflow(_)
                | TreeError::Overflow(_) => crate::exitcode::SOFTWARE,
            },
            CliError::Config(_) => crate::exitcode::CONFIG,
            CliError::Io(_) => crate::exitcode::IOERR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exitcode;
    use rstest::rstest;

    #[rstest]
    #[case(TreeError::unknown_traversal("Zigzag"), exitcode::USAGE)]
    #[case(TreeError::unknown_queue("Ring"), exitcode::USAGE)]
    #[case(TreeError::Arithmetic("1 / 0".into()), exitcode::DATAERR)]
    #[case(TreeError::Underflow("empty".into()), exitcode::SOFTWARE)]
    #[case(TreeError::Overflow("full".into()), exitcode::SOFTWARE)]
    #[case(TreeError::null_tree("item"), exitcode::SOFTWARE)]
    fn given_tree_error_when_exit_code_then_sysexits(#[case] err: TreeError, #[case] code: i32) {
        assert_eq!(CliError::from(err).exit_code(), code);
    }

    #[test]
    fn given_config_error_when_exit_code_then_config() {
        let err = CliError::from(ConfigError::Invalid(TreeError::unknown_queue("Ring")));
        assert_eq!(err.exit_code(), exitcode::CONFIG);
    }
}
