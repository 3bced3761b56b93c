//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueHint};

use crate::domain::Sample;

/// Walk and evaluate shared expression trees in any traversal order
#[derive(Parser, Debug)]
#[command(name = "exprtree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Turn debugging information on (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub debug: u8,

    /// Config file layered over the global one
    #[arg(long, global = true, env = "EXPRTREE_CONFIG", value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print each node of a sample, one per line
    Walk {
        /// Levelorder | Preorder | Postorder | Inorder
        #[arg(short = 't', long)]
        order: Option<String>,
        /// LQueue | STLQueue (level-order only)
        #[arg(short = 'q', long)]
        queue: Option<String>,
        /// Sample expression
        #[arg(default_value_t = Sample::default())]
        sample: Sample,
    },

    /// Evaluate a sample
    Eval {
        /// Order feeding the evaluator (default: Postorder)
        #[arg(short = 't', long, conflicts_with = "reversed")]
        order: Option<String>,
        /// Reversed evaluator over the pre-order sequence, back to front
        #[arg(long)]
        reversed: bool,
        /// Sample expression
        #[arg(default_value_t = Sample::default())]
        sample: Sample,
    },

    /// Draw a sample as a tree
    Show {
        /// Sample expression
        #[arg(default_value_t = Sample::default())]
        sample: Sample,
    },

    /// List built-in samples
    Samples,

    /// Print effective settings as TOML
    Config {
        /// Print a commented template instead
        #[arg(long)]
        template: bool,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}
