//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum, ValueHint};

use crate::domain::TraversalOrder;

/// Generic tree traversal, combination and sequence generators, and a bounded retry invoker
#[derive(Parser, Debug)]
#[command(name = "seqtree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Directory holding a local .seqtree.toml (default: cwd)
    #[arg(short = 'C', long, global = true, value_hint = ValueHint::DirPath)]
    pub config_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the first COUNT Fibonacci numbers
    Fib {
        /// Number of terms
        #[arg(allow_negative_numbers = true)]
        count: i64,
    },

    /// Split text into words, one per line
    Tokenize {
        /// Text file (default: stdin)
        #[arg(value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,
    },

    /// Print every combination of K items
    Combinations {
        /// Combination size
        #[arg(short, allow_negative_numbers = true)]
        k: i64,
        /// Source items
        items: Vec<String>,
    },

    /// Traverse the trees of a tree definition file
    Traverse {
        /// Tree definition (`parent: child ...` per line)
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Visiting order (default: from config)
        #[arg(short, long, value_enum)]
        order: Option<OrderArg>,
    },

    /// Show the trees of a tree definition file
    Tree {
        /// Tree definition (`parent: child ...` per line)
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Run a command until it succeeds
    Retry {
        /// Total attempts (default: from config)
        #[arg(short, long)]
        attempts: Option<usize>,
        /// Command and its arguments
        #[arg(last = true, required = true, num_args = 1..)]
        command: Vec<String>,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective configuration
    Show,
    /// Print a commented config template
    Template,
    /// Show config file locations
    Path,
}

/// Traversal order as accepted on the command line.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OrderArg {
    /// Pre-order
    Depth,
    /// Level order
    Breadth,
    /// Post-order
    Post,
}

impl From<OrderArg> for TraversalOrder {
    fn from(arg: OrderArg) -> Self {
        match arg {
            OrderArg::Depth => TraversalOrder::Depth,
            OrderArg::Breadth => TraversalOrder::Breadth,
            OrderArg::Post => TraversalOrder::Post,
        }
    }
}
