//! Domain layer: pure, stateless algorithms
//!
//! This layer is independent of external concerns (no file I/O, no CLI, no config loading).

pub mod arena;
pub mod builder;
pub mod collections;
pub mod combination;
pub mod error;
pub mod functional;
pub mod retry;
pub mod sequence;
pub mod tree;

pub use arena::{ArenaChildren, ArenaEntry, ArenaNode, TreeArena};
pub use builder::TreeBuilder;
pub use collections::{sort_tuples, swap_elements, CacheExt, Singleton};
pub use combination::{combination_count, generate_combinations, Combinations};
pub use error::{DomainError, DomainResult};
pub use functional::{combine_predicates, scalar_product};
pub use retry::{invoke_with_retry, RetryInvoker, DEFAULT_MAX_ATTEMPTS};
pub use sequence::{fibonacci, tokenize, Fibonacci, Tokenizer, Tokens, DEFAULT_DELIMITERS};
pub use tree::{
    breadth_traversal, depth_traversal, fold_tree, post_order_traversal, BreadthFirst,
    DepthFirst, PostOrder, TraversalOrder, TreeNode, TreeNodeRef,
};
