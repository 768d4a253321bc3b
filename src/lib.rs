//! Generic tree traversal, combination and sequence generators, and a
//! bounded retry invoker.
//!
//! The pure algorithms live in [`domain`]; [`application`] services apply
//! them to files and commands, [`cli`] exposes them as the `seqtree` binary.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
