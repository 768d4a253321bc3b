//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (FileSystem, CommandRunner)
//! but are themselves concrete structs, not traits.

mod command;
mod text;
mod tree;

pub use command::{AttemptError, CommandService};
pub use text::TextService;
pub use tree::TreeService;
