// CLI conversation layer

pub mod commands;
pub mod repl;

pub use repl::{print_wisdom, Repl};
