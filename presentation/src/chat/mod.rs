//! Interactive chat module
//!
//! Provides a readline-based interactive chat interface over the
//! signed-in user's documents.

mod command;
mod interrupt;
mod repl;

pub use command::ReplCommand;
pub use interrupt::InterruptWatch;
pub use repl::ChatRepl;
