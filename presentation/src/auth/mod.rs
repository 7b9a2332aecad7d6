//! Terminal sign-in presentation

mod prompt;

pub use prompt::TerminalLoginPrompt;
