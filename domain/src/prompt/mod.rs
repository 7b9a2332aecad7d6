//! Prompt domain
//!
//! Fixed texts shown to the user and sent to the language model.

mod template;

pub use template::PromptTemplate;
