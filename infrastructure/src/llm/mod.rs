//! Hosted chat-completion adapter used by the completion proxy

mod openai;
mod protocol;

pub use openai::OpenAiChatModel;
