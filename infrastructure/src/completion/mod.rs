//! Client for the completion proxy (`POST /api/chat`)

mod client;
mod protocol;

pub use client::HttpCompletionClient;
