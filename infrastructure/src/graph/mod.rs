//! Microsoft Graph search adapter

mod protocol;
mod search;

pub use search::GraphDocumentSearch;
