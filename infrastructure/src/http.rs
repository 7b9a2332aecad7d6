//! Shared HTTP client helpers for the outbound adapters

use reqwest::Client;
use std::time::Duration;

const USER_AGENT: &str = concat!("doc-assistant/", env!("CARGO_PKG_VERSION"));
const SNIPPET_CHARS: usize = 200;

/// Build the client every adapter uses, with a per-request timeout.
pub fn build_client(timeout: Duration) -> reqwest::Result<Client> {
    Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
}

/// First part of an error body, collapsed to one line, for error messages.
pub fn snippet(body: &str) -> String {
    let flat = body.split_whitespace().collect::<Vec<_>>().join(" ");
    assistant_domain::util::preview(&flat, SNIPPET_CHARS)
}

/// Join a base URL and a path without doubling or dropping the slash.
pub fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
