//! Wire types of the completion proxy endpoint, as seen by the client.

use serde::{Deserialize, Serialize};

/// Request body of `POST /api/chat`
#[derive(Debug, Clone, Serialize)]
pub(super) struct ChatBody<'a> {
    pub query: &'a str,
    pub context: &'a str,
}

/// Success body of `POST /api/chat`
#[derive(Debug, Clone, Deserialize)]
pub(super) struct ChatReply {
    pub message: String,
}
