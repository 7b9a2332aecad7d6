//! Completion proxy HTTP server.
//!
//! `POST /api/chat` turns `{query, context}` into a model answer;
//! `GET /health` is a liveness check.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use error::{ApiError, GENERIC_FAILURE};
pub use routes::{cors_layer, create_router};
pub use state::AppState;
