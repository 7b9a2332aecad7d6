//! Shared state for the completion server.

use assistant_application::ProxyCompletionUseCase;
use std::sync::Arc;

/// Immutable state shared by every request handler.
#[derive(Clone)]
pub struct AppState {
    pub completion: Arc<ProxyCompletionUseCase>,
}

impl AppState {
    pub fn new(completion: ProxyCompletionUseCase) -> Self {
        Self {
            completion: Arc::new(completion),
        }
    }
}
