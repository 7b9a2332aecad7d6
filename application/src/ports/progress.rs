//! Progress notification port
//!
//! Defines the interface for reporting progress during a question turn.

use assistant_domain::Document;

/// Callback for progress updates during an orchestration turn
///
/// Implementations live in the presentation layer (spinner, status line).
/// All methods default to no-ops.
pub trait TurnProgress: Send + Sync {
    fn on_search_start(&self, _query: &str) {}

    fn on_search_complete(&self, _documents: &[Document]) {}

    fn on_completion_start(&self) {}

    /// Called exactly once per turn that reached the search step.
    fn on_turn_complete(&self, _success: bool) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl TurnProgress for NoProgress {}
