//! Application-level configuration.
//!
//! - [`CompletionParams`]: sampling knobs the completion backend applies
//! - [`TurnParams`]: per-turn limits for the orchestration use case

pub mod params;

pub use params::{CompletionParams, TurnParams};
