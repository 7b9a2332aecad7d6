//! Document domain.
//!
//! - [`entities::Document`]: one search hit with its text excerpt
//! - [`context::assemble_context`]: flattens hits into grounding text

pub mod context;
pub mod entities;
