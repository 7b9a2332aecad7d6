//! Authentication domain.
//!
//! - [`entities::AuthState`]: the identity adapter's state machine
//! - [`entities::AuthSession`]: token + account produced by a login

pub mod entities;
