//! Identity provider adapter (OAuth 2.0 device authorization grant)

mod device_code;
mod protocol;

pub use device_code::{DeviceCodeIdentityProvider, IdentitySettings};
