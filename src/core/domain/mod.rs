//! Domain types.
//!
//! - `SecretMetadata`: a vault secret as returned by listing

mod secret;

pub use secret::{filter_active, SecretMetadata};
