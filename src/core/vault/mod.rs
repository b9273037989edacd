//! Vault client capability.
//!
//! Abstracts the two operations the downloader needs so the orchestration
//! can run against Azure Key Vault or an in-memory stand-in.
//!
//! ## Backends
//!
//! - **azure**: Key Vault REST API over HTTPS with a bearer token.
//! - **memory**: test-only vault with injectable failures.

mod azure;

#[cfg(test)]
pub mod memory;

pub use azure::KeyVaultClient;

use async_trait::async_trait;

use crate::core::domain::SecretMetadata;
use crate::core::types::SecretValue;
use crate::error::VaultError;

/// Read access to a secret vault.
#[async_trait]
pub trait SecretClient: Send + Sync {
    /// List secret metadata, keeping only names that start with `prefix`.
    ///
    /// An empty prefix lists everything.
    async fn list(&self, prefix: &str) -> Result<Vec<SecretMetadata>, VaultError>;

    /// Fetch the current value of a secret.
    ///
    /// Returns `Ok(None)` when the secret exists but carries no value.
    async fn get_value(&self, name: &str) -> Result<Option<SecretValue>, VaultError>;
}
