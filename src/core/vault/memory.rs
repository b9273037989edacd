//! In-memory vault for tests.

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use async_trait::async_trait;

use super::SecretClient;
use crate::core::domain::SecretMetadata;
use crate::core::types::SecretValue;
use crate::error::VaultError;

/// Vault stand-in with injectable failures.
#[derive(Debug, Default)]
pub struct MemoryVault {
    listing: Vec<SecretMetadata>,
    values: HashMap<String, String>,
    failing: HashSet<String>,
    list_fails: bool,
    delay: Option<Duration>,
}

impl MemoryVault {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a listed secret and its value.
    pub fn with_secret(mut self, meta: SecretMetadata, value: &str) -> Self {
        self.values.insert(meta.name.clone(), value.to_string());
        self.listing.push(meta);
        self
    }

    /// Make fetching `name` fail with a server error.
    pub fn failing(mut self, name: &str) -> Self {
        self.failing.insert(name.to_string());
        self
    }

    /// Make listing fail.
    pub fn failing_list(mut self) -> Self {
        self.list_fails = true;
        self
    }

    /// Delay every fetch, so concurrent fetches overlap.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[async_trait]
impl SecretClient for MemoryVault {
    async fn list(&self, prefix: &str) -> Result<Vec<SecretMetadata>, VaultError> {
        if self.list_fails {
            return Err(VaultError::ServerError(500));
        }
        Ok(self
            .listing
            .iter()
            .filter(|s| s.name.starts_with(prefix))
            .cloned()
            .collect())
    }

    async fn get_value(&self, name: &str) -> Result<Option<SecretValue>, VaultError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.failing.contains(name) {
            return Err(VaultError::ServerError(500));
        }
        self.values
            .get(name)
            .map(|value| Some(SecretValue::new(value.clone())))
            .ok_or_else(|| VaultError::NotFound(name.to_string()))
    }
}
