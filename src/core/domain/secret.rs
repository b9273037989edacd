//! Secret metadata.
//!
//! Represents one entry of a vault listing. Listings never carry values.

use chrono::{DateTime, Utc};

use crate::core::types::SecretName;

/// Listing entry for a vault secret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretMetadata {
    pub name: SecretName,
    pub enabled: bool,
    pub expires: Option<DateTime<Utc>>,
    pub content_type: Option<String>,
}

impl SecretMetadata {
    /// Create metadata for an enabled secret without expiry.
    pub fn new(name: impl Into<SecretName>) -> Self {
        Self {
            name: name.into(),
            enabled: true,
            expires: None,
            content_type: None,
        }
    }

    /// Whether the secret can be fetched at `now`: enabled and not expired.
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.enabled && self.expires.map_or(true, |expires| expires > now)
    }
}

impl std::fmt::Display for SecretMetadata {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Keep only secrets that are enabled and unexpired at `now`.
pub fn filter_active(secrets: Vec<SecretMetadata>, now: DateTime<Utc>) -> Vec<SecretMetadata> {
    secrets.into_iter().filter(|s| s.is_active(now)).collect()
}
