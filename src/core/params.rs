//! Step input resolution.
//!
//! Turns the raw `keyvault`, `secrets` and `secretsfile` inputs into a
//! validated [`ActionParameters`] carrying the vault address and where the
//! secret selection comes from.

use tracing::debug;

use crate::core::cloud::{self, SuffixLookup};
use crate::core::constants::KEYVAULT_DNS_ENDPOINT;
use crate::error::{ConfigError, InputProblem};

/// Raw step inputs, as read from flags or `INPUT_*` variables.
///
/// Empty strings mean "not provided".
#[derive(Debug, Clone, Default)]
pub struct Inputs {
    pub keyvault: String,
    pub secrets: String,
    pub secrets_file: String,
}

/// A vault and the address it is reached at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultRef {
    name: String,
    url: String,
}

impl VaultRef {
    /// Vault name as given in the inputs.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Base URL of the vault, without a trailing slash.
    pub fn url(&self) -> &str {
        &self.url
    }
}

/// Where the secret selection is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionSource {
    /// Inline `name=alias,...` filter, or `*`.
    Filter(String),
    /// Glob pattern of `name=alias` files.
    File(String),
}

/// Validated step parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionParameters {
    pub vault: VaultRef,
    pub source: SelectionSource,
}

impl ActionParameters {
    /// Validate `inputs` and derive the vault URL from the cloud's suffix.
    ///
    /// Every violated rule is collected before returning, and nothing is
    /// derived from inputs that failed validation.
    ///
    /// # Errors
    ///
    /// `ConfigError::InvalidInputs` listing each problem, or
    /// `ConfigError::UnknownEndpoint` if the cloud has no Key Vault suffix.
    pub fn resolve(inputs: &Inputs, cloud: &impl SuffixLookup) -> Result<Self, ConfigError> {
        let name = inputs.keyvault.trim();
        let filter = inputs.secrets.trim();
        let file = inputs.secrets_file.trim();

        let problems = validate(name, filter, file);
        if !problems.is_empty() {
            return Err(ConfigError::InvalidInputs(problems));
        }

        let suffix = cloud
            .suffix_url(KEYVAULT_DNS_ENDPOINT)
            .ok_or_else(|| ConfigError::UnknownEndpoint(KEYVAULT_DNS_ENDPOINT.to_string()))?;
        let url = format!("https://{}.{}", name, cloud::strip_separator(&suffix));

        let source = if file.is_empty() {
            SelectionSource::Filter(filter.to_string())
        } else {
            SelectionSource::File(file.to_string())
        };

        debug!(vault = %name, url = %url, "resolved vault");

        Ok(Self {
            vault: VaultRef {
                name: name.to_string(),
                url,
            },
            source,
        })
    }

    /// Replace the derived vault URL, e.g. for Azure Stack or a local mock.
    ///
    /// # Errors
    ///
    /// `ConfigError::InsecureUrl` unless the URL is `https://` or loopback `http://`.
    pub fn with_vault_url(mut self, url: &str) -> Result<Self, ConfigError> {
        cloud::validate_url_scheme(url)?;
        self.vault.url = url.trim_end_matches('/').to_string();
        debug!(url = %self.vault.url, "vault url overridden");
        Ok(self)
    }
}

fn validate(name: &str, filter: &str, file: &str) -> Vec<InputProblem> {
    let mut problems = Vec::new();

    if name.is_empty() {
        problems.push(InputProblem::MissingVault);
    }

    match (filter.is_empty(), file.is_empty()) {
        (false, false) => problems.push(InputProblem::ConflictingSelection),
        (true, true) => problems.push(InputProblem::MissingSelection),
        _ => {}
    }

    problems
}
