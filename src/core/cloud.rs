//! Cloud environments and their endpoint suffixes.
//!
//! The vault address is derived from a per-cloud DNS suffix. Suffixes are
//! stored the way the cloud metadata publishes them, with a leading `.`,
//! and callers strip that separator before building a host name.

use std::str::FromStr;

use crate::core::constants::KEYVAULT_DNS_ENDPOINT;
use crate::error::ConfigError;

/// Maps a logical endpoint name to its suffix in the current cloud.
pub trait SuffixLookup {
    /// Suffix for `endpoint`, including its leading separator, if known.
    fn suffix_url(&self, endpoint: &str) -> Option<String>;
}

/// Known Azure clouds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AzureCloud {
    Public,
    UsGovernment,
    China,
    Germany,
}

impl AzureCloud {
    /// Canonical environment name, as accepted by `--environment`.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Public => "AzureCloud",
            Self::UsGovernment => "AzureUSGovernment",
            Self::China => "AzureChinaCloud",
            Self::Germany => "AzureGermanCloud",
        }
    }

    fn keyvault_dns(&self) -> &'static str {
        match self {
            Self::Public => ".vault.azure.net",
            Self::UsGovernment => ".vault.usgovcloudapi.net",
            Self::China => ".vault.azure.cn",
            Self::Germany => ".vault.microsoftazure.de",
        }
    }
}

impl FromStr for AzureCloud {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [Self::Public, Self::UsGovernment, Self::China, Self::Germany]
            .into_iter()
            .find(|cloud| cloud.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ConfigError::UnknownCloud(s.to_string()))
    }
}

impl SuffixLookup for AzureCloud {
    fn suffix_url(&self, endpoint: &str) -> Option<String> {
        (endpoint == KEYVAULT_DNS_ENDPOINT).then(|| self.keyvault_dns().to_string())
    }
}

impl std::fmt::Display for AzureCloud {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Drop the leading separator from a published suffix (`.vault.azure.net`).
pub fn strip_separator(suffix: &str) -> &str {
    suffix
        .strip_prefix(|c: char| !c.is_ascii_alphanumeric())
        .unwrap_or(suffix)
}

/// Reject URLs that would send the access token in clear text.
///
/// `http://` is only allowed for loopback hosts.
pub fn validate_url_scheme(url: &str) -> Result<(), ConfigError> {
    if url.starts_with("https://") {
        return Ok(());
    }
    if let Some(rest) = url.strip_prefix("http://") {
        let host = rest.split(['/', ':']).next().unwrap_or_default();
        if host == "localhost" || host == "127.0.0.1" {
            return Ok(());
        }
    }
    Err(ConfigError::InsecureUrl(url.to_string()))
}
