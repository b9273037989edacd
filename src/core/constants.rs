//! Constants used throughout kvsecrets.
//!
//! Centralizes magic strings and protocol values.

/// Key Vault REST API version.
pub const KEYVAULT_API_VERSION: &str = "7.4";

/// Logical endpoint name for the Key Vault DNS suffix.
pub const KEYVAULT_DNS_ENDPOINT: &str = "keyvaultDns";

/// Cloud used when no environment input is given.
pub const DEFAULT_CLOUD: &str = "AzureCloud";

/// Default transport timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 100;

/// Inline filter that selects every enabled secret.
pub const ALL_SECRETS: &str = "*";

/// Separator between entries of an inline filter.
pub const FILTER_SEPARATOR: char = ',';

/// Separator between a secret name and its alias.
pub const ALIAS_SEPARATOR: char = '=';

/// Runner file holding environment variables for later steps.
pub const GITHUB_ENV: &str = "GITHUB_ENV";

/// Runner file holding step outputs.
pub const GITHUB_OUTPUT: &str = "GITHUB_OUTPUT";

/// Prefix of the heredoc delimiter used in runner files.
pub const DELIMITER_PREFIX: &str = "ghadelimiter_";

/// Environment variable controlling the log filter.
pub const LOG_ENV: &str = "KVSECRETS_LOG";
