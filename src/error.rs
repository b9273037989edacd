//! Error types for kvsecrets.
//!
//! One enum per concern, all folded into [`Error`] so callers can use `?`
//! across module boundaries.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// A single violated input rule.
///
/// Validation collects every problem instead of stopping at the first one,
/// so a misconfigured step reports everything wrong with it in one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputProblem {
    /// `keyvault` was empty or missing.
    MissingVault,
    /// Both `secrets` and `secretsfile` were given.
    ConflictingSelection,
    /// Neither `secrets` nor `secretsfile` was given.
    MissingSelection,
}

impl fmt::Display for InputProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingVault => write!(f, "Vault name not provided."),
            Self::ConflictingSelection => write!(
                f,
                "Both secrets and secretsfile cannot be provided at the same time."
            ),
            Self::MissingSelection => {
                write!(f, "One of secrets or secretsfile should be provided.")
            }
        }
    }
}

/// Configuration and input errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{}", join_problems(.0))]
    InvalidInputs(Vec<InputProblem>),

    #[error("unknown cloud environment: {0}")]
    UnknownCloud(String),

    #[error("no suffix known for endpoint {0}")]
    UnknownEndpoint(String),

    #[error("access token not provided")]
    MissingToken,

    #[error("insecure vault URL: {0} (only https:// is allowed, http:// for localhost)")]
    InsecureUrl(String),

    #[error("timeout must be greater than zero")]
    InvalidTimeout,
}

fn join_problems(problems: &[InputProblem]) -> String {
    problems
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Errors while building the secret selection.
#[derive(Debug, Error)]
pub enum SelectionError {
    #[error("malformed secret entry '{entry}': expected exactly one '=' (name=alias)")]
    MalformedEntry { entry: String },

    #[error("malformed line {line} in {}: expected exactly one '=' (name=alias)", .path.display())]
    MalformedLine { path: PathBuf, line: usize },

    #[error("secret entry '{0}' has an empty name or alias")]
    EmptyField(String),

    #[error("alias {0:?} contains a control character or '<<'")]
    InvalidAlias(String),

    #[error("invalid secrets file pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("failed to read secrets file {}: {source}", .path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors talking to the vault. Error messages never contain secret values.
#[derive(Debug, Error)]
pub enum VaultError {
    #[error("network error communicating with the vault: {0}")]
    Network(#[source] reqwest::Error),

    #[error("vault authentication failed (check the access token)")]
    Unauthorized,

    #[error("access to the vault was denied: {0}")]
    Forbidden(String),

    #[error("secret not found: {0}")]
    NotFound(String),

    #[error("vault request throttled")]
    Throttled,

    #[error("vault server error: status {0}")]
    ServerError(u16),

    #[error("unexpected vault response: status {status}: {message}")]
    UnexpectedStatus { status: u16, message: String },

    #[error("failed to decode vault response: {0}")]
    Decode(String),

    #[error("invalid vault URL: {0}")]
    InvalidUrl(String),

    #[error("refusing to follow pagination link outside the vault: {0}")]
    ForeignLink(String),
}

/// Errors writing to the runner's environment and output files.
#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("failed to write runner file {}: {source}", .path.display())]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{kind} '{name}' contains the file command delimiter")]
    Delimiter { kind: &'static str, name: String },
}

/// Errors from the download orchestrator.
#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("get secrets failed: {0}")]
    List(#[source] VaultError),

    #[error("downloading selected secrets failed")]
    Selected(#[source] RunnerError),

    #[error("downloading all secrets failed")]
    All(#[source] RunnerError),

    #[error("{failed} of {total} secrets could not be downloaded")]
    Incomplete { failed: usize, total: usize },
}

/// Top-level error type.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Selection(#[from] SelectionError),

    #[error(transparent)]
    Vault(#[from] VaultError),

    #[error(transparent)]
    Download(#[from] DownloadError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Messages to surface as runner failure annotations, one per entry.
    pub fn annotations(&self) -> Vec<String> {
        match self {
            Self::Config(ConfigError::InvalidInputs(problems)) => {
                problems.iter().map(ToString::to_string).collect()
            }
            other => vec![other.to_string()],
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
