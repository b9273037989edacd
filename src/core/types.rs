//! Type aliases for domain concepts.
//!
//! Provides semantic type aliases to make function signatures more descriptive.

/// Name of a secret as stored in the vault (e.g., `db-password`).
pub type SecretName = String;

/// Name under which a fetched value is published to the pipeline.
///
/// Used both as the environment variable name and the step output name.
pub type Alias = String;

/// Secret value fetched from the vault. Wiped from memory on drop.
pub type SecretValue = zeroize::Zeroizing<String>;
