//! kvsecrets - Pull Azure Key Vault secrets into a CI step.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── fetch         # Resolve inputs and download secrets
//! │   ├── completions   # Shell completions
//! │   └── output        # Terminal summary helpers
//! └── core/             # Core library components
//!     ├── params        # Step input validation, vault URL
//!     ├── cloud         # Cloud suffix lookup
//!     ├── selection     # name=alias filters and files
//!     ├── domain/       # Secret metadata, active filter
//!     ├── vault/        # SecretClient trait, Key Vault REST client
//!     ├── runner/       # Runner trait, GitHub Actions protocol
//!     └── download      # Concurrent fetch-and-publish
//! ```
//!
//! # Flow
//!
//! 1. `keyvault`, `secrets` and `secretsfile` are validated together and
//!    the vault URL is derived from the cloud's `keyvaultDns` suffix.
//! 2. The selection is either `*` (every enabled, unexpired secret) or an
//!    alias → name map from the inline filter or the matched files.
//! 3. All fetches run concurrently on one thread; each value is masked,
//!    exported as an environment variable and set as a step output under
//!    its alias. A failed fetch is reported without stopping the others.

pub mod cli;
pub mod core;
pub mod error;
