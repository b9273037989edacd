//! Command-line interface.

pub mod completions;
pub mod fetch;
pub mod output;

use clap::{Args, Parser, Subcommand};

use crate::core::constants::{DEFAULT_CLOUD, DEFAULT_TIMEOUT_SECS};
use crate::core::params::Inputs;
use crate::core::runner::Runner;

/// kvsecrets - Pull Azure Key Vault secrets into a CI step.
#[derive(Parser)]
#[command(
    name = "kvsecrets",
    about = "Pull Azure Key Vault secrets into masked CI variables and step outputs",
    version
)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Download secrets and publish them to the runner
    Fetch(FetchArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Step inputs for `fetch`.
///
/// Each flag falls back to the `INPUT_*` variable the runner sets for
/// action inputs.
#[derive(Args, Debug, Clone)]
pub struct FetchArgs {
    /// Name of the key vault
    #[arg(long, env = "INPUT_KEYVAULT", default_value = "")]
    pub keyvault: String,

    /// Secrets to fetch as name=alias pairs separated by commas, or '*' for all
    #[arg(long, env = "INPUT_SECRETS", default_value = "")]
    pub secrets: String,

    /// Glob pattern of files holding one name=alias pair per line
    #[arg(long = "secretsfile", env = "INPUT_SECRETSFILE", default_value = "")]
    pub secrets_file: String,

    /// Cloud environment (AzureCloud, AzureUSGovernment, AzureChinaCloud, AzureGermanCloud)
    #[arg(long, env = "INPUT_ENVIRONMENT", default_value = DEFAULT_CLOUD)]
    pub environment: String,

    /// Bearer token for the vault
    #[arg(long, env = "KEYVAULT_ACCESS_TOKEN", hide_env_values = true, default_value = "")]
    pub access_token: String,

    /// Request timeout in seconds
    #[arg(long, env = "INPUT_TIMEOUT", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Use this vault URL instead of deriving it from the cloud
    #[arg(long, env = "KVSECRETS_VAULT_URL")]
    pub vault_url: Option<String>,
}

impl FetchArgs {
    /// Raw inputs for parameter resolution.
    pub fn inputs(&self) -> Inputs {
        Inputs {
            keyvault: self.keyvault.clone(),
            secrets: self.secrets.clone(),
            secrets_file: self.secrets_file.clone(),
        }
    }
}

/// Supported shells for completions.
#[derive(clap::ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

/// Execute a command, publishing through `runner`.
pub fn execute(command: Command, runner: &dyn Runner) -> crate::error::Result<()> {
    match command {
        Command::Fetch(args) => fetch::execute(&args, runner),
        Command::Completions { shell } => completions::execute(shell),
    }
}
