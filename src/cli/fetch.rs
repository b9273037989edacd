//! Fetch command.
//!
//! Resolves the step inputs, builds the secret selection, and downloads the
//! secrets into the runner on a single-threaded runtime.

use std::time::Duration;

use tracing::debug;

use crate::cli::output;
use crate::cli::FetchArgs;
use crate::core::cloud::AzureCloud;
use crate::core::download::Downloader;
use crate::core::params::ActionParameters;
use crate::core::runner::Runner;
use crate::core::selection::Selection;
use crate::core::types::SecretValue;
use crate::core::vault::KeyVaultClient;
use crate::error::{ConfigError, Result};

/// Download the configured secrets and publish them through `runner`.
///
/// # Errors
///
/// Configuration and selection errors are returned before any request is
/// made. Per-secret failures are reported through `runner` as they happen
/// and surface afterwards as `DownloadError::Incomplete`.
pub fn execute(args: &FetchArgs, runner: &dyn Runner) -> Result<()> {
    let cloud: AzureCloud = args.environment.parse()?;
    let mut params = ActionParameters::resolve(&args.inputs(), &cloud)?;
    if let Some(url) = args.vault_url.as_deref().filter(|u| !u.trim().is_empty()) {
        params = params.with_vault_url(url.trim())?;
    }

    if args.timeout == 0 {
        return Err(ConfigError::InvalidTimeout.into());
    }
    let token = args.access_token.trim();
    if token.is_empty() {
        return Err(ConfigError::MissingToken.into());
    }

    let selection = Selection::from_source(&params.source)?;
    debug!(
        cloud = %cloud,
        vault = %params.vault.name(),
        all = matches!(selection, Selection::All),
        "starting download"
    );

    let client = KeyVaultClient::new(
        params.vault.url(),
        SecretValue::new(token.to_string()),
        Duration::from_secs(args.timeout),
    )?;

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let downloader = Downloader::new(&client, runner, params.vault.name());
    let report = rt.block_on(downloader.download(&selection))?.into_result()?;

    if report.published > 0 {
        output::success(&format!(
            "published {} from {}",
            output::secrets(report.published),
            output::name(params.vault.name())
        ));
    } else {
        output::warn(&format!(
            "no secrets published from {}",
            output::name(params.vault.name())
        ));
    }
    if report.empty > 0 {
        output::warn(&format!(
            "skipped {} with empty values",
            output::secrets(report.empty)
        ));
    }

    Ok(())
}
