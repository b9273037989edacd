//! Secret download orchestration.
//!
//! Fetches the selected secrets concurrently and publishes each value
//! through the runner as a masked variable and step output. A failing fetch
//! is reported and recorded but never cancels its siblings; the batch only
//! finishes once every fetch has settled.

use chrono::{DateTime, Utc};
use futures::future::join_all;
use tracing::{debug, warn};

use crate::core::domain::filter_active;
use crate::core::runner::Runner;
use crate::core::selection::{SecretMap, Selection};
use crate::core::types::SecretName;
use crate::core::vault::SecretClient;
use crate::error::{DownloadError, RunnerError};

/// Result of a download batch.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DownloadReport {
    /// Number of secrets fetched.
    pub requested: usize,
    /// Secrets published to the runner.
    pub published: usize,
    /// Secrets skipped because their value was empty.
    pub empty: usize,
    /// Names of secrets whose fetch failed.
    pub failed: Vec<SecretName>,
}

impl DownloadReport {
    /// Turn per-secret failures into an error once the batch has settled.
    ///
    /// # Errors
    ///
    /// `DownloadError::Incomplete` if any fetch failed.
    pub fn into_result(self) -> Result<Self, DownloadError> {
        if self.failed.is_empty() {
            Ok(self)
        } else {
            Err(DownloadError::Incomplete {
                failed: self.failed.len(),
                total: self.requested,
            })
        }
    }
}

enum Outcome {
    Published,
    Empty,
    Failed(SecretName),
}

/// Downloads secrets from one vault into one runner.
pub struct Downloader<'a, C: ?Sized, R: ?Sized> {
    client: &'a C,
    runner: &'a R,
    vault_name: &'a str,
}

impl<'a, C, R> Downloader<'a, C, R>
where
    C: SecretClient + ?Sized,
    R: Runner + ?Sized,
{
    pub fn new(client: &'a C, runner: &'a R, vault_name: &'a str) -> Self {
        Self {
            client,
            runner,
            vault_name,
        }
    }

    /// Download everything `selection` asks for.
    ///
    /// # Errors
    ///
    /// Returns `DownloadError::List` if listing the vault fails, or
    /// `DownloadError::Selected` / `DownloadError::All` if the runner cannot
    /// be written. Per-secret fetch failures are in the report instead.
    pub async fn download(&self, selection: &Selection) -> Result<DownloadReport, DownloadError> {
        match selection {
            Selection::All => self.download_all(Utc::now()).await,
            Selection::Named(secrets) => self.download_selected(secrets).await,
        }
    }

    /// Download every secret that is enabled and unexpired at `now`,
    /// publishing each under its own name.
    pub async fn download_all(&self, now: DateTime<Utc>) -> Result<DownloadReport, DownloadError> {
        let secrets = self.client.list("").await.map_err(|e| {
            self.runner.debug(&format!("Get Secrets Failed \n{}", e));
            DownloadError::List(e)
        })?;

        if secrets.is_empty() {
            self.runner
                .debug(&format!("No secrets found in the vault {}", self.vault_name));
            return Ok(DownloadReport::default());
        }

        self.runner.info(&format!(
            "Number of secrets found in keyvault {}: {}",
            self.vault_name,
            secrets.len()
        ));
        let active = filter_active(secrets, now);
        self.runner.info(&format!(
            "Number of enabled secrets found in keyvault {}: {}",
            self.vault_name,
            active.len()
        ));

        self.fan_out(active.iter().map(|s| (s.name.as_str(), s.name.as_str())))
            .await
            .map_err(DownloadError::All)
    }

    /// Download the secrets of an alias → name mapping.
    pub async fn download_selected(
        &self,
        secrets: &SecretMap,
    ) -> Result<DownloadReport, DownloadError> {
        self.fan_out(
            secrets
                .iter()
                .map(|(alias, name)| (alias.as_str(), name.as_str())),
        )
        .await
        .map_err(DownloadError::Selected)
    }

    async fn fan_out<'s>(
        &self,
        pairs: impl Iterator<Item = (&'s str, &'s str)>,
    ) -> Result<DownloadReport, RunnerError> {
        let outcomes = join_all(pairs.map(|(alias, name)| self.download_one(alias, name))).await;

        let mut report = DownloadReport {
            requested: outcomes.len(),
            ..DownloadReport::default()
        };
        let mut first_error = None;

        for outcome in outcomes {
            match outcome {
                Ok(Outcome::Published) => report.published += 1,
                Ok(Outcome::Empty) => report.empty += 1,
                Ok(Outcome::Failed(name)) => report.failed.push(name),
                Err(e) => {
                    first_error.get_or_insert(e);
                }
            }
        }

        debug!(
            requested = report.requested,
            published = report.published,
            empty = report.empty,
            failed = report.failed.len(),
            "download batch settled"
        );

        match first_error {
            Some(e) => Err(e),
            None => Ok(report),
        }
    }

    async fn download_one(&self, alias: &str, name: &str) -> Result<Outcome, RunnerError> {
        let value = match self.client.get_value(name).await {
            Ok(value) => value,
            Err(e) => {
                warn!(secret = %name, error = %e, "secret download failed");
                self.runner
                    .fail(&format!("Could not download the secret {}: {}", name, e));
                return Ok(Outcome::Failed(name.to_string()));
            }
        };

        match value.filter(|v| !v.is_empty()) {
            Some(value) => {
                self.publish(alias, &value)?;
                debug!(secret = %name, alias = %alias, "secret published");
                Ok(Outcome::Published)
            }
            None => {
                debug!(secret = %name, "secret has no value, skipped");
                Ok(Outcome::Empty)
            }
        }
    }

    fn publish(&self, alias: &str, value: &str) -> Result<(), RunnerError> {
        self.runner.mask(value)?;
        self.runner.export_variable(alias, value)?;
        self.runner.set_output(alias, value)
    }
}
