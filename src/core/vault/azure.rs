//! Azure Key Vault REST backend.
//!
//! Talks to the data-plane API directly:
//!
//! - `GET {vault}/secrets?api-version=7.4` lists secrets, paged via `nextLink`
//! - `GET {vault}/secrets/{name}?api-version=7.4` returns the current value
//!
//! Token acquisition is left to the caller; the client only sends the bearer
//! token it was given. Vault error bodies are reduced to their `message`
//! field, which never contains secret material.

use std::time::Duration;

use async_trait::async_trait;
use chrono::DateTime;
use reqwest::Url;
use serde::Deserialize;
use tracing::{debug, trace};

use super::SecretClient;
use crate::core::constants::KEYVAULT_API_VERSION;
use crate::core::domain::SecretMetadata;
use crate::core::types::SecretValue;
use crate::error::VaultError;

/// One page of `GET /secrets`.
#[derive(Debug, Deserialize)]
struct SecretListPage {
    #[serde(default)]
    value: Vec<SecretItem>,
    #[serde(rename = "nextLink")]
    next_link: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SecretItem {
    id: String,
    #[serde(default)]
    attributes: SecretAttributes,
    #[serde(rename = "contentType")]
    content_type: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct SecretAttributes {
    #[serde(default)]
    enabled: bool,
    /// Expiry as unix seconds.
    exp: Option<i64>,
}

impl SecretItem {
    fn into_metadata(self) -> Option<SecretMetadata> {
        let name = self.id.trim_end_matches('/').rsplit('/').next()?;
        if name.is_empty() {
            return None;
        }
        Some(SecretMetadata {
            name: name.to_string(),
            enabled: self.attributes.enabled,
            expires: self
                .attributes
                .exp
                .and_then(|secs| DateTime::from_timestamp(secs, 0)),
            content_type: self.content_type,
        })
    }
}

/// Response of `GET /secrets/{name}`.
#[derive(Deserialize)]
struct SecretBundle {
    value: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    message: String,
}

/// Key Vault REST client for a single vault.
#[derive(Clone)]
pub struct KeyVaultClient {
    http: reqwest::Client,
    base_url: Url,
    token: SecretValue,
}

impl std::fmt::Debug for KeyVaultClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyVaultClient")
            .field("base_url", &self.base_url.as_str())
            .field("token", &"<redacted>")
            .finish()
    }
}

impl KeyVaultClient {
    fn user_agent() -> String {
        format!("kvsecrets/{}", env!("CARGO_PKG_VERSION"))
    }

    /// Create a client for the vault at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns `VaultError::InvalidUrl` if `base_url` is not an absolute
    /// URL, or `VaultError::Network` if the HTTP client cannot be built.
    pub fn new(base_url: &str, token: SecretValue, timeout: Duration) -> Result<Self, VaultError> {
        let base_url = Url::parse(base_url)
            .ok()
            .filter(|url| !url.cannot_be_a_base())
            .ok_or_else(|| VaultError::InvalidUrl(base_url.to_string()))?;

        let http = reqwest::Client::builder()
            .user_agent(Self::user_agent())
            .timeout(timeout)
            .build()
            .map_err(VaultError::Network)?;

        Ok(Self {
            http,
            base_url,
            token,
        })
    }

    /// `{vault}/{segments...}?api-version=...`, each segment percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, VaultError> {
        let mut url = self.base_url.clone();
        url.set_query(None);
        url.set_fragment(None);
        url.path_segments_mut()
            .map_err(|()| VaultError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        url.query_pairs_mut()
            .append_pair("api-version", KEYVAULT_API_VERSION);
        Ok(url)
    }

    /// A pagination link is only followed on the vault's own origin.
    fn same_origin(&self, link: &str) -> Option<Url> {
        let url = Url::parse(link).ok()?;
        (url.origin() == self.base_url.origin()
            && url.username().is_empty()
            && url.password().is_none())
        .then_some(url)
    }

    async fn send(&self, url: Url, subject: &str) -> Result<reqwest::Response, VaultError> {
        trace!(url = %url, "vault request");

        let resp = self
            .http
            .get(url)
            .bearer_auth(self.token.as_str())
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(VaultError::Network)?;

        let status = resp.status().as_u16();
        trace!(status, "vault response");

        match status {
            200 => Ok(resp),
            401 => Err(VaultError::Unauthorized),
            403 => Err(VaultError::Forbidden(error_message(resp).await)),
            404 => Err(VaultError::NotFound(subject.to_string())),
            429 => Err(VaultError::Throttled),
            500..=599 => Err(VaultError::ServerError(status)),
            _ => Err(VaultError::UnexpectedStatus {
                status,
                message: error_message(resp).await,
            }),
        }
    }
}

async fn error_message(resp: reqwest::Response) -> String {
    resp.json::<ErrorBody>()
        .await
        .map(|body| body.error.message)
        .unwrap_or_default()
}

#[async_trait]
impl SecretClient for KeyVaultClient {
    async fn list(&self, prefix: &str) -> Result<Vec<SecretMetadata>, VaultError> {
        let mut url = self.endpoint(&["secrets"])?;
        let mut secrets = Vec::new();
        let mut pages = 0usize;

        loop {
            let page: SecretListPage = self
                .send(url, "secrets")
                .await?
                .json()
                .await
                .map_err(|e| VaultError::Decode(e.to_string()))?;
            pages += 1;

            secrets.extend(
                page.value
                    .into_iter()
                    .filter_map(SecretItem::into_metadata)
                    .filter(|s| s.name.starts_with(prefix)),
            );

            match page.next_link.filter(|link| !link.is_empty()) {
                Some(link) => {
                    url = self
                        .same_origin(&link)
                        .ok_or(VaultError::ForeignLink(link))?;
                }
                None => break,
            }
        }

        debug!(secrets = secrets.len(), pages, "listed vault secrets");
        Ok(secrets)
    }

    async fn get_value(&self, name: &str) -> Result<Option<SecretValue>, VaultError> {
        let url = self.endpoint(&["secrets", name])?;

        let bundle: SecretBundle = self
            .send(url, name)
            .await?
            .json()
            .await
            .map_err(|e| VaultError::Decode(e.to_string()))?;

        trace!(secret = %name, has_value = bundle.value.is_some(), "fetched secret");
        Ok(bundle.value.map(SecretValue::new))
    }
}
