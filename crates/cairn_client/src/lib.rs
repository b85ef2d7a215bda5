//! # Cairn Client
//!
//! HTTP access to the asset index (`GET {base}/files{version}?manifest=true`)
//! and the manifest gateway (`GET {base}/file{version}/{cid}`).
//!
//! [`CairnClient`] implements [`AssetIndex`], translating HTTP failures into the
//! [`IndexError`] / [`ManifestError`] taxonomy.
//!
//! ## Usage
//!
//! ```no_run
//! use cairn_client::{CairnClient, ClientConfig};
//!
//! let client = CairnClient::new(ClientConfig {
//!     base_url: "https://api.example.com".into(),
//!     api_version: "/v1".into(),
//! });
//! ```

use cairn_core::prelude::*;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum CairnClientError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Server returned error {0}: {1}")]
    ServerError(StatusCode, String),

    #[error("Validation error: {0}")]
    Validation(String),
}

pub type Result<T> = std::result::Result<T, CairnClientError>;

/// Endpoint configuration.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// The base URL.
    ///
    /// Defaults to `http://localhost:3000`.
    pub base_url: String,
    /// Version suffix appended to the endpoint names, e.g. `/v1` gives `/files/v1`.
    ///
    /// Defaults to an empty string.
    pub api_version: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            api_version: String::new(),
        }
    }
}

/// Error body returned by the index service.
#[derive(Deserialize, Default)]
struct ErrorPayload {
    #[serde(rename = "statusCode")]
    status_code: Option<u16>,
    message: Option<serde_json::Value>,
}

impl ErrorPayload {
    fn parse(body: &str) -> Self {
        serde_json::from_str(body).unwrap_or_default()
    }

    fn message(&self) -> Option<String> {
        match self.message.as_ref()? {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Null => None,
            other => Some(other.to_string()),
        }
    }
}

impl From<CairnClientError> for IndexError {
    fn from(err: CairnClientError) -> Self {
        match err {
            CairnClientError::ServerError(status, body) => {
                let payload = ErrorPayload::parse(&body);
                let forbidden = status == StatusCode::FORBIDDEN
                    || payload.status_code == Some(StatusCode::FORBIDDEN.as_u16());
                if forbidden {
                    return IndexError::AuthExpired;
                }
                let message = payload.message().unwrap_or_else(|| {
                    format!("Request failed with status code {}", status.as_u16())
                });
                IndexError::unavailable(message)
            }
            other => IndexError::unavailable(other.to_string()),
        }
    }
}

#[derive(Clone)]
pub struct CairnClient {
    config: ClientConfig,
    client: Client,
}

impl CairnClient {
    pub fn new(config: ClientConfig) -> Self {
        Self::with_client(config, Client::new())
    }

    /// Uses a preconfigured [`reqwest::Client`] (timeouts, proxies, ...).
    pub fn with_client(config: ClientConfig, client: Client) -> Self {
        Self { config, client }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn base_url(&self) -> &str {
        self.config.base_url.trim_end_matches('/')
    }

    fn files_url(&self) -> String {
        format!("{}/files{}", self.base_url(), self.config.api_version)
    }

    fn file_url(&self, content_id: &str) -> String {
        format!("{}/file{}/{content_id}", self.base_url(), self.config.api_version)
    }

    fn auth_request(
        &self,
        builder: reqwest::RequestBuilder,
        credential: &Credential,
    ) -> reqwest::RequestBuilder {
        builder.header("Authorization", credential.bearer())
    }

    /// Lists the asset references of the credential's identity, manifests included.
    pub async fn list_assets(&self, credential: &Credential) -> Result<Vec<AssetReference>> {
        let url = self.files_url();
        let response = self
            .auth_request(self.client.get(&url), credential)
            .query(&[("manifest", "true")])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(CairnClientError::ServerError(status, text));
        }

        let references: Vec<AssetReference> = response
            .json()
            .await
            .map_err(|e| CairnClientError::Validation(format!("Failed to parse asset list: {e}")))?;

        debug!("Fetched {} asset references", references.len());
        Ok(references)
    }

    /// Downloads the raw manifest stored under `content_id`.
    pub async fn download_manifest(
        &self,
        credential: &Credential,
        content_id: &str,
    ) -> Result<serde_json::Value> {
        let url = self.file_url(content_id);
        let response = self
            .auth_request(self.client.get(&url), credential)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(CairnClientError::ServerError(status, text));
        }

        let manifest = response
            .json()
            .await
            .map_err(|e| CairnClientError::Validation(format!("Failed to parse manifest: {e}")))?;

        Ok(manifest)
    }
}

impl AssetIndex for CairnClient {
    async fn list_references(
        &self,
        credential: &Credential,
    ) -> std::result::Result<Vec<AssetReference>, IndexError> {
        self.list_assets(credential).await.map_err(|e| {
            warn!("Asset listing failed: {e}");
            IndexError::from(e)
        })
    }

    async fn fetch_manifest(
        &self,
        credential: &Credential,
        content_id: &str,
    ) -> std::result::Result<serde_json::Value, ManifestError> {
        self.download_manifest(credential, content_id)
            .await
            .map_err(|e| ManifestError::new(content_id, e.to_string()))
    }
}
