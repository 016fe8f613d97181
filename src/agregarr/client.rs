//! Agregarr v1 HTTP client
//!
//! Implements [`CollectionApi`] against `/api/v1`. The key is sent both as
//! `X-API-Key` and as `Authorization`; different Agregarr releases check
//! different headers.

use async_trait::async_trait;
use reqwest::Method;

use super::adapter;
use super::dto::CollectionsResponse;
use crate::sync::domain::{DownstreamCollection, NewCollection, SyncError};
use crate::sync::http::{self, HttpOptions};
use crate::sync::traits::CollectionApi;

/// Paths probed by [`AgregarrClient::probe`].
pub const PROBE_PATHS: [&str; 5] = ["health", "status", "ping", "version", "collections"];

/// Outcome of probing one endpoint.
#[derive(Debug, Clone)]
pub struct ProbeResult {
    pub path: &'static str,
    /// HTTP status, or the transport error
    pub status: Result<u16, String>,
    /// Short bodies are kept for display
    pub body: Option<String>,
}

/// Agregarr API client
pub struct AgregarrClient {
    http_client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl AgregarrClient {
    /// Create a new client for the Agregarr instance at `host`
    pub fn new(
        host: &str,
        api_key: impl Into<String>,
        options: HttpOptions,
    ) -> Result<Self, SyncError> {
        let api_key = api_key.into();
        if host.trim().is_empty() || api_key.is_empty() {
            return Err(SyncError::Config("Agregarr host and api_key are required".to_string()));
        }

        Ok(Self {
            http_client: http::build_client(options)?,
            base_url: format!("{}/api/v1", http::normalize_host(host)),
            api_key,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        self.http_client
            .request(method, self.url(path))
            .header("X-API-Key", &self.api_key)
            .header(reqwest::header::AUTHORIZATION, &self.api_key)
    }

    async fn send(&self, builder: reqwest::RequestBuilder) -> Result<reqwest::Response, SyncError> {
        let response = builder
            .send()
            .await
            .map_err(|e| SyncError::Network(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(http::api_error(status, &body))
    }

    /// Hit a handful of well-known endpoints and report what answers.
    ///
    /// Diagnostic only; never fails as a whole.
    pub async fn probe(&self) -> Vec<ProbeResult> {
        let mut results = Vec::with_capacity(PROBE_PATHS.len());

        for path in PROBE_PATHS {
            tracing::debug!(path, "Probing Agregarr endpoint");
            let result = match self.request(Method::GET, path).send().await {
                Ok(response) => {
                    let status = response.status().as_u16();
                    let body = response.text().await.unwrap_or_default();
                    ProbeResult {
                        path,
                        status: Ok(status),
                        body: (!body.is_empty() && body.len() < 200).then_some(body),
                    }
                }
                Err(e) => ProbeResult {
                    path,
                    status: Err(e.to_string()),
                    body: None,
                },
            };
            results.push(result);
        }

        results
    }
}

#[async_trait]
impl CollectionApi for AgregarrClient {
    async fn list_collections(&self) -> Result<Vec<DownstreamCollection>, SyncError> {
        tracing::debug!("Agregarr GET collections");
        let body = self
            .send(self.request(Method::GET, "collections"))
            .await?
            .text()
            .await
            .map_err(|e| SyncError::Network(e.to_string()))?;
        tracing::trace!(body = %http::truncate(&body, 1000), "Collections response");

        let response: CollectionsResponse =
            serde_json::from_str(&body).map_err(|e| SyncError::Parse(e.to_string()))?;
        Ok(response
            .collection_configs
            .into_iter()
            .map(adapter::to_downstream)
            .collect())
    }

    async fn create_collection(
        &self,
        collection: &NewCollection,
    ) -> Result<DownstreamCollection, SyncError> {
        let body = adapter::to_collection_config(collection);
        tracing::debug!(
            name = %collection.name,
            subtype = %collection.subtype,
            "Agregarr POST collections/create"
        );

        let text = self
            .send(self.request(Method::POST, "collections/create").json(&body))
            .await?
            .text()
            .await
            .unwrap_or_default();

        // The creation succeeded; an unreadable body only loses the new id.
        let created = serde_json::from_str::<CollectionsResponse>(&text)
            .ok()
            .and_then(|r| r.collection_configs.into_iter().next())
            .map(adapter::to_downstream)
            .unwrap_or_else(|| DownstreamCollection {
                id: "created".to_string(),
                name: collection.name.clone(),
                subtype: collection.subtype.clone(),
            });
        Ok(created)
    }

    async fn delete_collection(&self, id: &str) -> Result<(), SyncError> {
        tracing::debug!(id, "Agregarr DELETE collection");
        let path = format!("collections/{}", urlencoding::encode(id));
        self.send(self.request(Method::DELETE, &path)).await?;
        Ok(())
    }
}
