//! Shared HTTP plumbing for the remote service clients.

use crate::http_error::{RequestTarget, map_http_error, map_transport_error};
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;
use taskdeck_core::config::ClientConfig;
use taskdeck_core::error::{Result, TaskdeckError};

/// A reqwest client bound to the service's base URL.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

impl ApiClient {
    /// Builds a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns `TaskdeckError::Config` if the base URL cannot be parsed or
    /// cannot carry path segments.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let base_url = Url::parse(config.base_url.trim_end_matches('/')).map_err(|e| {
            TaskdeckError::config(format!("invalid base_url '{}': {e}", config.base_url))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(TaskdeckError::config(format!(
                "base_url '{}' cannot carry endpoint paths",
                config.base_url
            )));
        }

        let mut builder = Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| TaskdeckError::config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client, base_url })
    }

    /// Appends `segments` to the base URL, percent-encoding each one.
    pub fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Sends `request` and decodes a JSON body on success.
    pub async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        action: &str,
        target: &RequestTarget,
    ) -> Result<T> {
        let response = self.send(request, action, target).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| map_transport_error(&e, action))
    }

    /// Sends `request` and discards the body on success.
    pub async fn send_empty(
        &self,
        request: RequestBuilder,
        action: &str,
        target: &RequestTarget,
    ) -> Result<()> {
        self.send(request, action, target).await.map(|_| ())
    }

    async fn send(
        &self,
        request: RequestBuilder,
        action: &str,
        target: &RequestTarget,
    ) -> Result<Response> {
        let response = request.send().await.map_err(|e| {
            tracing::warn!("[ApiClient] {} failed in transport: {}", action, e);
            map_transport_error(&e, action)
        })?;

        let status = response.status();
        tracing::debug!("[ApiClient] {} -> {}", action, status);
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(map_http_error(status, &body, target))
    }
}
