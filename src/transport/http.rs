//! [`NetworkClient`] backed by reqwest

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};

use super::{NetworkClient, RequestParams, TransportError};

/// reqwest-based JSON client with a per-request timeout
#[derive(Debug, Clone)]
pub struct ReqwestNetworkClient {
    client: reqwest::Client,
    request_timeout: Duration,
}

impl ReqwestNetworkClient {
    pub fn new(request_timeout: Duration) -> Self {
        Self::with_client(reqwest::Client::new(), request_timeout)
    }

    /// Reuse an existing reqwest client (connection pool, proxies, TLS setup)
    pub fn with_client(client: reqwest::Client, request_timeout: Duration) -> Self {
        Self {
            client,
            request_timeout,
        }
    }

    fn prepare(
        &self,
        request: reqwest::RequestBuilder,
        params: &RequestParams,
    ) -> reqwest::RequestBuilder {
        let mut request = request.timeout(self.request_timeout).query(&params.query);
        for (name, value) in &params.headers {
            request = request.header(name.as_str(), value.as_str());
        }
        request
    }

    async fn read_json(url: &str, response: reqwest::Response) -> Result<Value, TransportError> {
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| TransportError::transport(e.to_string()))?;
        let body = serde_json::from_str::<Value>(&text).ok();

        if !status.is_success() {
            warn!(url, status = status.as_u16(), "Aggregator request failed");
            return Err(TransportError::status(status.as_u16(), body));
        }

        debug!(url, status = status.as_u16(), "Aggregator request succeeded");
        body.ok_or_else(|| {
            TransportError::transport(format!("Response from {url} is not valid JSON"))
        })
    }
}

#[async_trait]
impl NetworkClient for ReqwestNetworkClient {
    async fn get(&self, url: &str, params: &RequestParams) -> Result<Value, TransportError> {
        let response = self
            .prepare(self.client.get(url), params)
            .send()
            .await
            .map_err(|e| TransportError::transport(e.to_string()))?;
        Self::read_json(url, response).await
    }

    async fn post(
        &self,
        url: &str,
        params: &RequestParams,
        body: &Value,
    ) -> Result<Value, TransportError> {
        let response = self
            .prepare(self.client.post(url), params)
            .json(body)
            .send()
            .await
            .map_err(|e| TransportError::transport(e.to_string()))?;
        Self::read_json(url, response).await
    }
}
