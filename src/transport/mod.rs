// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! HTTP transport for swap aggregator APIs.
//!
//! Quote providers talk to their services only through the [`NetworkClient`]
//! trait, so tests can substitute canned responses and production code uses
//! [`ReqwestNetworkClient`].
//!
//! Read-only price queries may opt into a [`ResponseCache`], keyed by the URL
//! and its sorted query parameters. Instruction-building queries never do.
//!
//! ```rust,ignore
//! use relayswap::transport::{NetworkClient, RequestParams, ReqwestNetworkClient, ResponseCache};
//! use std::time::Duration;
//!
//! let client = ReqwestNetworkClient::new(Duration::from_secs(30));
//! let cache = ResponseCache::new(Duration::from_secs(5), 100);
//! let params = RequestParams::new().query("sellToken", "0xeeee...");
//! let price = cache.get_or_fetch(&client, "https://api.0x.org/swap/v1/price", &params).await?;
//! ```

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::describe_failure;

mod cached;
mod http;

pub use cached::ResponseCache;
pub use http::ReqwestNetworkClient;

/// Query string and headers of one request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestParams {
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
}

impl RequestParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a query parameter
    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Append a query parameter when `value` is present
    pub fn query_opt(self, key: impl Into<String>, value: Option<impl ToString>) -> Self {
        match value {
            Some(value) => self.query(key, value),
            None => self,
        }
    }

    /// Append a request header
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Query parameters sorted by key, for cache keys
    pub fn normalized_query(&self) -> String {
        let mut pairs: Vec<_> = self.query.iter().collect();
        pairs.sort();
        pairs
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// A failed HTTP exchange
///
/// Keeps the decoded response body so providers can recognise their own
/// error payloads (for example "insufficient liquidity").
#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct TransportError {
    /// HTTP status, when a response arrived
    pub status: Option<u16>,
    /// JSON body of the error response, when it parsed
    pub body: Option<Value>,
    /// Transport-level description
    pub message: String,
}

impl TransportError {
    /// A failure before any response was received
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            status: None,
            body: None,
            message: message.into(),
        }
    }

    /// A non-success response
    pub fn status(status: u16, body: Option<Value>) -> Self {
        Self {
            status: Some(status),
            body,
            message: format!("Request failed with status code {status}"),
        }
    }

    /// One readable line, preferring the server's own reason
    pub fn describe(&self) -> String {
        describe_failure(self.body.as_ref(), Some(&self.message))
    }
}

/// JSON over HTTP
#[async_trait]
pub trait NetworkClient: Send + Sync {
    /// `GET url?query`, returning the decoded JSON body
    async fn get(&self, url: &str, params: &RequestParams) -> Result<Value, TransportError>;

    /// `POST url?query` with a JSON body, returning the decoded JSON body
    async fn post(
        &self,
        url: &str,
        params: &RequestParams,
        body: &Value,
    ) -> Result<Value, TransportError>;
}

/// Join a base URL and a path with exactly one slash
pub(crate) fn endpoint(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalized_query_is_order_independent() {
        let a = RequestParams::new().query("b", 2).query("a", 1);
        let b = RequestParams::new().query("a", 1).query("b", 2);
        assert_eq!(a.normalized_query(), b.normalized_query());
        assert_eq!(a.normalized_query(), "a=1&b=2");
    }

    #[test]
    fn test_query_opt_skips_none() {
        let params = RequestParams::new().query_opt("receiver", None::<String>);
        assert!(params.query.is_empty());
    }

    #[test]
    fn test_endpoint_joins_with_single_slash() {
        assert_eq!(
            endpoint("https://api.0x.org/", "/swap/v1/price"),
            "https://api.0x.org/swap/v1/price"
        );
        assert_eq!(
            endpoint("https://apiv5.paraswap.io", "prices"),
            "https://apiv5.paraswap.io/prices"
        );
    }

    #[test]
    fn test_describe_prefers_server_reason() {
        let err = TransportError::status(400, Some(json!({ "error": "Bad pair" })));
        assert_eq!(err.describe(), "Error: Bad pair");

        let err = TransportError::status(502, None);
        assert_eq!(err.describe(), "Request failed with status code 502");
    }
}
