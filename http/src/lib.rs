//! # Api Slice Http
//!
//! `reqwest`-backed implementation of the
//! [`HttpClient`](api_slice_core::HttpClient) seam.
//!
//! One call issues exactly one request. No retries, no timeout beyond what
//! `reqwest` itself defaults to, no caching. Parameters from the slice
//! configuration travel as a query string for GET/DELETE and as a JSON body
//! for POST/PUT.

use api_slice_core::{ApiRequest, HttpClient, Method, RequestError};
use futures::future::BoxFuture;
use reqwest::Client;
use serde_json::Value;

/// HTTP transport backed by a shared [`reqwest::Client`]
///
/// Cloning is cheap; the underlying connection pool is shared.
///
/// # Example
///
/// ```ignore
/// use api_slice_core::ApiEnvironment;
/// use api_slice_http::ReqwestClient;
/// use std::sync::Arc;
///
/// let env = ApiEnvironment::new(Arc::new(ReqwestClient::new()));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ReqwestClient {
    client: Client,
}

impl ReqwestClient {
    /// Create a transport with a fresh `reqwest` client
    #[must_use]
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// Create a transport around an existing `reqwest` client
    ///
    /// Use this to share a connection pool or carry custom client
    /// configuration (proxies, default headers, timeouts).
    #[must_use]
    pub const fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl HttpClient for ReqwestClient {
    fn issue_request(&self, request: ApiRequest) -> BoxFuture<'static, Result<Value, RequestError>> {
        let client = self.client.clone();

        Box::pin(async move {
            tracing::debug!(url = %request.url, method = %request.method, "Issuing request");

            let mut builder = match request.method {
                Method::Get => client.get(&request.url),
                Method::Post => client.post(&request.url),
                Method::Put => client.put(&request.url),
                Method::Delete => client.delete(&request.url),
            };

            if let Some(params) = request.params {
                builder = match request.method {
                    Method::Get | Method::Delete => builder.query(&params),
                    Method::Post | Method::Put => builder.json(&params),
                };
            }

            let response = builder.send().await.map_err(|error| {
                tracing::warn!(url = %request.url, error = %error, "Request transport failed");
                RequestError::Transport(error.to_string())
            })?;

            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                tracing::warn!(
                    url = %request.url,
                    status = status.as_u16(),
                    "Request failed with non-success status"
                );
                return Err(RequestError::Status {
                    status: status.as_u16(),
                    body,
                });
            }

            response
                .json::<Value>()
                .await
                .map_err(|error| RequestError::Decode(error.to_string()))
        })
    }
}
