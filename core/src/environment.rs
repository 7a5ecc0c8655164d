//! Dependency injection seams
//!
//! All external dependencies are abstracted behind traits and injected via the
//! Environment parameter of a reducer. The only dependency an API slice needs
//! is an HTTP transport, expressed here as the narrow [`HttpClient`] trait so
//! any transport can be substituted without touching transition logic.

use crate::error::RequestError;
use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;

/// HTTP method for an endpoint-bound slice
///
/// The enumerated set is fixed; anything beyond it is out of scope for the
/// slice factory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Method {
    /// HTTP GET
    Get,
    /// HTTP POST
    Post,
    /// HTTP PUT
    Put,
    /// HTTP DELETE
    Delete,
}

impl Method {
    /// The canonical wire name of the method
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single outbound request, carried verbatim from the slice configuration
///
/// How `params` travel (query string vs. body) is the transport's own
/// convention; the slice passes them through untouched.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    /// Target URL; not validated by the slice
    pub url: String,
    /// HTTP method
    pub method: Method,
    /// Optional query/body parameters
    pub params: Option<Map<String, Value>>,
}

/// HttpClient trait - abstracts the HTTP transport for testability
///
/// Implementations issue exactly one request per call and surface every
/// failure as a [`RequestError`]. No retries, no caching, no deduplication.
///
/// # Examples
///
/// ```ignore
/// // Production - reqwest-backed (api-slice-http)
/// let env = ApiEnvironment::new(Arc::new(ReqwestClient::new()));
///
/// // Test - scripted responses (api-slice-testing)
/// let env = ApiEnvironment::new(Arc::new(MockHttpClient::new()));
/// ```
pub trait HttpClient: Send + Sync {
    /// Issue one HTTP request and resolve to the decoded JSON body
    ///
    /// # Errors
    ///
    /// Resolves to a [`RequestError`] on transport failure, non-success
    /// status, or an undecodable body.
    fn issue_request(&self, request: ApiRequest) -> BoxFuture<'static, Result<Value, RequestError>>;
}

/// Environment for API slice reducers
///
/// Holds the injected HTTP transport. Cloning is cheap; the transport is
/// shared behind an `Arc`.
#[derive(Clone)]
pub struct ApiEnvironment {
    /// The HTTP transport used by fetch effects
    pub http: Arc<dyn HttpClient>,
}

impl ApiEnvironment {
    /// Create an environment around the given transport
    #[must_use]
    pub fn new(http: Arc<dyn HttpClient>) -> Self {
        Self { http }
    }
}

impl std::fmt::Debug for ApiEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiEnvironment").finish_non_exhaustive()
    }
}
