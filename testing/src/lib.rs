//! # Api Slice Testing
//!
//! Testing utilities and helpers for API slices.
//!
//! This crate provides:
//! - Mock implementations of Environment traits
//! - A fluent reducer-test harness
//! - Assertion helpers for effects
//!
//! ## Example
//!
//! ```ignore
//! use api_slice_testing::mock_environment;
//! use api_slice_runtime::Store;
//!
//! #[tokio::test]
//! async fn test_fetch_flow() {
//!     let (env, mock) = mock_environment();
//!     mock.push_ok(serde_json::json!([{"id": 1}]));
//!
//!     let store = Store::new(slice.initial_state(), slice.reducer(), env);
//!     let mut handle = store.send(slice.fetch()).await;
//!     handle.wait().await;
//!
//!     assert!(store.state(|s| s.data.is_some()).await);
//! }
//! ```

use api_slice_core::ApiEnvironment;
use std::sync::Arc;

/// Mock implementations of Environment traits
pub mod mocks {
    use api_slice_core::environment::{ApiRequest, HttpClient};
    use api_slice_core::error::RequestError;
    use futures::future::BoxFuture;
    use serde_json::Value;
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    /// One scripted reply of a [`MockHttpClient`]
    struct Scripted {
        result: Result<Value, RequestError>,
        delay: Option<Duration>,
    }

    /// Scripted HTTP transport for deterministic tests
    ///
    /// Responses are consumed in FIFO order, one per issued request. Issued
    /// requests are recorded and can be inspected with
    /// [`requests`](MockHttpClient::requests). Cloning shares the script and
    /// the recorded requests, so tests can keep a handle after moving a clone
    /// into an environment.
    ///
    /// # Example
    ///
    /// ```
    /// use api_slice_testing::mocks::MockHttpClient;
    /// use serde_json::json;
    ///
    /// let mock = MockHttpClient::new();
    /// mock.push_ok(json!([1, 2, 3]));
    /// assert_eq!(mock.requests().len(), 0);
    /// ```
    #[derive(Clone, Default)]
    pub struct MockHttpClient {
        script: Arc<Mutex<VecDeque<Scripted>>>,
        requests: Arc<Mutex<Vec<ApiRequest>>>,
    }

    impl MockHttpClient {
        /// Create a mock with an empty script
        ///
        /// A request issued with no scripted response resolves to a
        /// transport error naming the problem.
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Script a successful JSON response
        pub fn push_ok(&self, body: Value) {
            self.push(Ok(body), None);
        }

        /// Script a failed response
        pub fn push_err(&self, error: RequestError) {
            self.push(Err(error), None);
        }

        /// Script a successful response delivered after a delay
        ///
        /// Useful for observing in-flight state or forcing a completion
        /// order across concurrent fetches.
        pub fn push_ok_after(&self, body: Value, delay: Duration) {
            self.push(Ok(body), Some(delay));
        }

        /// Script a failed response delivered after a delay
        pub fn push_err_after(&self, error: RequestError, delay: Duration) {
            self.push(Err(error), Some(delay));
        }

        /// Snapshot of every request issued so far, in order
        #[must_use]
        pub fn requests(&self) -> Vec<ApiRequest> {
            self.requests
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner)
                .clone()
        }

        fn push(&self, result: Result<Value, RequestError>, delay: Option<Duration>) {
            self.script
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner)
                .push_back(Scripted { result, delay });
        }
    }

    impl HttpClient for MockHttpClient {
        fn issue_request(
            &self,
            request: ApiRequest,
        ) -> BoxFuture<'static, Result<Value, RequestError>> {
            self.requests
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner)
                .push(request);

            let scripted = self
                .script
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner)
                .pop_front();

            Box::pin(async move {
                match scripted {
                    Some(Scripted { result, delay }) => {
                        if let Some(delay) = delay {
                            tokio::time::sleep(delay).await;
                        }
                        result
                    },
                    None => Err(RequestError::Transport(
                        "no scripted response for request".to_owned(),
                    )),
                }
            })
        }
    }
}

/// Fluent reducer-test harness and effect assertions
pub mod reducer_test;

// Re-export commonly used items
pub use mocks::MockHttpClient;
pub use reducer_test::{ReducerTest, assertions};

/// Create an [`ApiEnvironment`] backed by a fresh [`MockHttpClient`]
///
/// Returns the environment together with a handle to the mock for scripting
/// responses and inspecting requests.
#[must_use]
pub fn mock_environment() -> (ApiEnvironment, MockHttpClient) {
    let mock = MockHttpClient::new();
    let env = ApiEnvironment::new(Arc::new(mock.clone()));
    (env, mock)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic
mod tests {
    use super::*;
    use api_slice_core::environment::{ApiRequest, HttpClient, Method};
    use serde_json::json;

    #[tokio::test]
    async fn scripted_responses_are_consumed_in_order() {
        let (env, mock) = mock_environment();
        mock.push_ok(json!(1));
        mock.push_ok(json!(2));

        let request = ApiRequest {
            url: "https://api.example.com/n".to_owned(),
            method: Method::Get,
            params: None,
        };

        assert_eq!(env.http.issue_request(request.clone()).await.unwrap(), json!(1));
        assert_eq!(env.http.issue_request(request.clone()).await.unwrap(), json!(2));

        let error = env.http.issue_request(request).await.unwrap_err();
        assert!(error.to_string().contains("no scripted response"));
    }

    #[tokio::test]
    async fn issued_requests_are_recorded() {
        let (env, mock) = mock_environment();
        mock.push_ok(json!(null));

        let _ = env
            .http
            .issue_request(ApiRequest {
                url: "https://api.example.com/todos".to_owned(),
                method: Method::Delete,
                params: None,
            })
            .await;

        let requests = mock.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, Method::Delete);
    }
}
