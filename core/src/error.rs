//! Error types for the HTTP seam
//!
//! The error taxonomy visible to slice state is deliberately flat: every
//! failure collapses into the failure transition with a best-effort message.

use thiserror::Error;

/// Fallback message when a failure carries no usable text
pub const UNKNOWN_ERROR: &str = "Unknown error occurred";

/// Errors surfaced by an [`HttpClient`](crate::environment::HttpClient)
///
/// Transport errors, status errors, and decoding errors are distinguished here
/// for implementors and logs, but all of them reach slice state as a single
/// failure message.
#[derive(Debug, Clone, Error)]
pub enum RequestError {
    /// Transport-level failure (connection, DNS, protocol)
    ///
    /// Renders as the transport's own message, verbatim.
    #[error("{0}")]
    Transport(String),

    /// Server responded with a non-success status
    #[error("request failed with status code {status}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, kept for logs and debugging
        body: String,
    },

    /// Response body could not be decoded
    #[error("failed to decode response body: {0}")]
    Decode(String),
}

/// Render a failure message for slice state
///
/// Uses the error's display rendering when it carries one; falls back to
/// [`UNKNOWN_ERROR`] when the rendering is blank.
#[must_use]
pub fn failure_message(error: &RequestError) -> String {
    let rendered = error.to_string();
    if rendered.trim().is_empty() {
        UNKNOWN_ERROR.to_owned()
    } else {
        rendered
    }
}
