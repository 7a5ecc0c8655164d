//! # Api Slice Core
//!
//! Core traits and types for endpoint-bound API slices.
//!
//! This crate provides the abstractions behind [`create_api_slice`]: a factory
//! that, given a slice name and an endpoint configuration, generates a reducer
//! with three transitions (start, success, failure) and an asynchronous fetch
//! operation that issues the configured HTTP request and dispatches the
//! appropriate transition.
//!
//! ## Core Concepts
//!
//! - **State**: [`ApiState`] — fetched payload, loading flag, error message
//! - **Action**: [`ApiAction`] — the fetch trigger plus the three transitions
//! - **Reducer**: Pure function `(State, Action, Environment) → (State, Effects)`
//! - **Effect**: Side effect descriptions (not execution)
//! - **Environment**: Injected dependencies via traits ([`HttpClient`])
//!
//! ## Architecture Principles
//!
//! - Functional Core, Imperative Shell
//! - Unidirectional Data Flow
//! - Explicit Effects (no hidden I/O)
//! - Dependency Injection via Environment
//!
//! ## Example
//!
//! ```ignore
//! use api_slice_core::{create_api_slice, ApiSliceOptions, Method};
//!
//! #[derive(Clone, Debug, serde::Deserialize)]
//! struct Todo {
//!     id: u64,
//!     title: String,
//! }
//!
//! let slice = create_api_slice::<Vec<Todo>>(
//!     "todos",
//!     ApiSliceOptions::new("https://api.example.com/todos", Method::Get),
//! );
//!
//! // slice.reducer() goes into a Store; store.send(slice.fetch()) runs the cycle.
//! ```

// Re-export commonly used types
pub use serde::{Deserialize, Serialize};
pub use smallvec::{SmallVec, smallvec};

pub mod composition;
pub mod effect;
pub mod environment;
pub mod error;
pub mod reducer;
pub mod slice;

pub use effect::Effect;
pub use environment::{ApiEnvironment, ApiRequest, HttpClient, Method};
pub use error::{RequestError, UNKNOWN_ERROR, failure_message};
pub use reducer::Reducer;
pub use slice::{ApiAction, ApiReducer, ApiSlice, ApiSliceOptions, ApiState, create_api_slice};
