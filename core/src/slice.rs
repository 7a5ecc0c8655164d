//! The API slice factory
//!
//! [`create_api_slice`] binds a name and an endpoint configuration into a
//! reducer with three transitions (start, success, failure) plus an
//! asynchronous fetch operation. Dispatching [`ApiAction::Fetch`] applies the
//! start transition synchronously and returns a single effect that issues the
//! configured HTTP request and resolves to exactly one terminal transition.

use crate::effect::Effect;
use crate::environment::{ApiEnvironment, ApiRequest, Method};
use crate::error::{RequestError, failure_message};
use crate::reducer::Reducer;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use smallvec::{SmallVec, smallvec};
use std::marker::PhantomData;
use std::sync::Arc;

/// State of one endpoint-bound slice
///
/// # Invariants
///
/// - `loading` is true only between the start transition and a terminal
///   (success/failure) transition
/// - `error` is cleared whenever a new fetch starts; it is set only by a
///   failure transition
/// - `data` is overwritten only by a success transition; it is never cleared
///   by a failure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiState<T> {
    /// Last successfully fetched response body
    pub data: Option<T>,
    /// True while a fetch is in flight
    pub loading: bool,
    /// Message from the most recent failed fetch
    pub error: Option<String>,
}

impl<T> Default for ApiState<T> {
    fn default() -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
        }
    }
}

/// Actions processed by an API slice reducer
///
/// `Fetch` is the asynchronous operation trigger; the other three variants
/// are the pure transitions it drives.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiAction<T> {
    /// Trigger one fetch cycle against the configured endpoint
    Fetch,
    /// A fetch began: set `loading`, clear `error`
    FetchStart,
    /// A fetch resolved: store the payload, clear `loading`
    FetchSuccess(T),
    /// A fetch failed: store the message, clear `loading`
    FetchFailure(String),
}

impl<T> ApiAction<T> {
    /// Whether this action ends a fetch cycle
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::FetchSuccess(_) | Self::FetchFailure(_))
    }

    /// The unqualified transition label for this action
    ///
    /// Combined with the slice name by [`ApiSlice::action_type`].
    #[must_use]
    pub const fn type_label(&self) -> &'static str {
        match self {
            Self::Fetch => "fetch",
            Self::FetchStart => "fetchStart",
            Self::FetchSuccess(_) => "fetchSuccess",
            Self::FetchFailure(_) => "fetchFailure",
        }
    }
}

/// Immutable endpoint configuration, supplied at factory-call time
///
/// Nothing here is validated: the endpoint is passed to the transport as
/// given, and `params` travel verbatim (the transport decides whether they
/// become a query string or a body).
#[derive(Debug, Clone, PartialEq)]
pub struct ApiSliceOptions {
    /// Endpoint URL
    pub endpoint: String,
    /// HTTP method
    pub method: Method,
    /// Optional query/body parameters
    pub params: Option<Map<String, Value>>,
}

impl ApiSliceOptions {
    /// Configuration for the given endpoint and method, with no parameters
    #[must_use]
    pub fn new(endpoint: impl Into<String>, method: Method) -> Self {
        Self {
            endpoint: endpoint.into(),
            method,
            params: None,
        }
    }

    /// Add a single parameter
    #[must_use]
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params
            .get_or_insert_with(Map::new)
            .insert(key.into(), value.into());
        self
    }

    /// Replace the full parameter map
    #[must_use]
    pub fn with_params(mut self, params: Map<String, Value>) -> Self {
        self.params = Some(params);
        self
    }
}

/// A named bundle of state, transitions, and one fetch operation
///
/// Produced by [`create_api_slice`]. The slice itself is a lightweight handle:
/// it hands out the reducer (for the store), the initial state, and the fetch
/// action creator. Two slices created with different names share no mutable
/// state.
#[derive(Debug)]
pub struct ApiSlice<T> {
    name: String,
    options: Arc<ApiSliceOptions>,
    _payload: PhantomData<fn() -> T>,
}

impl<T> Clone for ApiSlice<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            options: Arc::clone(&self.options),
            _payload: PhantomData,
        }
    }
}

impl<T> ApiSlice<T> {
    /// The slice name
    ///
    /// Used as a namespace for transition labels and tracing fields.
    /// Uniqueness across slices is the caller's responsibility.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The endpoint configuration this slice was created with
    #[must_use]
    pub fn options(&self) -> &ApiSliceOptions {
        &self.options
    }

    /// A fresh initial state: no data, not loading, no error
    #[must_use]
    pub fn initial_state(&self) -> ApiState<T> {
        ApiState::default()
    }

    /// The reducer implementing the slice's transitions
    #[must_use]
    pub fn reducer(&self) -> ApiReducer<T> {
        ApiReducer {
            name: self.name.clone(),
            options: Arc::clone(&self.options),
            _payload: PhantomData,
        }
    }

    /// Action creator for the asynchronous fetch operation
    #[must_use]
    pub const fn fetch(&self) -> ApiAction<T> {
        ApiAction::Fetch
    }

    /// The namespaced transition identifier for an action, e.g. `todos/fetchStart`
    #[must_use]
    pub fn action_type(&self, action: &ApiAction<T>) -> String {
        format!("{}/{}", self.name, action.type_label())
    }
}

/// Generate an API slice bound to one HTTP endpoint
///
/// # Arguments
///
/// - `name`: namespace for the generated transition identifiers. No
///   uniqueness check is performed; collisions are the caller's
///   responsibility.
/// - `options`: endpoint URL, method, and optional parameters. Fixed at
///   factory-call time and never mutated.
///
/// # Example
///
/// ```
/// use api_slice_core::{Method, ApiSliceOptions, create_api_slice};
///
/// let slice = create_api_slice::<serde_json::Value>(
///     "todos",
///     ApiSliceOptions::new("https://api.example.com/todos", Method::Get),
/// );
/// assert_eq!(slice.action_type(&slice.fetch()), "todos/fetch");
/// ```
#[must_use]
pub fn create_api_slice<T>(name: impl Into<String>, options: ApiSliceOptions) -> ApiSlice<T> {
    ApiSlice {
        name: name.into(),
        options: Arc::new(options),
        _payload: PhantomData,
    }
}

/// Reducer generated by [`create_api_slice`]
///
/// Handles the three pure transitions directly; `Fetch` additionally returns
/// the effect that issues the configured request through the environment's
/// HTTP client.
#[derive(Debug)]
pub struct ApiReducer<T> {
    name: String,
    options: Arc<ApiSliceOptions>,
    _payload: PhantomData<fn() -> T>,
}

impl<T> Clone for ApiReducer<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            options: Arc::clone(&self.options),
            _payload: PhantomData,
        }
    }
}

impl<T> ApiReducer<T> {
    /// The slice name this reducer was generated for
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The start transition: mark a fetch in flight, clear any prior error
    fn apply_start(state: &mut ApiState<T>) {
        state.loading = true;
        state.error = None;
    }
}

impl<T> Reducer for ApiReducer<T>
where
    T: DeserializeOwned + Clone + Send + 'static,
{
    type State = ApiState<T>;
    type Action = ApiAction<T>;
    type Environment = ApiEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            ApiAction::Fetch => {
                // Start applies synchronously, before the request suspends.
                Self::apply_start(state);

                let request = ApiRequest {
                    url: self.options.endpoint.clone(),
                    method: self.options.method,
                    params: self.options.params.clone(),
                };
                let http = Arc::clone(&env.http);

                smallvec![Effect::Future(Box::pin(async move {
                    Some(match http.issue_request(request).await {
                        Ok(body) => match serde_json::from_value::<T>(body) {
                            Ok(payload) => ApiAction::FetchSuccess(payload),
                            Err(error) => ApiAction::FetchFailure(failure_message(
                                &RequestError::Decode(error.to_string()),
                            )),
                        },
                        Err(error) => ApiAction::FetchFailure(failure_message(&error)),
                    })
                }))]
            },
            ApiAction::FetchStart => {
                Self::apply_start(state);
                smallvec![Effect::None]
            },
            ApiAction::FetchSuccess(payload) => {
                state.loading = false;
                state.data = Some(payload);
                smallvec![Effect::None]
            },
            ApiAction::FetchFailure(message) => {
                state.loading = false;
                state.error = Some(message);
                smallvec![Effect::None]
            },
        }
    }
}
