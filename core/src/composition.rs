//! Reducer composition utilities
//!
//! A generated slice rarely lives alone: applications merge several slices
//! into one store. [`scope_reducer`] embeds a child reducer into a parent
//! state/action space by way of three lenses: a state accessor, an action
//! prism (extract/embed), and an environment accessor. Effects produced by
//! the child are re-wrapped into parent actions via [`Effect::map`].
//!
//! # Example
//!
//! ```
//! use api_slice_core::composition::scope_reducer;
//! use api_slice_core::{
//!     create_api_slice, ApiAction, ApiEnvironment, ApiSliceOptions, ApiState, Method,
//! };
//! use serde_json::Value;
//!
//! #[derive(Debug, Clone, Default)]
//! struct AppState {
//!     todos: ApiState<Value>,
//!     users: ApiState<Value>,
//! }
//!
//! #[derive(Debug, Clone)]
//! enum AppAction {
//!     Todos(ApiAction<Value>),
//!     Users(ApiAction<Value>),
//! }
//!
//! let todos = create_api_slice::<Value>(
//!     "todos",
//!     ApiSliceOptions::new("https://api.example.com/todos", Method::Get),
//! );
//!
//! let scoped = scope_reducer(
//!     todos.reducer(),
//!     |app: &mut AppState| &mut app.todos,
//!     |action: AppAction| match action {
//!         AppAction::Todos(inner) => Some(inner),
//!         AppAction::Users(_) => None,
//!     },
//!     AppAction::Todos,
//!     |env: &ApiEnvironment| env,
//! );
//! # let _ = scoped;
//! ```

use crate::effect::Effect;
use crate::reducer::Reducer;
use smallvec::{SmallVec, smallvec};

/// Embed a child reducer into a parent state/action space
///
/// Actions the prism does not recognize leave the parent state untouched and
/// produce no effects. Effects of recognized actions are re-wrapped with
/// `embed_action` so the feedback loop delivers them as parent actions.
///
/// # Type Parameters
///
/// - `S`: The parent state type
/// - `A`: The parent action type
/// - `E`: The parent environment type
/// - `R`: The child reducer
pub fn scope_reducer<S, A, E, R>(
    reducer: R,
    get_state: fn(&mut S) -> &mut R::State,
    extract_action: fn(A) -> Option<R::Action>,
    embed_action: fn(R::Action) -> A,
    get_env: fn(&E) -> &R::Environment,
) -> ScopedReducer<S, A, E, R>
where
    R: Reducer,
    R::Action: Send + 'static,
    A: Send + 'static,
{
    ScopedReducer {
        reducer,
        get_state,
        extract_action,
        embed_action,
        get_env,
    }
}

/// A child reducer embedded into a parent state/action space
///
/// Created by [`scope_reducer`].
pub struct ScopedReducer<S, A, E, R>
where
    R: Reducer,
{
    reducer: R,
    get_state: fn(&mut S) -> &mut R::State,
    extract_action: fn(A) -> Option<R::Action>,
    embed_action: fn(R::Action) -> A,
    get_env: fn(&E) -> &R::Environment,
}

impl<S, A, E, R> Reducer for ScopedReducer<S, A, E, R>
where
    R: Reducer,
    R::Action: Send + 'static,
    A: Send + 'static,
{
    type State = S;
    type Action = A;
    type Environment = E;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        let Some(child_action) = (self.extract_action)(action) else {
            return smallvec![Effect::None];
        };

        let child_state = (self.get_state)(state);
        let effects = self
            .reducer
            .reduce(child_state, child_action, (self.get_env)(env));

        let embed = self.embed_action;
        effects.into_iter().map(|effect| effect.map(embed)).collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic
mod tests {
    use super::*;
    use crate::environment::{ApiEnvironment, ApiRequest, HttpClient, Method};
    use crate::error::RequestError;
    use crate::slice::{ApiAction, ApiSliceOptions, ApiState, create_api_slice};
    use futures::future::BoxFuture;
    use serde_json::{Value, json};
    use std::sync::Arc;

    #[derive(Debug, Clone, Default)]
    struct AppState {
        todos: ApiState<Value>,
        users: ApiState<Value>,
    }

    #[derive(Debug, Clone, PartialEq)]
    enum AppAction {
        Todos(ApiAction<Value>),
        Users(ApiAction<Value>),
    }

    struct EchoClient;

    impl HttpClient for EchoClient {
        fn issue_request(
            &self,
            request: ApiRequest,
        ) -> BoxFuture<'static, Result<Value, RequestError>> {
            Box::pin(async move { Ok(json!({ "url": request.url })) })
        }
    }

    fn app_reducers() -> (
        ScopedReducer<AppState, AppAction, ApiEnvironment, crate::slice::ApiReducer<Value>>,
        ScopedReducer<AppState, AppAction, ApiEnvironment, crate::slice::ApiReducer<Value>>,
    ) {
        let todos = create_api_slice::<Value>(
            "todos",
            ApiSliceOptions::new("https://api.example.com/todos", Method::Get),
        );
        let users = create_api_slice::<Value>(
            "users",
            ApiSliceOptions::new("https://api.example.com/users", Method::Get),
        );

        let todos_scoped = scope_reducer(
            todos.reducer(),
            |app: &mut AppState| &mut app.todos,
            |action: AppAction| match action {
                AppAction::Todos(inner) => Some(inner),
                AppAction::Users(_) => None,
            },
            AppAction::Todos,
            |env: &ApiEnvironment| env,
        );
        let users_scoped = scope_reducer(
            users.reducer(),
            |app: &mut AppState| &mut app.users,
            |action: AppAction| match action {
                AppAction::Users(inner) => Some(inner),
                AppAction::Todos(_) => None,
            },
            AppAction::Users,
            |env: &ApiEnvironment| env,
        );

        (todos_scoped, users_scoped)
    }

    #[test]
    fn scoped_slices_stay_independent() {
        let (todos, users) = app_reducers();
        let env = ApiEnvironment::new(Arc::new(EchoClient));
        let mut state = AppState::default();

        todos.reduce(&mut state, AppAction::Todos(ApiAction::FetchStart), &env);
        assert!(state.todos.loading);
        assert!(!state.users.loading);

        users.reduce(
            &mut state,
            AppAction::Users(ApiAction::FetchSuccess(json!([1]))),
            &env,
        );
        assert_eq!(state.users.data, Some(json!([1])));
        assert_eq!(state.todos.data, None);
    }

    #[test]
    fn unrecognized_action_is_a_no_op() {
        let (todos, _) = app_reducers();
        let env = ApiEnvironment::new(Arc::new(EchoClient));
        let mut state = AppState::default();

        let effects = todos.reduce(&mut state, AppAction::Users(ApiAction::FetchStart), &env);

        assert!(!state.todos.loading);
        assert!(!state.users.loading);
        assert!(matches!(effects.as_slice(), [Effect::None]));
    }

    #[tokio::test]
    async fn scoped_fetch_effect_resolves_to_parent_action() {
        let (todos, _) = app_reducers();
        let env = ApiEnvironment::new(Arc::new(EchoClient));
        let mut state = AppState::default();

        let effects = todos.reduce(&mut state, AppAction::Todos(ApiAction::Fetch), &env);
        assert!(state.todos.loading);

        let Some(Effect::Future(fut)) = effects.into_iter().next() else {
            panic!("scoped fetch must produce a Future effect");
        };
        let action = fut.await.expect("fetch effect must resolve to an action");

        assert_eq!(
            action,
            AppAction::Todos(ApiAction::FetchSuccess(
                json!({ "url": "https://api.example.com/todos" })
            ))
        );
    }
}
