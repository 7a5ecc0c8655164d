//! # Todos Demo
//!
//! Wires a generated API slice into a store and fetches a list of todos from
//! a public endpoint.
//!
//! Run with:
//!
//! ```sh
//! cargo run -p todos
//! ```

use api_slice_core::{ApiAction, ApiEnvironment, ApiSliceOptions, Method, create_api_slice};
use api_slice_http::ReqwestClient;
use api_slice_runtime::Store;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

/// One todo item as served by the endpoint
#[derive(Debug, Clone, PartialEq, Deserialize)]
struct Todo {
    id: u64,
    title: String,
    completed: bool,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let slice = create_api_slice::<Vec<Todo>>(
        "todos",
        ApiSliceOptions::new("https://jsonplaceholder.typicode.com/todos", Method::Get)
            .with_param("_limit", 5),
    );

    let env = ApiEnvironment::new(Arc::new(ReqwestClient::new()));
    let store = Store::new(slice.initial_state(), slice.reducer(), env);

    let terminal = store
        .send_and_wait_for(slice.fetch(), ApiAction::is_terminal, Duration::from_secs(10))
        .await;

    match terminal {
        Ok(ApiAction::FetchSuccess(todos)) => {
            println!("fetched {} todos:", todos.len());
            for todo in todos {
                let mark = if todo.completed { "x" } else { " " };
                println!("  [{mark}] #{} {}", todo.id, todo.title);
            }
        },
        Ok(ApiAction::FetchFailure(message)) => eprintln!("fetch failed: {message}"),
        Ok(_) => unreachable!("predicate only matches terminal actions"),
        Err(error) => eprintln!("store error: {error}"),
    }
}
