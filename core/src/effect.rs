//! Side effect descriptions
//!
//! Effects describe side effects to be performed by the runtime.
//! They are values (not execution) and are composable.

use std::future::Future;
use std::pin::Pin;

/// Effect type - describes a side effect to be executed
///
/// Effects are NOT executed immediately. They are descriptions of what should
/// happen, returned from reducers and executed by the Store runtime.
///
/// # Type Parameters
///
/// - `Action`: The action type that effects can produce (feedback loop)
pub enum Effect<Action> {
    /// No-op effect
    None,

    /// Run effects in parallel
    Parallel(Vec<Effect<Action>>),

    /// Run effects sequentially
    Sequential(Vec<Effect<Action>>),

    /// Arbitrary async computation
    ///
    /// Returns `Option<Action>` - if Some, the action is fed back into the reducer
    Future(Pin<Box<dyn Future<Output = Option<Action>> + Send>>),
}

// Manual Debug implementation since Future doesn't implement Debug
impl<Action> std::fmt::Debug for Effect<Action>
where
    Action: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Effect::None => write!(f, "Effect::None"),
            Effect::Parallel(effects) => f.debug_tuple("Effect::Parallel").field(effects).finish(),
            Effect::Sequential(effects) => {
                f.debug_tuple("Effect::Sequential").field(effects).finish()
            },
            Effect::Future(_) => write!(f, "Effect::Future(<future>)"),
        }
    }
}

impl<Action> Effect<Action> {
    /// Combine effects to run in parallel
    #[must_use]
    pub const fn merge(effects: Vec<Effect<Action>>) -> Effect<Action> {
        Effect::Parallel(effects)
    }

    /// Chain effects to run sequentially
    #[must_use]
    pub const fn chain(effects: Vec<Effect<Action>>) -> Effect<Action> {
        Effect::Sequential(effects)
    }
}

impl<Action> Effect<Action>
where
    Action: Send + 'static,
{
    /// Map the action type produced by this effect
    ///
    /// Used when embedding a child reducer's effects into a parent action
    /// space (see [`crate::composition::scope_reducer`]).
    #[must_use]
    pub fn map<B, F>(self, f: F) -> Effect<B>
    where
        B: Send + 'static,
        F: Fn(Action) -> B + Clone + Send + Sync + 'static,
    {
        match self {
            Effect::None => Effect::None,
            Effect::Parallel(effects) => {
                Effect::Parallel(effects.into_iter().map(|e| e.map(f.clone())).collect())
            },
            Effect::Sequential(effects) => {
                Effect::Sequential(effects.into_iter().map(|e| e.map(f.clone())).collect())
            },
            Effect::Future(fut) => Effect::Future(Box::pin(async move { fut.await.map(f) })),
        }
    }
}
