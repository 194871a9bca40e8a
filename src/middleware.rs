use crate::dispatchable::{Dispatchable, Dispatched};
use crate::stages::{Guard, Thunks, Trace};
use crate::store::StoreHandle;

pub type DispatchFn<Action> = Box<dyn Fn(Dispatchable<Action>) -> Dispatched + Send + Sync>;

/// One stage of the dispatch pipeline. A stage receives a read-only store
/// handle and the next stage's dispatch function, and returns its own. It may
/// observe, transform, short-circuit or forward the dispatched value.
pub trait Middleware<State, Action>: Send + Sync
where
    State: Clone + Send + Sync + 'static,
    Action: Send + 'static,
{
    fn apply(
        &self,
        store: StoreHandle<State, Action>,
        next: DispatchFn<Action>,
    ) -> DispatchFn<Action>;
}

/// An ordered list of stages. The first stage registered with `with` becomes
/// the outermost wrapper around the terminal reducer-apply step.
pub struct MiddlewareChain<State, Action>
where
    State: Clone + Send + Sync + 'static,
    Action: Send + 'static,
{
    stages: Vec<Box<dyn Middleware<State, Action>>>,
}

impl<State, Action> MiddlewareChain<State, Action>
where
    State: Clone + Send + Sync + 'static,
    Action: Send + 'static,
{
    pub fn new() -> Self {
        Self { stages: Vec::new() }
    }

    pub fn with(mut self, stage: impl Middleware<State, Action> + 'static) -> Self {
        self.stages.push(Box::new(stage));
        self
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    pub(crate) fn assemble(
        self,
        store: StoreHandle<State, Action>,
        base: DispatchFn<Action>,
    ) -> DispatchFn<Action> {
        self.stages
            .into_iter()
            .rev()
            .fold(base, |next, stage| stage.apply(store.clone(), next))
    }
}

impl<State, Action> MiddlewareChain<State, Action>
where
    State: Clone + std::fmt::Debug + Send + Sync + 'static,
    Action: std::fmt::Debug + Send + 'static,
{
    /// Error containment wraps everything; tracing sits innermost so it
    /// observes state immediately before and after the reducer runs.
    pub fn standard() -> Self {
        Self::new().with(Guard).with(Thunks).with(Trace)
    }
}

impl<State, Action> Default for MiddlewareChain<State, Action>
where
    State: Clone + Send + Sync + 'static,
    Action: Send + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}
