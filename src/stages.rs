use std::any::Any;
use std::fmt::Debug;
use std::panic::{catch_unwind, AssertUnwindSafe};

use crate::dispatchable::{Dispatchable, Dispatched};
use crate::middleware::{DispatchFn, Middleware};
use crate::store::StoreHandle;

/// Error containment. Registered outermost, it traps panics from every later
/// stage, the reducer and subscriber callbacks, reports them and resolves the
/// dispatch to `Suppressed`. The state cell is only replaced after the reducer
/// returns, so a contained panic leaves the last committed value.
pub struct Guard;

impl<State, Action> Middleware<State, Action> for Guard
where
    State: Clone + Send + Sync + 'static,
    Action: Send + 'static,
{
    fn apply(
        &self,
        _store: StoreHandle<State, Action>,
        next: DispatchFn<Action>,
    ) -> DispatchFn<Action> {
        Box::new(move |value| match catch_unwind(AssertUnwindSafe(|| next(value))) {
            Ok(outcome) => outcome,
            Err(payload) => {
                log::error!("dispatch failed: {}", panic_message(payload.as_ref()));
                Dispatched::Suppressed
            }
        })
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else {
        "opaque panic payload"
    }
}

/// The async stage. Thunks are spawned onto the tokio runtime with a dispatch
/// capability; a job returning `Err` is reported and swallowed. Plain actions
/// are forwarded untouched.
pub struct Thunks;

impl<State, Action> Middleware<State, Action> for Thunks
where
    State: Clone + Send + Sync + 'static,
    Action: Send + 'static,
{
    fn apply(
        &self,
        store: StoreHandle<State, Action>,
        next: DispatchFn<Action>,
    ) -> DispatchFn<Action> {
        Box::new(move |value| match value {
            Dispatchable::Thunk(job) => {
                let dispatcher = store.dispatcher();
                let handle = tokio::spawn(async move {
                    if let Err(error) = job(dispatcher).await {
                        log::error!("thunk failed: {error:#}");
                    }
                });
                Dispatched::Task(handle)
            }
            passthrough => next(passthrough),
        })
    }
}

/// Transparent logging stage recording the action and the state on both sides
/// of the transition.
pub struct Trace;

impl<State, Action> Middleware<State, Action> for Trace
where
    State: Clone + Debug + Send + Sync + 'static,
    Action: Debug + Send + 'static,
{
    fn apply(
        &self,
        store: StoreHandle<State, Action>,
        next: DispatchFn<Action>,
    ) -> DispatchFn<Action> {
        Box::new(move |value| {
            let described = format!("{:?}", value);
            log::debug!("dispatching {described}, state before: {:?}", store.state());
            let outcome = next(value);
            log::debug!("dispatched {described}, state after: {:?}", store.state());
            outcome
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::dispatcher::Dispatcher;
    use crate::middleware::MiddlewareChain;
    use crate::store::Store;

    #[derive(Debug, Clone, PartialEq, Default)]
    struct State {
        counter: i32,
    }

    #[derive(Debug, Clone, Copy)]
    enum Action {
        Increment,
        Explode,
    }

    fn reduce(state: &State, action: &Action) -> State {
        match action {
            Action::Increment => State {
                counter: state.counter + 1,
            },
            Action::Explode => panic!("broken transition"),
        }
    }

    #[test]
    fn guard_contains_a_panicking_reducer() {
        let store = Store::with_chain(State::default(), reduce, MiddlewareChain::new().with(Guard));

        assert!(store.dispatch(Action::Explode).is_suppressed());
        assert_eq!(store.state(), State::default());

        assert!(store.dispatch(Action::Increment).is_completed());
        assert_eq!(store.state().counter, 1);
    }

    #[tokio::test]
    async fn a_failing_thunk_leaves_the_container_usable() {
        let store = Store::new(State::default(), reduce);

        store
            .dispatch(Dispatchable::thunk(|_dispatcher: Dispatcher<Action>| {
                async { Err(anyhow::anyhow!("backend unavailable")) }
            }))
            .settled()
            .await;

        assert!(store.dispatch(Action::Increment).is_completed());
        assert_eq!(store.state().counter, 1);
    }

    #[tokio::test]
    async fn thunk_inner_dispatches_are_sequenced() {
        let store = Store::new(State::default(), reduce);

        store
            .dispatch(Dispatchable::thunk(|dispatcher: Dispatcher<Action>| {
                async move {
                    dispatcher.dispatch(Action::Increment);
                    dispatcher.dispatch(Action::Increment);
                    anyhow::Ok(())
                }
            }))
            .settled()
            .await;

        assert_eq!(store.state().counter, 2);
    }
}
