use std::sync::{Arc, OnceLock, Weak};

use parking_lot::{ReentrantMutex, RwLock};

use crate::dispatchable::{Dispatchable, Dispatched};
use crate::dispatcher::Dispatcher;
use crate::middleware::{DispatchFn, MiddlewareChain};
use crate::reducer::Reducer;
use crate::subscription::{SubscriberId, SubscriberSet};

/// The state container. Owns the single authoritative state cell and the
/// subscriber list; every transition goes through `dispatch` and the
/// middleware chain fixed at construction.
pub struct Store<State, Action>
where
    State: Clone + Send + Sync + 'static,
    Action: Send + 'static,
{
    inner: Arc<StoreInner<State, Action>>,
}

pub(crate) struct StoreInner<State, Action>
where
    State: Clone + Send + Sync + 'static,
    Action: Send + 'static,
{
    state: RwLock<State>,
    subscribers: SubscriberSet<State>,
    // Serializes whole dispatches across threads while keeping reentrant
    // dispatch from a subscriber callback on the same thread legal.
    gate: ReentrantMutex<()>,
    chain: OnceLock<DispatchFn<Action>>,
}

impl<State, Action> StoreInner<State, Action>
where
    State: Clone + Send + Sync + 'static,
    Action: Send + 'static,
{
    fn dispatch(&self, value: Dispatchable<Action>) -> Dispatched {
        let _gate = self.gate.lock();
        match self.chain.get() {
            Some(dispatch) => dispatch(value),
            // Only reachable while the chain is still being assembled.
            None => Dispatched::Suppressed,
        }
    }
}

impl<State, Action> Store<State, Action>
where
    State: Clone + std::fmt::Debug + Send + Sync + 'static,
    Action: std::fmt::Debug + Send + 'static,
{
    pub fn new(initial: State, reducer: impl Reducer<State, Action> + 'static) -> Self {
        Self::with_chain(initial, reducer, MiddlewareChain::standard())
    }
}

impl<State, Action> Store<State, Action>
where
    State: Clone + Send + Sync + 'static,
    Action: Send + 'static,
{
    pub fn with_chain(
        initial: State,
        reducer: impl Reducer<State, Action> + 'static,
        chain: MiddlewareChain<State, Action>,
    ) -> Self {
        let inner = Arc::new(StoreInner {
            state: RwLock::new(initial),
            subscribers: SubscriberSet::new(),
            gate: ReentrantMutex::new(()),
            chain: OnceLock::new(),
        });
        let handle = StoreHandle {
            inner: Arc::downgrade(&inner),
        };
        let base = terminal(handle.clone(), Arc::new(reducer));
        let dispatch = chain.assemble(handle, base);
        let _ = inner.chain.set(dispatch);
        Self { inner }
    }

    pub fn state(&self) -> State {
        self.inner.state.read().clone()
    }

    pub fn dispatch(&self, value: impl Into<Dispatchable<Action>>) -> Dispatched {
        self.inner.dispatch(value.into())
    }

    pub fn subscribe(&self, subscriber: impl Fn(&State) + Send + Sync + 'static) -> SubscriberId {
        self.inner.subscribers.add(Arc::new(subscriber))
    }

    pub fn unsubscribe(&self, id: SubscriberId) {
        self.inner.subscribers.remove(id);
    }

    pub fn handle(&self) -> StoreHandle<State, Action> {
        StoreHandle {
            inner: Arc::downgrade(&self.inner),
        }
    }
}

/// A weak, read-only handle onto a store: state snapshots and dispatch
/// re-entry. Held by middleware stages and thunk dispatchers; once the store
/// is dropped, dispatches through it are suppressed.
pub struct StoreHandle<State, Action>
where
    State: Clone + Send + Sync + 'static,
    Action: Send + 'static,
{
    inner: Weak<StoreInner<State, Action>>,
}

impl<State, Action> StoreHandle<State, Action>
where
    State: Clone + Send + Sync + 'static,
    Action: Send + 'static,
{
    pub fn state(&self) -> Option<State> {
        self.inner.upgrade().map(|inner| inner.state.read().clone())
    }

    pub fn dispatch(&self, value: impl Into<Dispatchable<Action>>) -> Dispatched {
        match self.inner.upgrade() {
            Some(inner) => inner.dispatch(value.into()),
            None => {
                log::warn!("dispatch on a handle whose store was dropped");
                Dispatched::Suppressed
            }
        }
    }

    pub fn dispatcher(&self) -> Dispatcher<Action> {
        let handle = self.clone();
        Dispatcher::new(Arc::new(move |value| handle.dispatch(value)))
    }
}

impl<State, Action> Clone for StoreHandle<State, Action>
where
    State: Clone + Send + Sync + 'static,
    Action: Send + 'static,
{
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

/// The innermost dispatch stage: apply the reducer, replace the state cell,
/// then notify every subscriber with the new state in subscription order.
fn terminal<State, Action>(
    handle: StoreHandle<State, Action>,
    reducer: Arc<dyn Reducer<State, Action>>,
) -> DispatchFn<Action>
where
    State: Clone + Send + Sync + 'static,
    Action: Send + 'static,
{
    Box::new(move |value| {
        let action = match value {
            Dispatchable::Action(action) => action,
            Dispatchable::Thunk(_) => {
                log::warn!("thunk reached the terminal stage with no async middleware installed");
                return Dispatched::Suppressed;
            }
        };
        let Some(inner) = handle.inner.upgrade() else {
            return Dispatched::Suppressed;
        };
        let next_state = {
            let mut cell = inner.state.write();
            let next = reducer.reduce(&*cell, &action);
            *cell = next.clone();
            next
        };
        for subscriber in inner.subscribers.snapshot() {
            subscriber(&next_state);
        }
        Dispatched::Completed
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::dispatcher::Dispatcher;
    use parking_lot::Mutex;

    #[derive(Debug, Clone, PartialEq, Default)]
    struct State {
        counter: i32,
    }

    #[derive(Debug, Clone, Copy)]
    enum Action {
        Increment,
    }

    fn reduce(state: &State, action: &Action) -> State {
        match action {
            Action::Increment => State {
                counter: state.counter + 1,
            },
        }
    }

    fn plain_store() -> Store<State, Action> {
        Store::with_chain(State::default(), reduce, MiddlewareChain::new())
    }

    #[test]
    fn applies_the_reducer_and_reports_completion() {
        let store = plain_store();
        assert!(store.dispatch(Action::Increment).is_completed());
        assert_eq!(store.state().counter, 1);
    }

    #[test]
    fn notifies_subscribers_in_order_with_the_new_state() {
        let store = plain_store();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let first = seen.clone();
        store.subscribe(move |state: &State| first.lock().push(("first", state.counter)));
        let second = seen.clone();
        store.subscribe(move |state: &State| second.lock().push(("second", state.counter)));

        store.dispatch(Action::Increment);
        assert_eq!(*seen.lock(), vec![("first", 1), ("second", 1)]);
    }

    #[test]
    fn each_subscriber_fires_exactly_once_per_dispatch() {
        let store = plain_store();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        store.subscribe(move |state: &State| sink.lock().push(state.counter));

        store.dispatch(Action::Increment);
        store.dispatch(Action::Increment);
        assert_eq!(*seen.lock(), vec![1, 2]);
    }

    #[test]
    fn unsubscribe_silences_the_callback_and_is_idempotent() {
        let store = plain_store();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let id = store.subscribe(move |state: &State| sink.lock().push(state.counter));

        store.unsubscribe(id);
        store.unsubscribe(id);
        store.dispatch(Action::Increment);
        assert!(seen.lock().is_empty());
    }

    #[test]
    fn reentrant_dispatch_from_a_subscriber_is_permitted() {
        let store = plain_store();
        let handle = store.handle();
        store.subscribe(move |state: &State| {
            if state.counter < 2 {
                handle.dispatch(Action::Increment);
            }
        });

        store.dispatch(Action::Increment);
        assert_eq!(store.state().counter, 2);
    }

    #[test]
    fn handles_outliving_the_store_suppress_dispatches() {
        let store = plain_store();
        let handle = store.handle();
        drop(store);

        assert!(handle.dispatch(Action::Increment).is_suppressed());
        assert!(handle.state().is_none());
    }

    #[test]
    fn a_thunk_without_an_async_stage_is_suppressed() {
        let store = plain_store();
        let outcome = store.dispatch(Dispatchable::thunk(|_dispatcher: Dispatcher<Action>| {
            async { anyhow::Ok(()) }
        }));
        assert!(outcome.is_suppressed());
        assert_eq!(store.state(), State::default());
    }
}
