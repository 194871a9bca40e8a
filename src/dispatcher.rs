use crate::dispatchable::{Dispatchable, Dispatched};
use std::sync::Arc;

type DispatchSink<Action> = Arc<dyn Fn(Dispatchable<Action>) -> Dispatched + Send + Sync>;

/// A dispatch capability handed to thunk jobs. Erases the store's state type
/// so thunks only know the action type they emit.
pub struct Dispatcher<Action: Send + 'static> {
    sink: DispatchSink<Action>,
}

impl<Action: Send + 'static> Dispatcher<Action> {
    pub(crate) fn new(sink: DispatchSink<Action>) -> Self {
        Self { sink }
    }

    pub fn dispatch(&self, value: impl Into<Dispatchable<Action>>) -> Dispatched {
        (self.sink)(value.into())
    }
}

impl<Action: Send + 'static> Clone for Dispatcher<Action> {
    fn clone(&self) -> Self {
        Self {
            sink: self.sink.clone(),
        }
    }
}
