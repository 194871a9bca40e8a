use crate::dispatcher::Dispatcher;
use futures::future::BoxFuture;
use std::fmt::Debug;
use std::future::Future;

pub type ThunkJob<Action> =
    Box<dyn FnOnce(Dispatcher<Action>) -> BoxFuture<'static, anyhow::Result<()>> + Send>;

/// The value accepted by `dispatch`: either a plain tagged action interpreted
/// by the reducers, or a deferred computation ("thunk") that is handed a
/// dispatch capability and may issue further actions asynchronously.
pub enum Dispatchable<Action: Send + 'static> {
    Action(Action),
    Thunk(ThunkJob<Action>),
}

impl<Action> Dispatchable<Action>
where
    Action: Send + 'static,
{
    pub fn action(action: Action) -> Self {
        Dispatchable::Action(action)
    }

    pub fn thunk<T, Fut>(job: T) -> Self
    where
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
        T: FnOnce(Dispatcher<Action>) -> Fut + Send + 'static,
    {
        let boxed_job: ThunkJob<Action> =
            Box::new(move |dispatcher: Dispatcher<Action>| Box::pin(job(dispatcher)));
        Dispatchable::Thunk(boxed_job)
    }
}

impl<Action: Send + 'static> From<Action> for Dispatchable<Action> {
    fn from(action: Action) -> Self {
        Dispatchable::Action(action)
    }
}

impl<Action: Send> Debug for Dispatchable<Action>
where
    Action: Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Action(action) => write!(f, "Action({:?})", action),
            Self::Thunk(_) => f.write_str("Thunk"),
        }
    }
}

/// Outcome of a single `dispatch` call.
#[derive(Debug)]
pub enum Dispatched {
    /// The terminal stage applied the reducer and notified every subscriber.
    Completed,
    /// The async stage took over a thunk; await the handle to observe its
    /// completion.
    Task(tokio::task::JoinHandle<()>),
    /// A middleware stage contained a failure or dropped the value; the state
    /// keeps its last committed value.
    Suppressed,
}

impl Dispatched {
    /// Waits for any background work this dispatch started. A no-op for
    /// synchronous outcomes.
    pub async fn settled(self) {
        if let Dispatched::Task(handle) = self {
            let _ = handle.await;
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, Dispatched::Completed)
    }

    pub fn is_suppressed(&self) -> bool {
        matches!(self, Dispatched::Suppressed)
    }
}
