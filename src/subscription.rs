use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

pub(crate) type Subscriber<State> = Arc<dyn Fn(&State) + Send + Sync>;

/// Token returned by `Store::subscribe`, used to unsubscribe later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

pub(crate) struct SubscriberSet<State> {
    entries: Mutex<Vec<(SubscriberId, Subscriber<State>)>>,
    next_id: AtomicU64,
}

impl<State> SubscriberSet<State> {
    pub(crate) fn new() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(0),
        }
    }

    pub(crate) fn add(&self, subscriber: Subscriber<State>) -> SubscriberId {
        let id = SubscriberId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.entries.lock().push((id, subscriber));
        id
    }

    /// No-op if the id is not currently registered.
    pub(crate) fn remove(&self, id: SubscriberId) {
        self.entries.lock().retain(|(entry_id, _)| *entry_id != id);
    }

    /// Snapshot in subscription order, taken so callbacks run without the list
    /// lock held and may subscribe or unsubscribe reentrantly.
    pub(crate) fn snapshot(&self) -> Vec<Subscriber<State>> {
        self.entries
            .lock()
            .iter()
            .map(|(_, subscriber)| subscriber.clone())
            .collect()
    }
}
