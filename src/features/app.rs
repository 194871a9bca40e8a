use super::counter::{self, CounterAction, CounterState};
use super::jokes::{self, JokesAction, JokesState};

/// The composed application state: one named slice per feature.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    pub counter: CounterState,
    pub jokes: JokesState,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    Counter(CounterAction),
    Jokes(JokesAction),
}

impl From<CounterAction> for AppAction {
    fn from(action: CounterAction) -> Self {
        AppAction::Counter(action)
    }
}

impl From<JokesAction> for AppAction {
    fn from(action: JokesAction) -> Self {
        AppAction::Jokes(action)
    }
}

/// Composition root: routes each action to its slice. The slice an action is
/// not addressed to passes through unchanged.
pub fn reduce(state: &AppState, action: &AppAction) -> AppState {
    match action {
        AppAction::Counter(action) => AppState {
            counter: counter::reduce(&state.counter, action),
            ..state.clone()
        },
        AppAction::Jokes(action) => AppState {
            jokes: jokes::reduce(&state.jokes, action),
            ..state.clone()
        },
    }
}
