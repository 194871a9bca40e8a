/// A pure, total state transition: unrecognized actions must return the input
/// state unchanged.
pub trait Reducer<State, Action>: Send + Sync {
    fn reduce(&self, state: &State, action: &Action) -> State;
}

impl<State, Action, F> Reducer<State, Action> for F
where
    F: Fn(&State, &Action) -> State + Send + Sync,
{
    fn reduce(&self, state: &State, action: &Action) -> State {
        self(state, action)
    }
}
