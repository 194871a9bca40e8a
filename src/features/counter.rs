#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CounterState {
    pub n: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterAction {
    Increment { step: i64 },
}

pub fn increment(step: i64) -> CounterAction {
    CounterAction::Increment { step }
}

pub fn reduce(state: &CounterState, action: &CounterAction) -> CounterState {
    match action {
        CounterAction::Increment { step } => CounterState { n: state.n + step },
    }
}
