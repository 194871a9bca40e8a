use crate::fetch::{Joke, SearchPage};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filters {
    pub term: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JokesState {
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
    pub results: Vec<Joke>,
    pub filters: Filters,
}

impl Default for JokesState {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 10,
            total_pages: 1,
            results: Vec::new(),
            filters: Filters {
                term: String::new(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    Term(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JokesAction {
    Received(SearchPage),
    NextPage,
    PreviousPage,
    SetFilter(Filter),
}

fn received(state: &JokesState, page: &SearchPage) -> JokesState {
    JokesState {
        total_pages: page.total_pages,
        results: page.results.clone(),
        ..state.clone()
    }
}

fn next_page(state: &JokesState) -> JokesState {
    JokesState {
        page: (state.page + 1).min(state.total_pages.max(1)),
        ..state.clone()
    }
}

fn previous_page(state: &JokesState) -> JokesState {
    JokesState {
        page: state.page.saturating_sub(1).max(1),
        ..state.clone()
    }
}

fn set_filter(state: &JokesState, filter: &Filter) -> JokesState {
    let mut filters = state.filters.clone();
    match filter {
        Filter::Term(value) => filters.term = value.clone(),
    }
    JokesState {
        filters,
        ..state.clone()
    }
}

pub fn reduce(state: &JokesState, action: &JokesAction) -> JokesState {
    match action {
        JokesAction::Received(page) => received(state, page),
        JokesAction::NextPage => next_page(state),
        JokesAction::PreviousPage => previous_page(state),
        JokesAction::SetFilter(filter) => set_filter(state, filter),
    }
}

pub mod actions {
    use std::sync::Arc;

    use super::{Filter, JokesAction};
    use crate::dispatchable::Dispatchable;
    use crate::fetch::{JokeFetcher, SearchQuery};

    pub fn next() -> JokesAction {
        JokesAction::NextPage
    }

    pub fn previous() -> JokesAction {
        JokesAction::PreviousPage
    }

    pub fn set_filter(filter: Filter) -> JokesAction {
        JokesAction::SetFilter(filter)
    }

    /// Asynchronous action creator: fetches one page of results and
    /// dispatches `Received` with the payload. A fetch failure surfaces at
    /// the async stage, which reports and swallows it.
    pub fn search<Action>(
        api: Arc<dyn JokeFetcher>,
        term: String,
        page: u32,
        limit: u32,
    ) -> Dispatchable<Action>
    where
        Action: From<JokesAction> + Send + 'static,
    {
        Dispatchable::thunk(move |dispatcher| async move {
            let fetched = api.search(SearchQuery { term, page, limit }).await?;
            dispatcher.dispatch(Action::from(JokesAction::Received(fetched)));
            Ok(())
        })
    }
}
