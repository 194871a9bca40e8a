use async_trait::async_trait;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Joke {
    pub id: u64,
    pub joke: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub term: String,
    pub page: u32,
    pub limit: u32,
}

/// One page of search results as returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPage {
    pub total_pages: u32,
    pub results: Vec<Joke>,
}

/// The external search collaborator. The library depends only on this async
/// shape; the HTTP transport behind it is somebody else's problem.
#[async_trait]
pub trait JokeFetcher: Send + Sync {
    async fn search(&self, query: SearchQuery) -> anyhow::Result<SearchPage>;
}
