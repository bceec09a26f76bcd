use crate::errors::EngineError;
use crate::link::{clear_query, Link};
use crate::traits::SearchBackend;
use crate::types::{SearchQuery, SearchResult, SEARCH_RESULTS_LIMIT};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Orders the search backends: the remote API when configured, then the
/// local extractor. Backends are tried one after another, never in parallel.
#[derive(Clone)]
pub struct SearchResolver {
    remote: Option<Arc<dyn SearchBackend>>,
    local: Arc<dyn SearchBackend>,
}

impl SearchResolver {
    pub fn new(remote: Option<Arc<dyn SearchBackend>>, local: Arc<dyn SearchBackend>) -> Self {
        Self { remote, local }
    }

    pub async fn search(
        &self,
        query: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<SearchResult>, EngineError> {
        let query = clear_query(query);

        if query.is_empty() {
            return Err(EngineError::empty_query());
        }

        let query = match Link::parse(&query) {
            Some(link) => SearchQuery::Link(link),
            None => SearchQuery::Text(query),
        };

        self.search_query(&query, cancel).await
    }

    pub(crate) async fn search_query(
        &self,
        query: &SearchQuery,
        cancel: &CancellationToken,
    ) -> Result<Vec<SearchResult>, EngineError> {
        if let Some(remote) = &self.remote {
            match remote.search(query, cancel).await {
                Ok(results) if !results.is_empty() => {
                    debug!(backend = remote.name(), count = results.len(), "Search succeeded");
                    return Ok(truncated(results));
                }
                Ok(_) => {
                    info!(backend = remote.name(), query = query.as_str(), "Search returned no results, falling back");
                }
                Err(error) if error.is_cancelled() => return Err(EngineError::Cancelled),
                Err(error) => {
                    warn!(backend = remote.name(), %error, "Search backend failed, falling back");
                }
            }
        }

        let results = self.local.search(query, cancel).await?;

        if results.is_empty() {
            info!(backend = self.local.name(), query = query.as_str(), "No search results");
            return Err(EngineError::no_results());
        }

        debug!(backend = self.local.name(), count = results.len(), "Search succeeded");

        Ok(truncated(results))
    }
}

fn truncated(mut results: Vec<SearchResult>) -> Vec<SearchResult> {
    results.truncate(SEARCH_RESULTS_LIMIT);
    results
}
