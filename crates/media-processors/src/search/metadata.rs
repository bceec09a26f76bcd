use crate::errors::EngineError;
use crate::link::{Link, LinkError};
use crate::search::SearchResolver;
use crate::types::{SearchQuery, SearchResult, TrackInfo};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Resolves a platform link into exactly the track it points at.
#[derive(Clone)]
pub struct MetadataResolver {
    search_resolver: SearchResolver,
}

impl MetadataResolver {
    pub fn new(search_resolver: SearchResolver) -> Self {
        Self { search_resolver }
    }

    pub async fn search(
        &self,
        query: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<SearchResult>, EngineError> {
        self.search_resolver.search(query, cancel).await
    }

    pub async fn resolve(
        &self,
        query: &str,
        cancel: &CancellationToken,
    ) -> Result<TrackInfo, EngineError> {
        let link = Link::try_parse(query).map_err(|error| match error {
            LinkError::Empty => EngineError::empty_query(),
            LinkError::Unsupported => EngineError::invalid_link(),
            LinkError::MissingId => EngineError::InvalidInput(error.to_string()),
        })?;
        let media_id = link.media_id.clone();

        let results = self
            .search_resolver
            .search_query(&SearchQuery::Link(link), cancel)
            .await?;

        debug!(%media_id, candidates = results.len(), "Looking for the exact candidate");

        let result = results
            .into_iter()
            .find(|result| result.id == media_id.as_str())
            .ok_or_else(EngineError::no_results)?;

        info!(%media_id, name = %result.name, "Track resolved");

        Ok(TrackInfo::from_search_result(media_id, result))
    }
}
