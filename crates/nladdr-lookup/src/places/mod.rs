//! Place-name search: remote full-text provider with a local scored fallback.

pub mod cache;
pub mod dataset;
pub mod local_index;
pub mod pdok;

use async_trait::async_trait;

use nladdr_core::PlaceCandidate;

use crate::error::{ProviderError, SearchError};

pub use cache::PlaceCache;
pub use local_index::LocalPlaceIndex;
pub use pdok::PdokPlaceProvider;

/// Queries shorter than this (in characters, after trimming) are rejected.
pub const MIN_QUERY_CHARS: usize = 2;

/// Upper bound on the number of candidates returned by a search.
pub const MAX_RESULTS: usize = 20;

/// A remote free-text place search.
#[async_trait]
pub trait PlaceProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Candidates in provider order.
    async fn search(&self, query: &str) -> Result<Vec<PlaceCandidate>, ProviderError>;
}

/// Best-effort place search for autocomplete.
///
/// Provider failures never reach the caller: the resolver falls back to the
/// local index instead. Answers are cached per exact query string for the
/// lifetime of the resolver.
pub struct PlaceSearchResolver {
    remote: Option<Box<dyn PlaceProvider>>,
    local: LocalPlaceIndex,
    cache: PlaceCache,
}

impl PlaceSearchResolver {
    #[must_use]
    pub fn new(remote: Option<Box<dyn PlaceProvider>>, local: LocalPlaceIndex) -> Self {
        Self {
            remote,
            local,
            cache: PlaceCache::new(),
        }
    }

    #[must_use]
    pub fn cache(&self) -> &PlaceCache {
        &self.cache
    }

    /// # Errors
    ///
    /// Returns [`SearchError::QueryTooShort`] when the trimmed query has fewer
    /// than [`MIN_QUERY_CHARS`] characters. Nothing else is surfaced.
    pub async fn search(&self, query: &str) -> Result<Vec<PlaceCandidate>, SearchError> {
        let trimmed = query.trim();
        if trimmed.chars().count() < MIN_QUERY_CHARS {
            return Err(SearchError::QueryTooShort {
                min_chars: MIN_QUERY_CHARS,
            });
        }

        if let Some(hit) = self.cache.get(query).await {
            tracing::debug!(query, results = hit.len(), "place search cache hit");
            return Ok(hit);
        }

        let results = match &self.remote {
            Some(remote) => match remote.search(trimmed).await {
                Ok(mut results) => {
                    results.truncate(MAX_RESULTS);
                    results
                }
                Err(e) => {
                    tracing::warn!(
                        provider = remote.name(),
                        query,
                        error = %e.cause,
                        "remote place search failed; using local index"
                    );
                    self.local.search(trimmed)
                }
            },
            None => self.local.search(trimmed),
        };

        self.cache.insert(query.to_string(), results.clone()).await;
        Ok(results)
    }
}
