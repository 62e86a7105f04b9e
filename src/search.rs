//! Per-request search pipeline
//!
//! validate → extract threshold → embed query → fetch `fan_out` neighbours →
//! experience filter → [`SearchOutcome`]. Each request is independent; the
//! only shared state is the lazily built index.

use crate::config::SearchConfig;
use crate::embedding::{EmbeddingProvider, HashEmbeddingProvider};
use crate::error::{Result, ScoutError};
use crate::filter::{filter_candidates, FilterReport};
use crate::index::{build_index, IndexHandle, LazyIndex, DEFAULT_BATCH_SIZE};
use crate::query::SearchQuery;
use crate::types::{Candidate, Profile, SearchOutcome};
use crate::vector_backend::{FlatVectorBackend, VectorBackend};
use futures::FutureExt;
use std::sync::Arc;

/// Semantic profile search over a lazily built index
#[derive(Debug, Clone)]
pub struct ProfileSearch {
    index: Arc<LazyIndex>,
    config: SearchConfig,
}

impl ProfileSearch {
    pub fn new(index: Arc<LazyIndex>, config: SearchConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { index, config })
    }

    /// Search over an index that is already built
    pub fn from_handle(handle: IndexHandle, config: SearchConfig) -> Result<Self> {
        Self::new(Arc::new(LazyIndex::ready(handle)), config)
    }

    /// Hash embedder plus flat index over `profiles`, built on first search
    pub fn in_memory(profiles: Arc<Vec<Profile>>, config: SearchConfig) -> Result<Self> {
        let index = LazyIndex::new(move || {
            let profiles = Arc::clone(&profiles);
            async move {
                let embedder: Arc<dyn EmbeddingProvider> =
                    Arc::new(HashEmbeddingProvider::default());
                let backend: Arc<dyn VectorBackend> =
                    Arc::new(FlatVectorBackend::timestamped(embedder.dimension()));
                build_index(&profiles, embedder, backend, DEFAULT_BATCH_SIZE).await
            }
            .boxed()
        });
        Self::new(Arc::new(index), config)
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn index(&self) -> &LazyIndex {
        &self.index
    }

    /// Run a raw user query.
    ///
    /// Blank input yields [`SearchOutcome::ValidationError`] without touching
    /// the embedder or the index. Embedder and index failures are errors.
    pub async fn search(&self, raw_query: &str) -> Result<SearchOutcome> {
        let query = match SearchQuery::parse(raw_query, self.config.threshold_policy) {
            Ok(q) => q,
            Err(ScoutError::Validation(message)) => {
                tracing::debug!("rejected blank query");
                return Ok(SearchOutcome::ValidationError { message });
            }
            Err(e) => return Err(e),
        };

        self.search_query(&query).await
    }

    /// Run an already parsed query
    pub async fn search_query(&self, query: &SearchQuery) -> Result<SearchOutcome> {
        let report = self.filtered(query).await?;

        if report.kept.is_empty() {
            return Ok(SearchOutcome::NoResults {
                query: query.raw_query.clone(),
                threshold: query.threshold,
            });
        }

        Ok(SearchOutcome::Results {
            query: query.raw_query.clone(),
            threshold: query.threshold,
            profiles: report.kept,
            total_matches: report.total_matches,
        })
    }

    /// Ranked candidate pool straight from the index, before filtering
    pub async fn candidates(&self, query: &SearchQuery) -> Result<Vec<Candidate>> {
        let index = self.index.get().await?;
        let vector = index.embedder().embed_one(&query.raw_query).await?;
        let pool = index.backend().search(&vector, self.config.fan_out).await?;
        tracing::debug!(
            query = %query.raw_query,
            threshold = ?query.threshold,
            pool = pool.len(),
            "similarity search"
        );
        Ok(pool)
    }

    /// Candidate pool with the filter applied, including rejections
    pub async fn filtered(&self, query: &SearchQuery) -> Result<FilterReport> {
        let pool = self.candidates(query).await?;
        Ok(filter_candidates(
            pool,
            query.threshold,
            self.config.display_cap,
        ))
    }
}
