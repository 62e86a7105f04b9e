//! Index construction and single-flight lazy initialisation
//!
//! The index is built once per process: every profile's `raw_text` is
//! embedded and stored under its position in the source sequence. After the
//! build the handle is read-only and shared by every search.

use crate::embedding::EmbeddingProvider;
use crate::error::{Result, ScoutError};
use crate::types::{Profile, ProfileId};
use crate::vector_backend::VectorBackend;
use chrono::{DateTime, Utc};
use futures::future::BoxFuture;
use std::sync::Arc;
use tokio::sync::OnceCell;

/// Profiles embedded per provider call
pub const DEFAULT_BATCH_SIZE: usize = 32;

/// Read-only handle to a built index
#[derive(Clone)]
pub struct IndexHandle {
    backend: Arc<dyn VectorBackend>,
    embedder: Arc<dyn EmbeddingProvider>,
    profile_count: usize,
    built_at: DateTime<Utc>,
}

impl std::fmt::Debug for IndexHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndexHandle")
            .field("backend", &self.backend.name())
            .field("embedder", &self.embedder.name())
            .field("profile_count", &self.profile_count)
            .field("built_at", &self.built_at)
            .finish()
    }
}

impl IndexHandle {
    pub fn backend(&self) -> &Arc<dyn VectorBackend> {
        &self.backend
    }

    pub fn embedder(&self) -> &Arc<dyn EmbeddingProvider> {
        &self.embedder
    }

    pub fn profile_count(&self) -> usize {
        self.profile_count
    }

    pub fn built_at(&self) -> DateTime<Utc> {
        self.built_at
    }
}

/// Embed and store every profile; ids are positions in `profiles`
pub async fn build_index(
    profiles: &[Profile],
    embedder: Arc<dyn EmbeddingProvider>,
    backend: Arc<dyn VectorBackend>,
    batch_size: usize,
) -> Result<IndexHandle> {
    if embedder.dimension() != backend.dimension() {
        return Err(ScoutError::Configuration(format!(
            "embedder '{}' produces {} dimensions but backend '{}' expects {}",
            embedder.name(),
            embedder.dimension(),
            backend.name(),
            backend.dimension()
        )));
    }

    let batch_size = batch_size.max(1);
    tracing::info!(
        profiles = profiles.len(),
        embedder = embedder.name(),
        backend = backend.name(),
        "building profile index"
    );

    for (batch_no, chunk) in profiles.chunks(batch_size).enumerate() {
        let texts: Vec<String> = chunk.iter().map(|p| p.raw_text.clone()).collect();
        let vectors = embedder.embed(&texts).await?;
        if vectors.len() != chunk.len() {
            return Err(ScoutError::Embedding(format!(
                "expected {} vectors, got {}",
                chunk.len(),
                vectors.len()
            )));
        }

        let offset = batch_no * batch_size;
        for (i, (profile, vector)) in chunk.iter().zip(vectors).enumerate() {
            let id = (offset + i) as ProfileId;
            backend.upsert(id, &vector, profile.to_metadata()).await?;
        }
        tracing::debug!(batch = batch_no, size = chunk.len(), "indexed batch");
    }

    Ok(IndexHandle {
        backend,
        embedder,
        profile_count: profiles.len(),
        built_at: Utc::now(),
    })
}

type BuildFn = dyn Fn() -> BoxFuture<'static, Result<IndexHandle>> + Send + Sync;

/// Builds the index on first use.
///
/// Concurrent first callers wait on one build. A failed build leaves the cell
/// empty, so the next caller tries again.
pub struct LazyIndex {
    cell: OnceCell<IndexHandle>,
    build: Box<BuildFn>,
}

impl std::fmt::Debug for LazyIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LazyIndex")
            .field("initialized", &self.cell.initialized())
            .finish()
    }
}

impl LazyIndex {
    pub fn new<F>(build: F) -> Self
    where
        F: Fn() -> BoxFuture<'static, Result<IndexHandle>> + Send + Sync + 'static,
    {
        Self {
            cell: OnceCell::new(),
            build: Box::new(build),
        }
    }

    /// Wrap an index that is already built
    pub fn ready(handle: IndexHandle) -> Self {
        Self {
            cell: OnceCell::new_with(Some(handle)),
            build: Box::new(|| -> BoxFuture<'static, Result<IndexHandle>> {
                Box::pin(async {
                    Err(ScoutError::Configuration(
                        "prebuilt index cannot be rebuilt".into(),
                    ))
                })
            }),
        }
    }

    /// Get the index, building it if nobody has yet
    pub async fn get(&self) -> Result<&IndexHandle> {
        self.cell
            .get_or_try_init(|| async {
                let started = std::time::Instant::now();
                let handle = (self.build)().await?;
                tracing::info!(
                    profiles = handle.profile_count(),
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "profile index ready"
                );
                Ok(handle)
            })
            .await
    }

    pub fn is_built(&self) -> bool {
        self.cell.initialized()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::HashEmbeddingProvider;
    use crate::vector_backend::FlatVectorBackend;
    use futures::FutureExt;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn sample() -> Vec<Profile> {
        vec![
            Profile::new("A", "a@x", "Pune", "Rust, Tokio", 3, "Systems."),
            Profile::new("B", "b@x", "Delhi", "SQL, Tableau", 5, "Analyst."),
            Profile::new("C", "c@x", "Mysore", "Deep Learning, NLP", 7, "Research."),
        ]
    }

    fn parts(dim: usize) -> (Arc<dyn EmbeddingProvider>, Arc<dyn VectorBackend>) {
        (
            Arc::new(HashEmbeddingProvider::new(dim)),
            Arc::new(FlatVectorBackend::new("test", dim)),
        )
    }

    #[tokio::test]
    async fn build_assigns_positional_ids() {
        let (embedder, backend) = parts(64);
        let handle = build_index(&sample(), embedder.clone(), backend, 2)
            .await
            .unwrap();
        assert_eq!(handle.profile_count(), 3);
        assert_eq!(handle.backend().len().await, 3);

        let q = embedder.embed_one("Deep Learning, NLP").await.unwrap();
        let hits = handle.backend().search(&q, 1).await.unwrap();
        assert_eq!(hits[0].id, 2);
        assert_eq!(hits[0].metadata["name"], "C");
    }

    #[tokio::test]
    async fn dimension_mismatch_is_rejected() {
        let embedder: Arc<dyn EmbeddingProvider> = Arc::new(HashEmbeddingProvider::new(8));
        let backend: Arc<dyn VectorBackend> = Arc::new(FlatVectorBackend::new("test", 16));
        let err = build_index(&sample(), embedder, backend, 8).await.unwrap_err();
        assert!(matches!(err, ScoutError::Configuration(_)));
    }

    #[tokio::test]
    async fn concurrent_first_callers_build_once() {
        let builds = Arc::new(AtomicUsize::new(0));
        let counter = builds.clone();
        let lazy = Arc::new(LazyIndex::new(move || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                tokio::time::sleep(std::time::Duration::from_millis(20)).await;
                let (embedder, backend) = parts(32);
                build_index(&sample(), embedder, backend, DEFAULT_BATCH_SIZE).await
            }
            .boxed()
        }));

        let tasks: Vec<_> = (0..8)
            .map(|_| {
                let lazy = lazy.clone();
                tokio::spawn(async move { lazy.get().await.map(|h| h.profile_count()) })
            })
            .collect();
        for t in tasks {
            assert_eq!(t.await.unwrap().unwrap(), 3);
        }

        assert!(lazy.is_built());
        lazy.get().await.unwrap();
        assert_eq!(builds.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failed_build_is_retried() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let counter = attempts.clone();
        let lazy = LazyIndex::new(move || {
            let counter = counter.clone();
            async move {
                if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                    return Err(ScoutError::Dataset("not yet".into()));
                }
                let (embedder, backend) = parts(32);
                build_index(&sample(), embedder, backend, DEFAULT_BATCH_SIZE).await
            }
            .boxed()
        });

        assert!(lazy.get().await.is_err());
        assert!(!lazy.is_built());
        assert_eq!(lazy.get().await.unwrap().profile_count(), 3);
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
    }
}
