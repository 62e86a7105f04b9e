use crate::error::{Result, ScoutError};
use crate::types::{Candidate, Metadata, ProfileId};
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

/// Stores `(id, vector, metadata)` triples and answers k-nearest queries.
#[async_trait]
pub trait VectorBackend: Send + Sync {
    fn name(&self) -> &'static str;
    fn dimension(&self) -> usize;

    /// Number of stored vectors
    async fn len(&self) -> usize;

    async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Insert or replace the entry for `id`
    async fn upsert(&self, id: ProfileId, vector: &[f32], metadata: Metadata) -> Result<()>;

    /// Up to `k` nearest entries, best match first
    async fn search(&self, vector: &[f32], k: usize) -> Result<Vec<Candidate>>;
}

#[derive(Debug, Clone)]
struct Entry {
    vector: Vec<f32>,
    metadata: Metadata,
}

/// Brute-force cosine index held in memory.
///
/// Ties in score go to the lower id, so a fixed index state and query vector
/// always give the same ordering.
#[derive(Debug)]
pub struct FlatVectorBackend {
    collection: String,
    dimension: usize,
    entries: RwLock<BTreeMap<ProfileId, Entry>>,
}

impl FlatVectorBackend {
    pub fn new(collection: impl Into<String>, dimension: usize) -> Self {
        Self {
            collection: collection.into(),
            dimension,
            entries: RwLock::new(BTreeMap::new()),
        }
    }

    /// Fresh collection named after the current time, one per index build
    pub fn timestamped(dimension: usize) -> Self {
        Self::new(
            format!("profiles_{}", chrono::Utc::now().timestamp()),
            dimension,
        )
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    fn check_vector(&self, vector: &[f32]) -> Result<()> {
        if vector.len() != self.dimension {
            return Err(ScoutError::VectorIndex(format!(
                "Vector dimension mismatch: got {}, expected {}",
                vector.len(),
                self.dimension
            )));
        }
        if let Some(pos) = vector.iter().position(|v| !v.is_finite()) {
            return Err(ScoutError::VectorIndex(format!(
                "Vector component {} is not finite",
                pos
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl VectorBackend for FlatVectorBackend {
    fn name(&self) -> &'static str {
        "flat"
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    async fn upsert(&self, id: ProfileId, vector: &[f32], metadata: Metadata) -> Result<()> {
        self.check_vector(vector)?;
        self.entries.write().await.insert(
            id,
            Entry {
                vector: vector.to_vec(),
                metadata,
            },
        );
        Ok(())
    }

    async fn search(&self, vector: &[f32], k: usize) -> Result<Vec<Candidate>> {
        self.check_vector(vector)?;
        if k == 0 {
            return Ok(Vec::new());
        }

        let entries = self.entries.read().await;
        let mut scored: Vec<(ProfileId, f32)> = entries
            .iter()
            .map(|(id, entry)| (*id, cosine_similarity(vector, &entry.vector)))
            .collect();

        scored.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
        scored.truncate(k);

        Ok(scored
            .into_iter()
            .filter_map(|(id, score)| {
                entries.get(&id).map(|entry| Candidate {
                    id,
                    score,
                    metadata: entry.metadata.clone(),
                })
            })
            .collect())
    }
}

/// Compute cosine similarity between two vectors
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot_product / (norm_a * norm_b)
}
