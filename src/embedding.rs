use crate::error::{Result, ScoutError};
use async_trait::async_trait;

/// Dimensionality of all-MiniLM-L6-v2
pub const DEFAULT_DIMENSION: usize = 384;

/// Maps text to fixed-length vectors.
///
/// Implementations must be deterministic for identical input within one
/// process lifetime.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    fn name(&self) -> &'static str;
    fn dimension(&self) -> usize;

    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    /// Embed a single text
    async fn embed_one(&self, text: &str) -> Result<Vec<f32>> {
        self.embed(&[text.to_string()])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| ScoutError::Embedding("provider returned no vector".into()))
    }
}

/// Zero-config embedding provider.
///
/// Hashes lowercased words and adjacent word pairs into buckets, then
/// L2-normalises. Deterministic, offline, and nowhere near a learned model in
/// quality, but shared vocabulary does pull texts together.
#[derive(Debug, Clone)]
pub struct HashEmbeddingProvider {
    dimension: usize,
}

impl Default for HashEmbeddingProvider {
    fn default() -> Self {
        Self::new(DEFAULT_DIMENSION)
    }
}

impl HashEmbeddingProvider {
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension: dimension.max(1),
        }
    }

    fn fnv1a(parts: &[&str]) -> u64 {
        let mut hash = 1469598103934665603u64;
        for (i, part) in parts.iter().enumerate() {
            if i > 0 {
                hash ^= b' ' as u64;
                hash = hash.wrapping_mul(1099511628211u64);
            }
            for b in part.as_bytes() {
                hash ^= *b as u64;
                hash = hash.wrapping_mul(1099511628211u64);
            }
        }
        hash
    }

    fn vectorize(&self, text: &str) -> Vec<f32> {
        let mut vec = vec![0.0f32; self.dimension];
        let lowered = text.to_lowercase();
        let tokens: Vec<&str> = lowered
            .split(|c: char| !c.is_alphanumeric() && c != '+' && c != '#')
            .filter(|t| !t.is_empty())
            .collect();

        if tokens.is_empty() {
            return vec;
        }

        for token in &tokens {
            let idx = (Self::fnv1a(&[token]) % self.dimension as u64) as usize;
            vec[idx] += 1.0;
        }

        // Word pairs carry phrase signal ("machine learning" vs "learning machine")
        for pair in tokens.windows(2) {
            let idx = (Self::fnv1a(pair) % self.dimension as u64) as usize;
            vec[idx] += 0.5;
        }

        let norm = vec.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for v in &mut vec {
                *v /= norm;
            }
        }

        vec
    }
}

#[async_trait]
impl EmbeddingProvider for HashEmbeddingProvider {
    fn name(&self) -> &'static str {
        "hash"
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| self.vectorize(t)).collect())
    }
}
