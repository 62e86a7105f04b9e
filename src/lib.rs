//! # Profilescout - semantic candidate search with experience filtering
//!
//! Profiles are embedded into vectors and stored in a vector index built once
//! per process. A query is embedded, the nearest `fan_out` profiles are
//! fetched, and any experience threshold found in the query ("python 3 years")
//! removes profiles that do not strictly exceed it, keeping similarity order.
//!
//! ```rust,no_run
//! use profilescout::{generate_profiles, DatasetConfig, ProfileSearch, SearchConfig};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let profiles = generate_profiles(&DatasetConfig::default().with_seed(42))?;
//!     let search = ProfileSearch::in_memory(Arc::new(profiles), SearchConfig::default())?;
//!     let outcome = search.search("machine learning 3+ years").await?;
//!     println!("{} profiles", outcome.profiles().len());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod dataset;
pub mod embedding;
pub mod error;
pub mod filter;
pub mod index;
pub mod query;
pub mod search;
pub mod types;
pub mod vector_backend;

pub use config::{SearchConfig, SearchConfigBuilder, DEFAULT_FAN_OUT};
pub use dataset::{generate_profiles, load_csv, load_or_generate, save_csv, DatasetConfig};
pub use embedding::{EmbeddingProvider, HashEmbeddingProvider, DEFAULT_DIMENSION};
pub use error::{Result, ScoutError};
pub use filter::{
    filter_candidates, FilterReport, RejectReason, Rejection, DEFAULT_DISPLAY_CAP,
};
pub use index::{build_index, IndexHandle, LazyIndex, DEFAULT_BATCH_SIZE};
pub use query::{extract_threshold, validate_query, SearchQuery, ThresholdPolicy};
pub use search::ProfileSearch;
pub use types::{Candidate, Experience, Metadata, Profile, ProfileId, SearchOutcome};
pub use vector_backend::{cosine_similarity, FlatVectorBackend, VectorBackend};
