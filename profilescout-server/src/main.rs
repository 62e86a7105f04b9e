use clap::Parser;
use futures::FutureExt;
use profilescout::{
    build_index, load_or_generate, EmbeddingProvider, FlatVectorBackend, HashEmbeddingProvider,
    LazyIndex, ProfileSearch, VectorBackend, DEFAULT_BATCH_SIZE,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod api;
mod config;
mod html;
mod models;
mod state;

use crate::config::Config;
use crate::state::AppState;

/// Index over the configured dataset, built on the first search
fn lazy_index(config: &Config) -> LazyIndex {
    let dataset = config.dataset.clone();
    let dataset_config = config.dataset_config();

    LazyIndex::new(move || {
        let dataset = dataset.clone();
        let dataset_config = dataset_config.clone();
        async move {
            let profiles = load_or_generate(&dataset, &dataset_config)?;
            let embedder: Arc<dyn EmbeddingProvider> = Arc::new(HashEmbeddingProvider::default());
            let backend = FlatVectorBackend::timestamped(embedder.dimension());
            tracing::info!(collection = backend.collection(), "creating collection");
            let backend: Arc<dyn VectorBackend> = Arc::new(backend);
            build_index(&profiles, embedder, backend, DEFAULT_BATCH_SIZE).await
        }
        .boxed()
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,profilescout=debug,tower_http=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::parse();
    tracing::info!(dataset = %config.dataset.display(), "Initializing profile search...");

    let search = ProfileSearch::new(Arc::new(lazy_index(&config)), config.search_config()?)?;
    let state = Arc::new(AppState { search });
    let app = api::router(state, config.cors);

    tracing::info!("Profilescout server listening on {}", config.addr);
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
