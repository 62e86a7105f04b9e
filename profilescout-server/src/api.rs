use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Html,
    routing::get,
    Json, Router,
};
use profilescout::SearchOutcome;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::html;
use crate::models::{ErrorResponse, FormQuery, SearchRequest};
use crate::state::AppState;

pub fn router(state: Arc<AppState>, enable_cors: bool) -> Router {
    let mut router = Router::new()
        .route("/", get(search_page))
        .route("/api/search", get(search_api))
        .route("/health", get(health_check))
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    if enable_cors {
        router = router.layer(CorsLayer::permissive());
    }

    router
}

pub async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// Search form; runs the search when `q` is present
pub async fn search_page(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FormQuery>,
) -> (StatusCode, Html<String>) {
    let Some(query) = params.q else {
        return (StatusCode::OK, Html(html::render_form()));
    };

    match state.search.search(&query).await {
        Ok(outcome) => (StatusCode::OK, Html(html::render_outcome(&query, &outcome))),
        Err(e) => {
            tracing::error!("Search failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(html::render_failure(&query)),
            )
        }
    }
}

pub async fn search_api(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchRequest>,
) -> Result<Json<SearchOutcome>, (StatusCode, Json<ErrorResponse>)> {
    if params.limit == Some(0) {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "limit must be at least 1".into(),
            }),
        ));
    }

    match state.search.search(&params.q).await {
        Ok(mut outcome) => {
            if let (Some(limit), SearchOutcome::Results { profiles, .. }) =
                (params.limit, &mut outcome)
            {
                profiles.truncate(limit);
            }
            Ok(Json(outcome))
        }
        Err(e) => {
            tracing::error!("Search failed: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use profilescout::{generate_profiles, DatasetConfig, ProfileSearch, SearchConfig};
    use tower::ServiceExt;

    fn app() -> Router {
        let profiles = generate_profiles(&DatasetConfig::default().with_seed(21)).unwrap();
        let search = ProfileSearch::in_memory(Arc::new(profiles), SearchConfig::default()).unwrap();
        router(Arc::new(AppState { search }), false)
    }

    async fn get_body(app: Router, uri: &str) -> (StatusCode, String) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn health() {
        let (status, _) = get_body(app(), "/health").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn form_without_query() {
        let (status, body) = get_body(app(), "/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("<form"));
        assert!(!body.contains("Result 1"));
    }

    #[tokio::test]
    async fn blank_form_query_warns() {
        let (status, body) = get_body(app(), "/?q=+++").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Please enter a search query."));
    }

    #[tokio::test]
    async fn form_search_renders_results() {
        let (status, body) = get_body(app(), "/?q=python+machine+learning").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Matching Profiles"));
        assert!(body.contains("Result 1"));
    }

    #[tokio::test]
    async fn api_applies_threshold_and_limit() {
        let (status, body) = get_body(app(), "/api/search?q=data+2+years&limit=3").await;
        assert_eq!(status, StatusCode::OK);

        let value: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(value["threshold"], 2);
        if value["status"] == "results" {
            let profiles = value["profiles"].as_array().unwrap();
            assert!(profiles.len() <= 3);
            for p in profiles {
                assert!(p["metadata"]["experience_years"].as_i64().unwrap() > 2);
            }
        } else {
            assert_eq!(value["status"], "no_results");
        }
    }

    #[tokio::test]
    async fn api_rejects_zero_limit() {
        let (status, body) = get_body(app(), "/api/search?q=python&limit=0").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let value: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(value["error"], "limit must be at least 1");
    }

    #[tokio::test]
    async fn api_threshold_above_dataset_is_no_results() {
        let (_, body) = get_body(app(), "/api/search?q=python+40+years").await;
        let value: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(value["status"], "no_results");
    }
}
