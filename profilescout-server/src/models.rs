use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct FormQuery {
    pub q: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub q: String,
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
