use serde::{Deserialize, Serialize};

/// Request body shared by /review and /rewrite.
#[derive(Debug, Deserialize)]
pub struct CodeRequest {
    pub code: String,
    pub language: String,
}

/// Structured review. `degraded` is true when the upstream model call
/// failed and `review` carries the error text instead of a review.
#[derive(Debug, Serialize)]
pub struct ReviewResponse {
    pub review: String,
    pub suggestions: Vec<String>,
    pub degraded: bool,
}

/// Corrected code plus the model's improvement notes; `degraded` as above.
#[derive(Debug, Serialize)]
pub struct RewriteResponse {
    pub rewritten_code: String,
    pub improvements: Vec<String>,
    pub degraded: bool,
}
