use axum::{routing::post, Router};

use crate::state::AppState;

pub mod dto;
pub mod handlers;
pub mod parse;
pub mod prompts;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/review", post(handlers::review))
        .route("/rewrite", post(handlers::rewrite))
}
