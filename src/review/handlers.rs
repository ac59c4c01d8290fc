use axum::{extract::State, Json};
use tracing::{error, info, instrument};

use crate::{auth::extractors::CurrentUser, state::AppState};

use super::dto::{CodeRequest, ReviewResponse, RewriteResponse};
use super::{parse, prompts};

const REVIEW_TEMPERATURE: f32 = 0.3;
const REVIEW_MAX_TOKENS: u32 = 1000;
const REWRITE_TEMPERATURE: f32 = 0.2;
const REWRITE_MAX_TOKENS: u32 = 1500;

const UPSTREAM_HINT: &str = "Please try again or check your API configuration";

#[instrument(skip(state, user, payload))]
pub async fn review(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(payload): Json<CodeRequest>,
) -> Json<ReviewResponse> {
    let prompt = prompts::review_prompt(&payload.code, &payload.language);

    match state
        .llm
        .complete(
            prompts::REVIEW_SYSTEM_PROMPT,
            &prompt,
            REVIEW_TEMPERATURE,
            REVIEW_MAX_TOKENS,
        )
        .await
    {
        Ok(reply) => {
            let (review, suggestions) = parse::parse_review(&reply);
            info!(user_id = user.id, language = %payload.language, "review completed");
            Json(ReviewResponse {
                review,
                suggestions,
                degraded: false,
            })
        }
        Err(e) => {
            error!(error = %e, user_id = user.id, "model call failed, degrading review");
            Json(ReviewResponse {
                review: format!("Error during code review: {e}"),
                suggestions: vec![UPSTREAM_HINT.into()],
                degraded: true,
            })
        }
    }
}

#[instrument(skip(state, user, payload))]
pub async fn rewrite(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(payload): Json<CodeRequest>,
) -> Json<RewriteResponse> {
    let prompt = prompts::rewrite_prompt(&payload.code);

    match state
        .llm
        .complete(
            prompts::REWRITE_SYSTEM_PROMPT,
            &prompt,
            REWRITE_TEMPERATURE,
            REWRITE_MAX_TOKENS,
        )
        .await
    {
        Ok(reply) => {
            let (rewritten_code, improvements) = parse::parse_rewrite(&reply);
            info!(user_id = user.id, language = %payload.language, "rewrite completed");
            Json(RewriteResponse {
                rewritten_code,
                improvements,
                degraded: false,
            })
        }
        Err(e) => {
            error!(error = %e, user_id = user.id, "model call failed, degrading rewrite");
            Json(RewriteResponse {
                rewritten_code: format!("Error during code rewrite: {e}"),
                improvements: vec![UPSTREAM_HINT.into()],
                degraded: true,
            })
        }
    }
}
