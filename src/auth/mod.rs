use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub mod dto;
pub(crate) mod extractors;
pub mod handlers;
pub mod jwt;
#[cfg(feature = "demo")]
pub mod oauth;
pub mod password;

pub fn router() -> Router<AppState> {
    let router = Router::new()
        .route("/auth/signup", post(handlers::signup))
        .route("/auth/login", post(handlers::login))
        .route("/auth/me", get(handlers::me));

    #[cfg(feature = "demo")]
    let router = router
        .route("/auth/github", post(handlers::github_login))
        .route("/auth/google", post(handlers::google_login))
        .route(
            "/auth/users",
            get(handlers::list_users).delete(handlers::clear_users),
        )
        .route("/auth/reset", get(handlers::reset_signup));

    router
}
