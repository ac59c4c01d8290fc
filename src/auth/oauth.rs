//! Mocked OAuth identities for the demo build. There is no token exchange
//! or identity verification here; real deployments must replace this with
//! a genuine provider flow before exposing the routes.

use axum::extract::FromRef;
use tracing::info;

use crate::{
    auth::{dto::TokenResponse, jwt::JwtKeys, password},
    error::ApiError,
    state::AppState,
    store::StoreError,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityProvider {
    GitHub,
    Google,
}

/// The fixed synthetic identity a provider resolves to.
pub struct ProviderIdentity {
    pub email: &'static str,
    pub name: &'static str,
    /// Hashed into the placeholder password_hash so the account cannot be
    /// entered via the password login path with an empty secret.
    pub hash_tag: &'static str,
}

impl IdentityProvider {
    pub fn identity(self) -> ProviderIdentity {
        match self {
            IdentityProvider::GitHub => ProviderIdentity {
                email: "demo.github@example.com",
                name: "GitHub Demo",
                hash_tag: "github_oauth",
            },
            IdentityProvider::Google => ProviderIdentity {
                email: "demo.google@example.com",
                name: "Google Demo",
                hash_tag: "google_oauth",
            },
        }
    }
}

/// Resolve the provider identity, registering it on first use, and issue
/// the same token envelope as password login.
pub async fn mock_oauth_login(
    state: &AppState,
    provider: IdentityProvider,
) -> Result<TokenResponse, ApiError> {
    let identity = provider.identity();

    let user = match state.users.find_by_email(identity.email).await {
        Some(u) => u,
        None => {
            let hash = password::hash_password(identity.hash_tag);
            match state
                .users
                .insert(identity.email, identity.name, &hash)
                .await
            {
                Ok(u) => u,
                // Two first-use calls can race; the loser reads the winner's row.
                Err(StoreError::DuplicateEmail) => state
                    .users
                    .find_by_email(identity.email)
                    .await
                    .ok_or(ApiError::Unauthorized)?,
            }
        }
    };

    let keys = JwtKeys::from_ref(state);
    let access_token = keys.sign_session(&user.email)?;

    info!(user_id = user.id, email = %user.email, provider = ?provider, "mock oauth login");
    Ok(TokenResponse {
        access_token,
        token_type: "bearer".into(),
        user,
    })
}
