use std::time::Duration;

use axum::extract::FromRef;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use time::{Duration as TimeDuration, OffsetDateTime};
use tracing::debug;

use crate::{config::JwtConfig, state::AppState};

/// JWT payload: subject email and absolute expiry.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
}

#[derive(Clone)]
pub struct JwtKeys {
    pub encoding: EncodingKey,
    pub decoding: DecodingKey,
    pub default_ttl: Duration,
    pub session_ttl: Duration,
}

impl FromRef<AppState> for JwtKeys {
    fn from_ref(state: &AppState) -> Self {
        let JwtConfig {
            secret,
            ttl_minutes,
            session_ttl_minutes,
        } = state.config.jwt.clone();
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            default_ttl: Duration::from_secs((ttl_minutes as u64) * 60),
            session_ttl: Duration::from_secs((session_ttl_minutes as u64) * 60),
        }
    }
}

impl JwtKeys {
    pub fn sign_with_ttl(&self, email: &str, ttl: Duration) -> anyhow::Result<String> {
        let exp = OffsetDateTime::now_utc() + TimeDuration::seconds(ttl.as_secs() as i64);
        let claims = Claims {
            sub: email.to_string(),
            exp: exp.unix_timestamp() as usize,
        };
        let token = encode(&Header::default(), &claims, &self.encoding)?;
        debug!(email = %email, "jwt signed");
        Ok(token)
    }

    pub fn sign(&self, email: &str) -> anyhow::Result<String> {
        self.sign_with_ttl(email, self.default_ttl)
    }

    /// Login/OAuth tokens carry the longer session TTL.
    pub fn sign_session(&self, email: &str) -> anyhow::Result<String> {
        self.sign_with_ttl(email, self.session_ttl)
    }

    /// Verify signature, algorithm and expiry; returns the subject email.
    pub fn verify(&self, token: &str) -> anyhow::Result<String> {
        let mut validation = Validation::default();
        validation.leeway = 0;
        let data = decode::<Claims>(token, &self.decoding, &validation)?;
        debug!(email = %data.claims.sub, "jwt verified");
        Ok(data.claims.sub)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_keys(secret: &str) -> JwtKeys {
        JwtKeys {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            default_ttl: Duration::from_secs(15 * 60),
            session_ttl: Duration::from_secs(30 * 60),
        }
    }

    #[tokio::test]
    async fn sign_and_verify_subject_roundtrip() {
        let keys = make_keys("dev-secret");
        let token = keys.sign_session("alice@example.com").expect("sign");
        let subject = keys.verify(&token).expect("verify");
        assert_eq!(subject, "alice@example.com");
    }

    #[tokio::test]
    async fn verify_rejects_expired_token() {
        let keys = make_keys("dev-secret");
        let token = keys
            .sign_with_ttl("alice@example.com", Duration::ZERO)
            .expect("sign");
        // exp has second granularity; step past it.
        tokio::time::sleep(Duration::from_millis(1100)).await;
        assert!(keys.verify(&token).is_err());
    }

    #[tokio::test]
    async fn verify_rejects_foreign_secret() {
        let keys = make_keys("dev-secret");
        let other = make_keys("other-secret");
        let token = keys.sign("alice@example.com").expect("sign");
        assert!(other.verify(&token).is_err());
    }

    #[tokio::test]
    async fn verify_rejects_garbage() {
        let keys = make_keys("dev-secret");
        assert!(keys.verify("not-a-jwt").is_err());
    }
}
