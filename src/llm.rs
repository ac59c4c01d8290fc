use std::time::Duration;

use serde::Serialize;
use thiserror::Error;
use tracing::warn;

use crate::config::LlmConfig;

const INITIAL_BACKOFF: Duration = Duration::from_secs(1);

/// Upstream model failure. Orchestrators catch this at their boundary and
/// degrade instead of propagating.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("model API {status}: {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("malformed model response")]
    MalformedResponse,
    #[error("exhausted retries")]
    ExhaustedRetries,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<serde_json::Value>,
    temperature: f32,
    max_tokens: u32,
}

/// Chat-completions client for Groq's OpenAI-compatible API. Applies the
/// configured request timeout and retries 429/5xx/transport errors with
/// doubling backoff up to `retry_attempts` total attempts.
pub struct ChatClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
    retry_attempts: u32,
}

impl ChatClient {
    pub fn new(config: &LlmConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            retry_attempts: config.retry_attempts,
        })
    }

    /// One system+user completion; returns the reply text.
    pub async fn complete(
        &self,
        system: &str,
        user: &str,
        temperature: f32,
        max_tokens: u32,
    ) -> Result<String, LlmError> {
        let body = ChatRequest {
            model: &self.model,
            messages: vec![
                serde_json::json!({"role": "system", "content": system}),
                serde_json::json!({"role": "user", "content": user}),
            ],
            temperature,
            max_tokens,
        };
        let url = format!("{}/chat/completions", self.base_url);

        let attempts = self.retry_attempts.max(1);
        let mut delay = INITIAL_BACKOFF;

        for attempt in 0..attempts {
            match self
                .http
                .post(&url)
                .bearer_auth(&self.api_key)
                .json(&body)
                .send()
                .await
            {
                Ok(resp) => {
                    let status = resp.status();
                    if status.is_success() {
                        let value: serde_json::Value = resp.json().await?;
                        return value["choices"][0]["message"]["content"]
                            .as_str()
                            .map(str::to_string)
                            .ok_or(LlmError::MalformedResponse);
                    }
                    let body = resp.text().await.unwrap_or_default();
                    let retryable = status.as_u16() == 429 || status.is_server_error();
                    if retryable && attempt + 1 < attempts {
                        warn!(
                            attempt = attempt + 1,
                            %status,
                            retry_in = ?delay,
                            "model API retryable error, retrying"
                        );
                        tokio::time::sleep(delay).await;
                        delay *= 2;
                    } else {
                        return Err(LlmError::Api { status, body });
                    }
                }
                Err(e) => {
                    if attempt + 1 < attempts {
                        warn!(attempt = attempt + 1, error = %e, "HTTP error, retrying");
                        tokio::time::sleep(delay).await;
                        delay *= 2;
                    } else {
                        return Err(e.into());
                    }
                }
            }
        }

        Err(LlmError::ExhaustedRetries)
    }
}
