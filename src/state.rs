use std::sync::Arc;

use crate::config::AppConfig;
use crate::llm::ChatClient;
use crate::store::{MemoryUserStore, UserStore};

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub config: Arc<AppConfig>,
    pub llm: Arc<ChatClient>,
}

impl AppState {
    pub fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);
        let llm = Arc::new(ChatClient::new(&config.llm)?);
        let users = Arc::new(MemoryUserStore::new()) as Arc<dyn UserStore>;
        Ok(Self { users, config, llm })
    }

    pub fn from_parts(
        users: Arc<dyn UserStore>,
        config: Arc<AppConfig>,
        llm: Arc<ChatClient>,
    ) -> Self {
        Self { users, config, llm }
    }

    /// Test state: fresh in-memory store, fixed secret, upstream pointed at
    /// an unreachable port so model calls fail fast.
    pub fn fake() -> Self {
        use crate::config::{JwtConfig, LlmConfig};

        let config = Arc::new(AppConfig {
            jwt: JwtConfig {
                secret: "test".into(),
                ttl_minutes: 5,
                session_ttl_minutes: 30,
            },
            llm: LlmConfig {
                api_key: "test".into(),
                base_url: "http://127.0.0.1:1".into(),
                model: "llama-3.3-70b-versatile".into(),
                timeout_secs: 1,
                retry_attempts: 1,
            },
        });
        let llm = Arc::new(ChatClient::new(&config.llm).expect("client builds"));
        Self::from_parts(Arc::new(MemoryUserStore::new()), config, llm)
    }
}
