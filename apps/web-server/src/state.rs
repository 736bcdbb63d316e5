//! Application state - shared across all handlers.

use std::sync::Arc;

use ublog_core::ports::{IdentityProvider, KvStore, PostStore};
use ublog_infra::{GitHubIdentityProvider, InMemoryKvStore, KvPostStore};

#[cfg(feature = "redis")]
use ublog_infra::RedisKvStore;

use crate::config::{AppConfig, StoreBackend};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostStore>,
    pub identity: Arc<dyn IdentityProvider>,
    /// Mark session cookies `Secure`.
    pub secure_cookies: bool,
}

impl AppState {
    /// Build the application state with the configured implementations.
    pub async fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let kv = Self::build_kv_store(config).await?;
        let identity = GitHubIdentityProvider::new(config.github.clone())?;

        tracing::info!("Application state initialized");

        Ok(Self::from_parts(
            Arc::new(KvPostStore::new(kv)),
            Arc::new(identity),
            config.production,
        ))
    }

    pub fn from_parts(
        posts: Arc<dyn PostStore>,
        identity: Arc<dyn IdentityProvider>,
        secure_cookies: bool,
    ) -> Self {
        Self {
            posts,
            identity,
            secure_cookies,
        }
    }

    async fn build_kv_store(config: &AppConfig) -> anyhow::Result<Arc<dyn KvStore>> {
        match config.store {
            StoreBackend::Memory => {
                let kv = InMemoryKvStore::new();
                if config.seed_mock_posts {
                    kv.seed_mock_posts().await?;
                }
                tracing::info!("Using in-memory post store - posts are lost on restart");
                Ok(Arc::new(kv))
            }
            #[cfg(feature = "redis")]
            StoreBackend::Redis => Ok(Arc::new(RedisKvStore::from_env().await?)),
            #[cfg(not(feature = "redis"))]
            StoreBackend::Redis => {
                anyhow::bail!("POST_STORE=redis requires the `redis` feature")
            }
        }
    }
}
