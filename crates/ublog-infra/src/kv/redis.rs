//! Redis key-value store.
//!
//! Layout under `prefix`:
//! - `{prefix}:index` - sorted set of all names, every score `0`, so `ZRANGE`
//!   enumerates in lexicographic order
//! - `{prefix}:value:{name}` - the stored value
//! - `{prefix}:meta:{name}` - JSON metadata, absent when none was given

use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};
use serde_json::Value;

use ublog_core::StoreError;
use ublog_core::ports::{KvEntry, KvStore};

/// Redis connection configuration.
#[derive(Debug, Clone)]
pub struct RedisConfig {
    /// Redis URL (e.g., redis://localhost:6379)
    pub url: String,
    /// Namespace for every key this store touches
    pub key_prefix: String,
    /// Connection timeout
    pub connect_timeout: Duration,
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            url: "redis://localhost:6379".to_string(),
            key_prefix: "ublog:posts".to_string(),
            connect_timeout: Duration::from_secs(5),
        }
    }
}

impl RedisConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            url: std::env::var("REDIS_URL")
                .unwrap_or_else(|_| "redis://localhost:6379".to_string()),
            key_prefix: std::env::var("REDIS_KEY_PREFIX")
                .unwrap_or_else(|_| "ublog:posts".to_string()),
            connect_timeout: Duration::from_secs(
                std::env::var("REDIS_CONNECT_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(5),
            ),
        }
    }
}

/// Redis-backed key-value store.
///
/// Uses connection manager for automatic reconnection.
pub struct RedisKvStore {
    conn: ConnectionManager,
    config: RedisConfig,
}

impl RedisKvStore {
    pub async fn new(config: RedisConfig) -> Result<Self, StoreError> {
        let client = Client::open(config.url.as_str())
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        // Use timeout to prevent hanging if Redis is unreachable
        let conn = tokio::time::timeout(config.connect_timeout, ConnectionManager::new(client))
            .await
            .map_err(|_| StoreError::Unavailable("Connection timed out".to_string()))?
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        tracing::info!(url = %config.url, prefix = %config.key_prefix, "Connected to Redis KV store");

        Ok(Self { conn, config })
    }

    /// Create from environment configuration.
    pub async fn from_env() -> Result<Self, StoreError> {
        Self::new(RedisConfig::from_env()).await
    }

    fn index_key(&self) -> String {
        format!("{}:index", self.config.key_prefix)
    }

    fn value_key(&self, name: &str) -> String {
        format!("{}:value:{}", self.config.key_prefix, name)
    }

    fn meta_key(&self, name: &str) -> String {
        format!("{}:meta:{}", self.config.key_prefix, name)
    }
}

fn unavailable(e: redis::RedisError) -> StoreError {
    StoreError::Unavailable(e.to_string())
}

#[async_trait]
impl KvStore for RedisKvStore {
    async fn list(&self) -> Result<Vec<KvEntry>, StoreError> {
        let mut conn = self.conn.clone();

        let names: Vec<String> = conn
            .zrange(self.index_key(), 0, -1)
            .await
            .map_err(unavailable)?;
        if names.is_empty() {
            return Ok(Vec::new());
        }

        let meta_keys: Vec<String> = names.iter().map(|name| self.meta_key(name)).collect();
        let raw_metadata: Vec<Option<String>> =
            conn.mget(meta_keys).await.map_err(unavailable)?;

        Ok(names
            .into_iter()
            .zip(raw_metadata)
            .map(|(name, raw)| {
                let metadata = raw.and_then(|json| match serde_json::from_str(&json) {
                    Ok(value) => Some(value),
                    Err(e) => {
                        tracing::warn!(name = %name, error = %e, "Discarding unreadable metadata");
                        None
                    }
                });
                KvEntry { name, metadata }
            })
            .collect())
    }

    async fn get(&self, name: &str) -> Result<Option<String>, StoreError> {
        let mut conn = self.conn.clone();
        conn.get(self.value_key(name)).await.map_err(unavailable)
    }

    async fn put(
        &self,
        name: &str,
        value: &str,
        metadata: Option<Value>,
    ) -> Result<(), StoreError> {
        let mut conn = self.conn.clone();

        let mut pipe = redis::pipe();
        pipe.atomic().set(self.value_key(name), value).ignore();
        match metadata {
            Some(metadata) => {
                let json = serde_json::to_string(&metadata)
                    .map_err(|e| StoreError::Serialization(e.to_string()))?;
                pipe.set(self.meta_key(name), json).ignore();
            }
            None => {
                pipe.del(self.meta_key(name)).ignore();
            }
        }
        pipe.zadd(self.index_key(), name, 0).ignore();

        let _: () = pipe.query_async(&mut conn).await.map_err(unavailable)?;
        Ok(())
    }
}
