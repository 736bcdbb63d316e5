use async_trait::async_trait;
use serde_json::Value;

use crate::error::StoreError;

/// A listed key together with the metadata attached at write time.
#[derive(Debug, Clone, PartialEq)]
pub struct KvEntry {
    pub name: String,
    pub metadata: Option<Value>,
}

/// Key-value store trait - abstraction over KV backends (Redis, in-memory).
///
/// No transactional guarantees are assumed.
#[async_trait]
pub trait KvStore: Send + Sync {
    /// List every key, in ascending lexicographic order.
    async fn list(&self) -> Result<Vec<KvEntry>, StoreError>;

    /// Get the value stored under `name`.
    async fn get(&self, name: &str) -> Result<Option<String>, StoreError>;

    /// Store `value` under `name`, replacing any previous value and metadata.
    async fn put(&self, name: &str, value: &str, metadata: Option<Value>)
    -> Result<(), StoreError>;
}
