//! In-memory key-value store - used for local development and tests.

use std::collections::BTreeMap;

use async_trait::async_trait;
use futures::future::try_join_all;
use serde_json::{Value, json};
use tokio::sync::RwLock;

use ublog_core::StoreError;
use ublog_core::ports::{KvEntry, KvStore};

struct KvRecord {
    value: String,
    metadata: Option<Value>,
}

/// Demo posts written by [`InMemoryKvStore::seed_mock_posts`].
static MOCK_POSTS: [(&str, &str, &str, &str); 3] = [
    ("1", "Hello, world!", "Jane Doe", "2022-08-10T14:34:00.000Z"),
    ("2", "Hello ublog!", "Cody Reimer", "2022-08-10T13:27:00.000Z"),
    (
        "3",
        "Wow, this is pretty cool!",
        "Zoey Washington",
        "2022-08-10T12:00:00.000Z",
    ),
];

/// In-memory key-value store over an ordered map with an async RwLock.
///
/// Keys enumerate in ascending order, like a hosted KV namespace.
/// Note: Data is lost on process restart.
pub struct InMemoryKvStore {
    store: RwLock<BTreeMap<String, KvRecord>>,
}

impl InMemoryKvStore {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(BTreeMap::new()),
        }
    }

    /// Write the demo posts so a fresh dev server has something to show.
    pub async fn seed_mock_posts(&self) -> Result<(), StoreError> {
        try_join_all(
            MOCK_POSTS
                .iter()
                .map(|(key, content, author, posted_at)| {
                    self.put(
                        key,
                        content,
                        Some(json!({ "author": author, "postedAt": posted_at })),
                    )
                }),
        )
        .await?;

        tracing::info!(count = MOCK_POSTS.len(), "Seeded mock posts");
        Ok(())
    }

    /// Number of stored keys.
    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.store.read().await.is_empty()
    }
}

impl Default for InMemoryKvStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl KvStore for InMemoryKvStore {
    async fn list(&self) -> Result<Vec<KvEntry>, StoreError> {
        let store = self.store.read().await;
        Ok(store
            .iter()
            .map(|(name, record)| KvEntry {
                name: name.clone(),
                metadata: record.metadata.clone(),
            })
            .collect())
    }

    async fn get(&self, name: &str) -> Result<Option<String>, StoreError> {
        let store = self.store.read().await;
        Ok(store.get(name).map(|record| record.value.clone()))
    }

    async fn put(
        &self,
        name: &str,
        value: &str,
        metadata: Option<Value>,
    ) -> Result<(), StoreError> {
        let mut store = self.store.write().await;
        store.insert(
            name.to_string(),
            KvRecord {
                value: value.to_string(),
                metadata,
            },
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_and_get() {
        let kv = InMemoryKvStore::new();
        kv.put("key1", "value1", None).await.unwrap();
        assert_eq!(kv.get("key1").await.unwrap(), Some("value1".to_string()));
        assert_eq!(kv.get("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_list_is_sorted_and_carries_metadata() {
        let kv = InMemoryKvStore::new();
        kv.put("b", "2", Some(json!({"author": "bee"}))).await.unwrap();
        kv.put("a", "1", None).await.unwrap();
        kv.put("c", "3", None).await.unwrap();

        let entries = kv.list().await.unwrap();
        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();

        assert_eq!(names, ["a", "b", "c"]);
        assert_eq!(entries[1].metadata, Some(json!({"author": "bee"})));
    }

    #[tokio::test]
    async fn test_put_replaces_metadata() {
        let kv = InMemoryKvStore::new();
        kv.put("a", "1", Some(json!({"author": "x"}))).await.unwrap();
        kv.put("a", "2", None).await.unwrap();

        let entries = kv.list().await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].metadata, None);
        assert_eq!(kv.get("a").await.unwrap(), Some("2".to_string()));
    }

    #[tokio::test]
    async fn test_seed_mock_posts() {
        let kv = InMemoryKvStore::new();
        assert!(kv.is_empty().await);

        kv.seed_mock_posts().await.unwrap();

        assert_eq!(kv.len().await, 3);
        assert_eq!(kv.get("2").await.unwrap(), Some("Hello ublog!".to_string()));
    }
}
