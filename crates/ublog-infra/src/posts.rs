//! Post store adapter over any key-value backend.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use futures::future::try_join_all;

use ublog_core::domain::{ContentInput, Post, PostMetadata, generate_key};
use ublog_core::ports::{KvStore, PostStore};
use ublog_core::{DomainError, StoreError};

/// Posts stored one per key: the value is the content, author and timestamp
/// ride along as metadata.
///
/// Listing order is whatever the backend enumerates; newest-first comes from
/// the key scheme, not from sorting here.
pub struct KvPostStore {
    kv: Arc<dyn KvStore>,
}

impl KvPostStore {
    pub fn new(kv: Arc<dyn KvStore>) -> Self {
        Self { kv }
    }
}

#[async_trait]
impl PostStore for KvPostStore {
    async fn list_posts(&self) -> Result<Vec<Post>, StoreError> {
        let entries = self.kv.list().await?;

        let fetches = entries.into_iter().map(|entry| async move {
            let content = self.kv.get(&entry.name).await?;
            if content.is_none() {
                tracing::debug!(key = %entry.name, "Listed key has no value, skipping");
            }
            Ok::<_, StoreError>(content.map(|content| (entry, content)))
        });

        let posts = try_join_all(fetches)
            .await?
            .into_iter()
            .flatten()
            .map(|(entry, content)| {
                let metadata = entry
                    .metadata
                    .and_then(|value| serde_json::from_value::<PostMetadata>(value).ok());
                Post::from_record(entry.name, content, metadata)
            })
            .collect();

        Ok(posts)
    }

    async fn create_post(&self, content: ContentInput, author: &str) -> Result<Post, DomainError> {
        let content = Post::validate_content(content)?;

        let key = generate_key();
        let metadata = PostMetadata::new(author, Utc::now());
        let metadata_json = serde_json::to_value(&metadata)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;

        self.kv.put(&key, &content, Some(metadata_json)).await?;
        tracing::debug!(key = %key, "Post written to store");

        Ok(Post::from_record(key, content, Some(metadata)))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use serde_json::{Value, json};
    use ublog_core::ValidationError;
    use ublog_core::ports::KvEntry;

    use super::*;
    use crate::kv::InMemoryKvStore;

    /// Enumerates keys in insertion order and counts writes.
    #[derive(Default)]
    struct SpyKvStore {
        records: tokio::sync::Mutex<Vec<(String, String, Option<Value>)>>,
        puts: AtomicUsize,
        offline: bool,
    }

    #[async_trait]
    impl KvStore for SpyKvStore {
        async fn list(&self) -> Result<Vec<KvEntry>, StoreError> {
            if self.offline {
                return Err(StoreError::Unavailable("connection refused".to_string()));
            }
            let records = self.records.lock().await;
            Ok(records
                .iter()
                .map(|(name, _, metadata)| KvEntry {
                    name: name.clone(),
                    metadata: metadata.clone(),
                })
                .collect())
        }

        async fn get(&self, name: &str) -> Result<Option<String>, StoreError> {
            let records = self.records.lock().await;
            Ok(records
                .iter()
                .find(|(n, _, _)| n == name)
                .map(|(_, value, _)| value.clone()))
        }

        async fn put(
            &self,
            name: &str,
            value: &str,
            metadata: Option<Value>,
        ) -> Result<(), StoreError> {
            self.puts.fetch_add(1, Ordering::SeqCst);
            self.records
                .lock()
                .await
                .push((name.to_string(), value.to_string(), metadata));
            Ok(())
        }
    }

    fn keys(posts: &[Post]) -> Vec<&str> {
        posts.iter().map(|p| p.key.as_str()).collect()
    }

    #[tokio::test]
    async fn test_list_preserves_store_enumeration_order() {
        let kv = Arc::new(SpyKvStore::default());
        for name in ["C", "A", "B"] {
            kv.put(name, name, None).await.unwrap();
        }
        let store = KvPostStore::new(kv);

        let posts = store.list_posts().await.unwrap();

        assert_eq!(keys(&posts), ["C", "A", "B"]);
    }

    #[tokio::test]
    async fn test_list_sorted_backend() {
        let kv = Arc::new(InMemoryKvStore::new());
        for name in ["A", "B", "C"] {
            kv.put(name, &format!("post {}", name), None).await.unwrap();
        }
        let store = KvPostStore::new(kv);

        let posts = store.list_posts().await.unwrap();

        assert_eq!(keys(&posts), ["A", "B", "C"]);
        assert_eq!(posts[0].content, "post A");
        assert_eq!(posts[0].author, None);
    }

    #[tokio::test]
    async fn test_list_reads_seeded_metadata() {
        let kv = Arc::new(InMemoryKvStore::new());
        kv.seed_mock_posts().await.unwrap();
        let store = KvPostStore::new(kv);

        let posts = store.list_posts().await.unwrap();

        assert_eq!(keys(&posts), ["1", "2", "3"]);
        assert_eq!(posts[0].author.as_deref(), Some("Jane Doe"));
        assert_eq!(
            posts[0].posted_at.map(|t| t.to_rfc3339()),
            Some("2022-08-10T14:34:00+00:00".to_string())
        );
    }

    #[tokio::test]
    async fn test_list_surfaces_unavailable_store() {
        let kv = Arc::new(SpyKvStore {
            offline: true,
            ..Default::default()
        });
        let store = KvPostStore::new(kv);

        let result = store.list_posts().await;

        assert!(matches!(result, Err(StoreError::Unavailable(_))));
    }

    #[tokio::test]
    async fn test_create_writes_content_and_metadata() {
        let kv = Arc::new(SpyKvStore::default());
        let store = KvPostStore::new(kv.clone());

        let post = store
            .create_post(ContentInput::Text("Hello there".into()), "octocat")
            .await
            .unwrap();

        assert_eq!(post.key.len(), 15);
        assert_eq!(post.author.as_deref(), Some("octocat"));
        assert!(post.posted_at.is_some());

        let records = kv.records.lock().await;
        assert_eq!(records.len(), 1);
        let (name, value, metadata) = &records[0];
        assert_eq!(name, &post.key);
        assert_eq!(value, "Hello there");
        let metadata = metadata.as_ref().unwrap();
        assert_eq!(metadata["author"], json!("octocat"));
        assert!(metadata["postedAt"].as_str().unwrap().ends_with('Z'));
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_content_without_writing() {
        let kv = Arc::new(SpyKvStore::default());
        let store = KvPostStore::new(kv.clone());

        let too_long = store
            .create_post(ContentInput::Text("z".repeat(281)), "octocat")
            .await;
        let binary = store.create_post(ContentInput::Binary, "octocat").await;
        let empty = store.create_post(ContentInput::Missing, "octocat").await;

        assert!(matches!(
            too_long,
            Err(DomainError::Validation(ValidationError::ContentTooLong { .. }))
        ));
        assert!(matches!(
            binary,
            Err(DomainError::Validation(ValidationError::InvalidContentType))
        ));
        assert!(matches!(
            empty,
            Err(DomainError::Validation(ValidationError::EmptyContent))
        ));
        assert_eq!(kv.puts.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_created_post_is_listed() {
        let kv = Arc::new(InMemoryKvStore::new());
        let store = KvPostStore::new(kv);

        store
            .create_post(ContentInput::Text("x".repeat(280)), "octocat")
            .await
            .unwrap();

        let posts = store.list_posts().await.unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].content.len(), 280);
        assert_eq!(posts[0].author.as_deref(), Some("octocat"));
    }
}
