use async_trait::async_trait;

use crate::domain::{ContentInput, Post};
use crate::error::{DomainError, StoreError};

/// Post store - the posting surface handlers see.
#[async_trait]
pub trait PostStore: Send + Sync {
    /// All posts, in the order the underlying store enumerates their keys.
    async fn list_posts(&self) -> Result<Vec<Post>, StoreError>;

    /// Validate `content` and persist it as a new post by `author`.
    async fn create_post(&self, content: ContentInput, author: &str) -> Result<Post, DomainError>;
}
