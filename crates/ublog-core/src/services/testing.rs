//! Test doubles for the ports.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::domain::{ContentInput, Post, User};
use crate::error::{DomainError, StoreError};
use crate::ports::{AuthError, IdentityProvider, PostStore};

/// Identity provider that answers from fixed values and counts calls.
pub struct FakeProvider {
    pub token: Result<String, AuthError>,
    pub user: Result<User, AuthError>,
    pub exchange_calls: AtomicUsize,
    pub user_calls: AtomicUsize,
}

impl FakeProvider {
    pub fn issuing(token: &str) -> Self {
        Self {
            token: Ok(token.to_string()),
            user: Ok(octocat()),
            exchange_calls: AtomicUsize::new(0),
            user_calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(error: AuthError) -> Self {
        Self {
            token: Err(error.clone()),
            user: Err(error),
            exchange_calls: AtomicUsize::new(0),
            user_calls: AtomicUsize::new(0),
        }
    }

    pub fn exchanges(&self) -> usize {
        self.exchange_calls.load(Ordering::SeqCst)
    }

    pub fn user_lookups(&self) -> usize {
        self.user_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IdentityProvider for FakeProvider {
    fn new_state(&self) -> String {
        "fake-state".to_string()
    }

    fn authorize_url(&self, state: &str) -> String {
        format!("https://idp.test/authorize?client_id=test&state={}", state)
    }

    async fn exchange_code(&self, _code: &str) -> Result<String, AuthError> {
        self.exchange_calls.fetch_add(1, Ordering::SeqCst);
        self.token.clone()
    }

    async fn fetch_user(&self, _access_token: &str) -> Result<User, AuthError> {
        self.user_calls.fetch_add(1, Ordering::SeqCst);
        self.user.clone()
    }
}

pub fn octocat() -> User {
    User {
        login: "octocat".to_string(),
        name: Some("The Octocat".to_string()),
        avatar_url: None,
    }
}

/// Post store that validates like the real adapter and records every call.
#[derive(Default)]
pub struct SpyPostStore {
    pub posts: Mutex<Vec<Post>>,
    pub create_calls: AtomicUsize,
    pub unavailable: bool,
}

impl SpyPostStore {
    pub fn writes(&self) -> usize {
        self.posts.lock().unwrap().len()
    }
}

#[async_trait]
impl PostStore for SpyPostStore {
    async fn list_posts(&self) -> Result<Vec<Post>, StoreError> {
        Ok(self.posts.lock().unwrap().clone())
    }

    async fn create_post(&self, content: ContentInput, author: &str) -> Result<Post, DomainError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        let content = Post::validate_content(content)?;
        if self.unavailable {
            return Err(StoreError::Unavailable("spy offline".to_string()).into());
        }

        let post = Post {
            key: format!("{:015}", self.writes()),
            content,
            author: Some(author.to_string()),
            posted_at: None,
        };
        self.posts.lock().unwrap().push(post.clone());
        Ok(post)
    }
}
