//! # uBlog Infrastructure
//!
//! Concrete implementations of the ports defined in `ublog-core`.
//! This crate contains the key-value backends, the post store adapter on top
//! of them, and the GitHub identity provider.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory only
//! - `github` - GitHub OAuth identity provider via reqwest
//! - `redis` - Redis-backed key-value store

pub mod kv;
pub mod posts;

#[cfg(feature = "github")]
pub mod github;

// Re-exports - In-Memory
pub use kv::InMemoryKvStore;
pub use posts::KvPostStore;

#[cfg(feature = "github")]
pub use github::{GitHubConfig, GitHubError, GitHubIdentityProvider};

// Re-exports - Redis
#[cfg(feature = "redis")]
pub use kv::{RedisConfig, RedisKvStore};
