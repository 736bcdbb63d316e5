//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod kv;
mod post_store;

pub use auth::{AuthError, IdentityProvider};
pub use kv::{KvEntry, KvStore};
pub use post_store::PostStore;
