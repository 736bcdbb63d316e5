//! Key-value store implementations - Redis and in-memory.

mod memory;

#[cfg(feature = "redis")]
mod redis;

pub use memory::InMemoryKvStore;

#[cfg(feature = "redis")]
pub use self::redis::{RedisConfig, RedisKvStore};
