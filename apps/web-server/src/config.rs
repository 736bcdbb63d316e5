//! Application configuration loaded from environment variables.

use std::env;

use anyhow::{Context, bail};
use ublog_infra::GitHubConfig;

/// Which key-value backend holds the posts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Memory,
    Redis,
}

impl StoreBackend {
    fn parse(value: &str) -> anyhow::Result<Self> {
        match value.to_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "redis" => Ok(Self::Redis),
            other => bail!("POST_STORE must be `memory` or `redis`, got `{}`", other),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Production mode marks cookies `Secure`.
    pub production: bool,
    pub store: StoreBackend,
    /// Write the demo posts into a fresh in-memory store.
    pub seed_mock_posts: bool,
    pub github: GitHubConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        let production = env::var("RUST_ENV")
            .map(|v| v == "production" || v == "prod")
            .unwrap_or(false);

        let store = match env::var("POST_STORE") {
            Ok(value) => StoreBackend::parse(&value)?,
            Err(_) => StoreBackend::Memory,
        };

        let seed_mock_posts = env::var("SEED_MOCK_POSTS")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(!production);

        let github = GitHubConfig::from_env().context("GitHub OAuth app is not configured")?;

        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            production,
            store,
            seed_mock_posts,
            github,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_backend_parse() {
        assert_eq!(StoreBackend::parse("memory").unwrap(), StoreBackend::Memory);
        assert_eq!(StoreBackend::parse("Redis").unwrap(), StoreBackend::Redis);
        assert!(StoreBackend::parse("postgres").is_err());
    }
}
