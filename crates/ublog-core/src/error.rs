//! Domain-level error types.

use thiserror::Error;

/// Domain errors - business logic failures.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("You must be signed in to post.")]
    Unauthenticated,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Post content validation failures, checked in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Content is required")]
    EmptyContent,

    #[error("Content must be a string")]
    InvalidContentType,

    #[error("Content must be less than {max} characters")]
    ContentTooLong { max: usize, actual: usize },
}

/// Key-value store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Serialization failed: {0}")]
    Serialization(String),
}
