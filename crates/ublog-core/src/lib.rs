//! # uBlog Core
//!
//! The domain layer of uBlog.
//! Posts, users, the post key scheme, the ports infrastructure must implement,
//! and the request-independent services built on top of them. No I/O lives here.

pub mod domain;
pub mod error;
pub mod ports;
pub mod services;

pub use error::{DomainError, StoreError, ValidationError};
