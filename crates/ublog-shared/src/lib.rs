//! # uBlog Shared
//!
//! Request and response shapes shared by the HTTP handlers.

pub mod dto;
pub mod response;

pub use dto::{ActionData, HealthResponse, SubmitForm};
pub use response::ErrorResponse;
