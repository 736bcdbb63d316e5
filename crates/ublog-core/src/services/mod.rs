//! Request-independent services composed from the ports.
//!
//! Handlers build a request context and call into these; nothing here touches
//! HTTP types.

pub mod oauth;
pub mod posts;
pub mod session;

#[cfg(test)]
pub(crate) mod testing;

pub use oauth::{COOKIE_MAX_AGE_SECS, CallbackParams, STATE_COOKIE, TOKEN_COOKIE, complete_login};
pub use posts::{SubmissionOutcome, submit_post};
pub use session::resolve_user;
