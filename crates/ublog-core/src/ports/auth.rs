//! Identity provider port.

use async_trait::async_trait;

use crate::domain::User;

/// OAuth identity provider (GitHub in production).
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Fresh opaque CSRF state for a new sign-in attempt.
    fn new_state(&self) -> String;

    /// Authorization endpoint URL carrying the client id and `state`.
    fn authorize_url(&self, state: &str) -> String;

    /// Exchange an authorization code for an access token.
    async fn exchange_code(&self, code: &str) -> Result<String, AuthError>;

    /// Fetch the user the access token belongs to.
    async fn fetch_user(&self, access_token: &str) -> Result<User, AuthError>;
}

/// Authentication errors.
///
/// The display strings end up in the `error` query parameter of `/login`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Login failed: state mismatch")]
    StateMismatch,

    #[error("Login failed: missing authorization code")]
    MissingCode,

    #[error("Login failed: token exchange failed")]
    TokenExchangeFailed(String),

    #[error("{0}")]
    ProviderError(String),

    #[error("User info request failed: {0}")]
    UserInfo(String),
}
