//! Session resolution.

use crate::domain::User;
use crate::ports::IdentityProvider;

/// Resolve the signed-in user from the `token` cookie.
///
/// Without a cookie no request is made. Any provider failure resolves to
/// `None`, so a revoked token and an unreachable provider look the same.
pub async fn resolve_user(
    provider: &dyn IdentityProvider,
    access_token: Option<&str>,
) -> Option<User> {
    let token = access_token.filter(|t| !t.is_empty())?;

    match provider.fetch_user(token).await {
        Ok(user) => {
            tracing::debug!(login = %user.login, "Resolved session user");
            Some(user)
        }
        Err(e) => {
            tracing::warn!(error = %e, "Could not resolve user from access token");
            None
        }
    }
}
