//! OAuth flow controller.
//!
//! The login lifecycle is carried entirely by two cookies: `state` binds a
//! sign-in attempt to the browser that started it, `token` holds the access
//! token once the code exchange succeeds. Nothing is kept server-side.

use serde::Deserialize;

use crate::ports::{AuthError, IdentityProvider};

/// Cookie holding the CSRF state token.
pub const STATE_COOKIE: &str = "state";

/// Cookie holding the provider access token.
pub const TOKEN_COOKIE: &str = "token";

/// Lifetime of both cookies.
pub const COOKIE_MAX_AGE_SECS: i64 = 60 * 60;

/// Query parameters the provider appends to the callback URL.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

/// Run the callback leg of the authorization-code flow.
///
/// Returns the access token to store in the `token` cookie. The provider is
/// only contacted once the `state` query parameter matches the cookie.
pub async fn complete_login(
    provider: &dyn IdentityProvider,
    params: &CallbackParams,
    state_cookie: Option<&str>,
) -> Result<String, AuthError> {
    if let Some(error) = &params.error {
        tracing::warn!(error = %error, "Identity provider reported an error");
        return Err(AuthError::ProviderError(error.clone()));
    }

    let state_matches = match (params.state.as_deref(), state_cookie) {
        (Some(returned), Some(expected)) => !expected.is_empty() && returned == expected,
        _ => false,
    };
    if !state_matches {
        tracing::warn!(
            has_state_param = params.state.is_some(),
            has_state_cookie = state_cookie.is_some(),
            "OAuth state mismatch"
        );
        return Err(AuthError::StateMismatch);
    }

    let code = params
        .code
        .as_deref()
        .filter(|code| !code.is_empty())
        .ok_or(AuthError::MissingCode)?;

    let token = provider.exchange_code(code).await.map_err(|e| {
        if let AuthError::TokenExchangeFailed(detail) = &e {
            tracing::error!(detail = %detail, "Token exchange failed");
        }
        e
    })?;

    tracing::info!("OAuth code exchanged for access token");
    Ok(token)
}
