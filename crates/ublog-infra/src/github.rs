//! GitHub OAuth identity provider.
//!
//! Implements the authorization-code flow against GitHub's OAuth app endpoints:
//!
//! 1. [`authorize_url`](IdentityProvider::authorize_url) - link to
//!    `github.com/login/oauth/authorize` carrying the client id and CSRF state.
//! 2. [`exchange_code`](IdentityProvider::exchange_code) - server-to-server
//!    token request through an `oauth2` [`BasicClient`], client credentials in
//!    the form body. GitHub answers `200` with an `error` field for bad codes,
//!    so the unparseable body is read back as an error response.
//! 3. [`fetch_user`](IdentityProvider::fetch_user) - `GET api.github.com/user`
//!    with the token as a bearer credential.

use std::time::Duration;

use async_trait::async_trait;
use oauth2::basic::{BasicClient, BasicErrorResponse};
use oauth2::{
    AuthType, AuthUrl, AuthorizationCode, ClientId, ClientSecret, CsrfToken, EndpointNotSet,
    EndpointSet, RequestTokenError, TokenResponse, TokenUrl,
};
use reqwest::{Client, Url, header, redirect};

use ublog_core::domain::User;
use ublog_core::ports::{AuthError, IdentityProvider};

const USER_AGENT: &str = concat!("uBlog/", env!("CARGO_PKG_VERSION"));

/// GitHub provider configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum GitHubError {
    #[error("{0} not set")]
    MissingEnv(&'static str),

    #[error("Invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),
}

/// GitHub OAuth app configuration.
#[derive(Debug, Clone)]
pub struct GitHubConfig {
    pub client_id: String,
    pub client_secret: String,
    pub authorize_url: String,
    pub token_url: String,
    pub api_url: String,
    pub timeout: Duration,
}

impl GitHubConfig {
    /// Configuration pointing at github.com for the given OAuth app.
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            authorize_url: "https://github.com/login/oauth/authorize".to_string(),
            token_url: "https://github.com/login/oauth/access_token".to_string(),
            api_url: "https://api.github.com".to_string(),
            timeout: Duration::from_secs(10),
        }
    }

    /// Load configuration from environment variables.
    ///
    /// `GITHUB_CLIENT_ID` and `GITHUB_CLIENT_SECRET` are required.
    pub fn from_env() -> Result<Self, GitHubError> {
        let client_id = std::env::var("GITHUB_CLIENT_ID")
            .map_err(|_| GitHubError::MissingEnv("GITHUB_CLIENT_ID"))?;
        let client_secret = std::env::var("GITHUB_CLIENT_SECRET")
            .map_err(|_| GitHubError::MissingEnv("GITHUB_CLIENT_SECRET"))?;

        let defaults = Self::new(client_id, client_secret);
        Ok(Self {
            authorize_url: std::env::var("GITHUB_AUTHORIZE_URL")
                .unwrap_or(defaults.authorize_url.clone()),
            token_url: std::env::var("GITHUB_TOKEN_URL").unwrap_or(defaults.token_url.clone()),
            api_url: std::env::var("GITHUB_API_URL").unwrap_or(defaults.api_url.clone()),
            timeout: std::env::var("GITHUB_HTTP_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
            ..defaults
        })
    }
}

/// OAuth client with the authorization and token endpoints set.
type ConfiguredClient = oauth2::Client<
    oauth2::basic::BasicErrorResponse,
    oauth2::basic::BasicTokenResponse,
    oauth2::basic::BasicTokenIntrospectionResponse,
    oauth2::StandardRevocableToken,
    oauth2::basic::BasicRevocationErrorResponse,
    EndpointSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointSet,
>;

/// GitHub identity provider backed by a shared reqwest client.
pub struct GitHubIdentityProvider {
    oauth: ConfiguredClient,
    user_url: Url,
    client: Client,
}

impl GitHubIdentityProvider {
    pub fn new(config: GitHubConfig) -> Result<Self, GitHubError> {
        let auth_url = AuthUrl::new(config.authorize_url.clone())
            .map_err(|e| invalid_url(&config.authorize_url, e))?;
        let token_url = TokenUrl::new(config.token_url.clone())
            .map_err(|e| invalid_url(&config.token_url, e))?;
        let user_url = format!("{}/user", config.api_url.trim_end_matches('/'));
        let user_url = Url::parse(&user_url).map_err(|e| invalid_url(&user_url, e))?;

        let oauth = BasicClient::new(ClientId::new(config.client_id))
            .set_client_secret(ClientSecret::new(config.client_secret))
            .set_auth_uri(auth_url)
            .set_token_uri(token_url)
            .set_auth_type(AuthType::RequestBody);

        // Token requests must not follow redirects.
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout)
            .redirect(redirect::Policy::none())
            .build()?;

        Ok(Self {
            oauth,
            user_url,
            client,
        })
    }

    /// Create from environment configuration.
    pub fn from_env() -> Result<Self, GitHubError> {
        Self::new(GitHubConfig::from_env()?)
    }
}

fn invalid_url(url: &str, e: impl std::fmt::Display) -> GitHubError {
    GitHubError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    }
}

fn describe(response: &BasicErrorResponse) -> String {
    match response.error_description() {
        Some(description) => format!("{}: {}", response.error(), description),
        None => response.error().to_string(),
    }
}

fn exchange_failure<RE>(err: RequestTokenError<RE, BasicErrorResponse>) -> AuthError
where
    RE: std::error::Error + 'static,
{
    let reason = match err {
        RequestTokenError::ServerResponse(response) => describe(&response),
        // GitHub reports a bad code as `200` with an error body.
        RequestTokenError::Parse(e, body) => serde_json::from_slice::<BasicErrorResponse>(&body)
            .map(|response| describe(&response))
            .unwrap_or_else(|_| e.to_string()),
        other => other.to_string(),
    };
    AuthError::TokenExchangeFailed(reason)
}

#[async_trait]
impl IdentityProvider for GitHubIdentityProvider {
    fn new_state(&self) -> String {
        CsrfToken::new_random().secret().clone()
    }

    fn authorize_url(&self, state: &str) -> String {
        let (url, _) = self
            .oauth
            .authorize_url(|| CsrfToken::new(state.to_string()))
            .url();
        url.to_string()
    }

    async fn exchange_code(&self, code: &str) -> Result<String, AuthError> {
        let token = self
            .oauth
            .exchange_code(AuthorizationCode::new(code.to_string()))
            .request_async(&self.client)
            .await
            .map_err(exchange_failure)?;

        Ok(token.access_token().secret().clone())
    }

    async fn fetch_user(&self, access_token: &str) -> Result<User, AuthError> {
        self.client
            .get(self.user_url.clone())
            .bearer_auth(access_token)
            .header(header::ACCEPT, "application/vnd.github+json")
            .send()
            .await
            .map_err(|e| AuthError::UserInfo(e.to_string()))?
            .error_for_status()
            .map_err(|e| AuthError::UserInfo(e.to_string()))?
            .json::<User>()
            .await
            .map_err(|e| AuthError::UserInfo(e.to_string()))
    }
}
