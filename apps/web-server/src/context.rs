//! Per-request context.
//!
//! Every page handler receives a [`RequestContext`] built once by its
//! `FromRequest` impl: the store and provider handles from [`AppState`], the
//! session cookies, and the resolved user. Handlers read from it; the only
//! thing it hands back is the state cookie it may have minted.

use std::sync::Arc;

use actix_web::dev::Payload;
use actix_web::http::StatusCode;
use actix_web::{FromRequest, HttpRequest, HttpResponse, HttpResponseBuilder, web};
use futures::future::LocalBoxFuture;

use ublog_core::domain::User;
use ublog_core::ports::{IdentityProvider, PostStore};
use ublog_core::services::{STATE_COOKIE, TOKEN_COOKIE, resolve_user};

use crate::cookies::session_cookie;
use crate::middleware::error::AppError;
use crate::state::AppState;

pub struct RequestContext {
    pub posts: Arc<dyn PostStore>,
    pub identity: Arc<dyn IdentityProvider>,
    pub secure_cookies: bool,
    /// `state` cookie as sent by the browser.
    pub state_cookie: Option<String>,
    /// CSRF state for links rendered in this response.
    pub state: String,
    /// `true` when `state` was minted for this request and must be set.
    pub state_issued: bool,
    pub user: Option<User>,
}

impl RequestContext {
    /// Response builder that carries any newly issued state cookie.
    pub fn response(&self, status: StatusCode) -> HttpResponseBuilder {
        let mut builder = HttpResponse::build(status);
        if self.state_issued {
            builder.cookie(session_cookie(
                STATE_COOKIE,
                self.state.clone(),
                self.secure_cookies,
            ));
        }
        builder
    }

    /// Sign-in link for the current state.
    pub fn sign_in_url(&self) -> String {
        self.identity.authorize_url(&self.state)
    }
}

fn cookie_value(req: &HttpRequest, name: &str) -> Option<String> {
    req.cookie(name)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty())
}

impl FromRequest for RequestContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let app = req.app_data::<web::Data<AppState>>().cloned();
        let state_cookie = cookie_value(req, STATE_COOKIE);
        let token = cookie_value(req, TOKEN_COOKIE);

        Box::pin(async move {
            let app = app.ok_or_else(|| {
                tracing::error!("AppState not found in app data");
                AppError::Internal("Server configuration error".to_string())
            })?;

            let user = resolve_user(app.identity.as_ref(), token.as_deref()).await;

            let (state, state_issued) = match &state_cookie {
                Some(existing) => (existing.clone(), false),
                None => (app.identity.new_state(), true),
            };

            Ok(RequestContext {
                posts: app.posts.clone(),
                identity: app.identity.clone(),
                secure_cookies: app.secure_cookies,
                state_cookie,
                state,
                state_issued,
                user,
            })
        })
    }
}
