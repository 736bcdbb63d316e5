//! OAuth callback and sign-in landing page.

use actix_web::http::StatusCode;
use actix_web::http::header::{self, ContentType};
use actix_web::{HttpRequest, HttpResponse, web};

use ublog_core::ports::AuthError;
use ublog_core::services::{CallbackParams, STATE_COOKIE, TOKEN_COOKIE, complete_login};

use crate::context::RequestContext;
use crate::cookies::{removal_cookie, session_cookie};
use crate::middleware::error::{AppError, AppResult};
use crate::render;

/// GET /login?code&state&error
pub async fn callback(
    req: HttpRequest,
    ctx: RequestContext,
    params: web::Query<CallbackParams>,
) -> AppResult<HttpResponse> {
    let result = complete_login(
        ctx.identity.as_ref(),
        &params,
        ctx.state_cookie.as_deref(),
    )
    .await;

    match result {
        Ok(token) => {
            tracing::info!("GitHub sign-in completed");
            let home = req
                .url_for_static("home")
                .map_err(|e| AppError::Internal(e.to_string()))?;

            Ok(HttpResponse::Found()
                .insert_header((header::LOCATION, home.to_string()))
                .cookie(session_cookie(TOKEN_COOKIE, token, ctx.secure_cookies))
                .cookie(removal_cookie(STATE_COOKIE))
                .finish())
        }
        Err(AuthError::ProviderError(message)) => Ok(ctx
            .response(StatusCode::FORBIDDEN)
            .content_type(ContentType::html())
            .body(render::login_error_page(&ctx, &message))),
        Err(failure) => {
            tracing::warn!(error = ?failure, "GitHub sign-in failed");
            let mut location = req
                .url_for_static("login")
                .map_err(|e| AppError::Internal(e.to_string()))?;
            location
                .query_pairs_mut()
                .append_pair("error", &failure.to_string());

            Ok(ctx
                .response(StatusCode::FOUND)
                .insert_header((header::LOCATION, location.to_string()))
                .finish())
        }
    }
}
