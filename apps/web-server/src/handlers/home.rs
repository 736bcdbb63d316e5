//! Home page: post list and the submission action.

use actix_multipart::Multipart;
use actix_web::dev::Payload;
use actix_web::http::StatusCode;
use actix_web::http::header::ContentType;
use actix_web::{FromRequest, HttpMessage, HttpRequest, HttpResponse, error, web};
use futures::TryStreamExt;
use futures::future::LocalBoxFuture;

use ublog_core::domain::ContentInput;
use ublog_core::services::{SubmissionOutcome, submit_post};
use ublog_shared::{ActionData, SubmitForm};

use crate::context::RequestContext;
use crate::middleware::error::AppResult;
use crate::render;

/// Largest submission body accepted, whatever its encoding.
pub const MAX_SUBMISSION_BYTES: usize = 256 * 1024;

/// The `content` field of a `POST /` body.
///
/// Urlencoded and multipart text fields are text. Multipart file parts and
/// any other body are binary and never read back.
pub struct SubmittedContent(pub ContentInput);

impl FromRequest for SubmittedContent {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let essence = req
            .mime_type()
            .ok()
            .flatten()
            .map(|mime| mime.essence_str().to_owned());

        match essence.as_deref() {
            Some("application/x-www-form-urlencoded") => {
                let form = web::Form::<SubmitForm>::from_request(req, payload);
                Box::pin(async move {
                    let form = form.await?.into_inner();
                    Ok(Self(ContentInput::from(form.content)))
                })
            }
            Some("multipart/form-data") => {
                let multipart = Multipart::from_request(req, payload);
                Box::pin(async move { read_multipart(multipart.await?).await.map(Self) })
            }
            _ => {
                let body = web::Bytes::from_request(req, payload);
                Box::pin(async move {
                    let body = body.await?;
                    Ok(Self(if body.is_empty() {
                        ContentInput::Missing
                    } else {
                        ContentInput::Binary
                    }))
                })
            }
        }
    }
}

/// Find the `content` part. A part carrying a filename is an upload.
async fn read_multipart(mut multipart: Multipart) -> Result<ContentInput, actix_web::Error> {
    while let Some(mut field) = multipart.try_next().await? {
        let Some(disposition) = field.content_disposition().cloned() else {
            continue;
        };
        if disposition.get_name() != Some("content") {
            continue;
        }
        if disposition.get_filename().is_some() {
            return Ok(ContentInput::Binary);
        }

        let mut text = Vec::new();
        while let Some(chunk) = field.try_next().await? {
            if text.len() + chunk.len() > MAX_SUBMISSION_BYTES {
                return Err(error::ErrorPayloadTooLarge("content field too large"));
            }
            text.extend_from_slice(&chunk);
        }
        return Ok(ContentInput::Text(
            String::from_utf8_lossy(&text).into_owned(),
        ));
    }

    Ok(ContentInput::Missing)
}

/// GET /
pub async fn index(ctx: RequestContext) -> AppResult<HttpResponse> {
    let posts = ctx.posts.list_posts().await?;

    Ok(ctx
        .response(StatusCode::OK)
        .content_type(ContentType::html())
        .body(render::home_page(&ctx, &posts, None)))
}

/// POST /
pub async fn submit(ctx: RequestContext, body: SubmittedContent) -> AppResult<HttpResponse> {
    let outcome = submit_post(ctx.posts.as_ref(), ctx.user.as_ref(), body.0).await?;
    let action = action_data(outcome);
    let posts = ctx.posts.list_posts().await?;

    Ok(ctx
        .response(StatusCode::OK)
        .content_type(ContentType::html())
        .body(render::home_page(&ctx, &posts, Some(&action))))
}

fn action_data(outcome: SubmissionOutcome) -> ActionData {
    ActionData {
        error: outcome.error,
        content: outcome.content,
    }
}
