//! Sign-out.

use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse};

use ublog_core::services::TOKEN_COOKIE;

use crate::cookies::removal_cookie;
use crate::middleware::error::{AppError, AppResult};

/// POST /logout
pub async fn logout(req: HttpRequest) -> AppResult<HttpResponse> {
    let home = req
        .url_for_static("home")
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(HttpResponse::Found()
        .insert_header((header::LOCATION, home.to_string()))
        .cookie(removal_cookie(TOKEN_COOKIE))
        .finish())
}
