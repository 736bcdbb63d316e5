//! HTTP handlers and route configuration.

mod health;
mod home;
mod login;
mod logout;

use actix_web::web;

use crate::middleware::error::AppError;

/// Configure all application routes.
///
/// `home` and `login` are named so redirects can be built with `url_for`.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health::health_check))
        .service(
            web::resource("/")
                .name("home")
                .app_data(web::FormConfig::default().limit(home::MAX_SUBMISSION_BYTES))
                .route(web::get().to(home::index))
                .route(web::post().to(home::submit)),
        )
        .service(
            web::resource("/login")
                .name("login")
                .route(web::get().to(login::callback)),
        )
        .route("/logout", web::post().to(logout::logout));
}

/// Fallback for unknown paths.
pub async fn not_found(req: actix_web::HttpRequest) -> Result<actix_web::HttpResponse, AppError> {
    Err(AppError::NotFound(req.path().to_string()))
}
