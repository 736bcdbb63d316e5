//! Session cookie construction.

use actix_web::cookie::time::Duration;
use actix_web::cookie::{Cookie, SameSite};

use ublog_core::services::COOKIE_MAX_AGE_SECS;

/// `HttpOnly`, `SameSite=Strict`, one-hour cookie scoped to the whole site.
pub fn session_cookie(name: &'static str, value: String, secure: bool) -> Cookie<'static> {
    Cookie::build(name, value)
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Strict)
        .max_age(Duration::seconds(COOKIE_MAX_AGE_SECS))
        .finish()
}

/// Cookie that tells the browser to drop `name`.
pub fn removal_cookie(name: &'static str) -> Cookie<'static> {
    let mut cookie = Cookie::build(name, "").path("/").finish();
    cookie.make_removal();
    cookie
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_cookie_attributes() {
        let cookie = session_cookie("token", "abc".to_string(), true).to_string();

        assert!(cookie.starts_with("token=abc"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Secure"));
        assert!(cookie.contains("SameSite=Strict"));
        assert!(cookie.contains("Max-Age=3600"));
        assert!(cookie.contains("Path=/"));
    }

    #[test]
    fn test_insecure_outside_production() {
        let cookie = session_cookie("state", "s".to_string(), false).to_string();
        assert!(!cookie.contains("Secure"));
    }

    #[test]
    fn test_removal_cookie_expires_immediately() {
        let cookie = removal_cookie("token").to_string();
        assert!(cookie.starts_with("token="));
        assert!(cookie.contains("Max-Age=0"));
    }
}
