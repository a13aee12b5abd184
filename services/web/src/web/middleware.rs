//! services/web/src/web/middleware.rs
//!
//! Visitor-identity middleware and the cookie it reads and writes.
//!
//! This is pre-authentication: whatever value the cookie carries is taken
//! as the visitor's identity, unverified. Cookie presence alone marks the
//! visitor as having acted today. No session store exists anywhere; the
//! identity is rebuilt from the cookie and the clock on every request.

use axum::{
    extract::Request,
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use chrono::{DateTime, Utc};
use wishlist_core::domain::UserIdentity;

/// The cookie key name used to store the user id.
pub const USER_COOKIE: &str = "nerdery_xbox_user";

/// Middleware that derives the `UserIdentity` for this request and inserts
/// it into request extensions. Never rejects: viewing requires no identity.
pub async fn derive_user(mut req: Request, next: Next) -> Response {
    let cookie = cookie_value(req.headers());
    let user = UserIdentity::derive(cookie, Utc::now());
    req.extensions_mut().insert(user);
    next.run(req).await
}

/// Pull our cookie's value out of the `Cookie` header, if present.
fn cookie_value(headers: &HeaderMap) -> Option<String> {
    let cookie_header = headers.get(header::COOKIE)?.to_str().ok()?;
    cookie_header.split(';').find_map(|c| {
        c.trim()
            .strip_prefix(USER_COOKIE)
            .and_then(|rest| rest.strip_prefix('='))
            .map(|value| value.to_string())
    })
}

/// The Set-Cookie value recording that this visitor acted today. Expires
/// at the next UTC midnight, when the once-per-day budget resets.
pub fn performed_cookie(user_id: &str, expires: DateTime<Utc>) -> String {
    format!(
        "{USER_COOKIE}={user_id}; Path=/; SameSite=Lax; Expires={}",
        expires.format("%a, %d %b %Y %H:%M:%S GMT")
    )
}

/// The Set-Cookie value that clears the acted-today cookie.
pub fn cleared_cookie() -> String {
    format!("{USER_COOKIE}=; Path=/; SameSite=Lax; Max-Age=0")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use chrono::TimeZone;

    fn headers_with_cookie(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn extracts_our_cookie_among_others() {
        let headers = headers_with_cookie("theme=dark; nerdery_xbox_user=abc123; other=1");
        assert_eq!(cookie_value(&headers), Some("abc123".to_string()));
    }

    #[test]
    fn ignores_foreign_cookies_and_prefix_collisions() {
        let headers = headers_with_cookie("nerdery_xbox_user_old=zzz; theme=dark");
        assert_eq!(cookie_value(&headers), None);
        assert_eq!(cookie_value(&HeaderMap::new()), None);
    }

    #[test]
    fn performed_cookie_formats_expiry_as_http_date() {
        let expires = Utc.with_ymd_and_hms(2024, 3, 5, 0, 0, 0).unwrap();
        let cookie = performed_cookie("abc123", expires);
        assert_eq!(
            cookie,
            "nerdery_xbox_user=abc123; Path=/; SameSite=Lax; Expires=Tue, 05 Mar 2024 00:00:00 GMT"
        );
    }

    #[test]
    fn cleared_cookie_expires_immediately() {
        let cookie = cleared_cookie();
        assert!(cookie.starts_with("nerdery_xbox_user=;"));
        assert!(cookie.contains("Max-Age=0"));
    }
}
