//! The refresh-token cookie.
//!
//! The refresh token travels exclusively in an HTTP-only cookie so scripts
//! on the client never see it. `SameSite=None; Secure` allows the
//! cross-site frontend to send it on auth requests.

use axum::http::{header, HeaderMap};

/// Name of the cookie carrying the refresh token.
pub const REFRESH_COOKIE: &str = "refresh_token";

/// Attributes shared by the set and clear variants of the cookie.
const COOKIE_ATTRIBUTES: &str = "HttpOnly; Secure; SameSite=None; Path=/";

/// Build the `Set-Cookie` value delivering a refresh token.
///
/// `max_age_secs` must match the session lifetime so the cookie and the
/// server-side session expire together.
pub fn set_refresh_cookie(token: &str, max_age_secs: i64) -> String {
    format!("{REFRESH_COOKIE}={token}; {COOKIE_ATTRIBUTES}; Max-Age={max_age_secs}")
}

/// Build the `Set-Cookie` value clearing the refresh cookie.
pub fn clear_refresh_cookie() -> String {
    format!("{REFRESH_COOKIE}=; {COOKIE_ATTRIBUTES}; Max-Age=0")
}

/// Extract the refresh token from a request's `Cookie` header, if present.
pub fn refresh_token_from_headers(headers: &HeaderMap) -> Option<String> {
    let raw = headers.get(header::COOKIE)?.to_str().ok()?;
    raw.split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == REFRESH_COOKIE)
        .map(|(_, value)| value.to_string())
}
