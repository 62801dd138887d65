//! Shared helpers for HTTP-level integration tests.
//!
//! Mirrors the production router construction so tests exercise the same
//! middleware stack (CORS, request ID, timeout, tracing, panic recovery)
//! that `main.rs` serves.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use moji_api::auth::jwt::JwtConfig;
use moji_api::config::ServerConfig;
use moji_api::router::build_app_router;
use moji_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults and a known JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "integration-test-secret-not-for-production".to_string(),
            access_token_expiry_mins: 30,
            refresh_token_expiry_days: 14,
        },
    }
}

/// Build the full application router against the given pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// Send a request through the router and return the raw response.
async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.expect("request should succeed")
}

/// GET a path with no headers.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(
        app,
        Request::get(uri).body(Body::empty()).expect("valid request"),
    )
    .await
}

/// GET a path with a Bearer token.
pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(
        app,
        Request::get(uri)
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::empty())
            .expect("valid request"),
    )
    .await
}

/// POST a JSON body.
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(
        app,
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("valid request"),
    )
    .await
}

/// POST with a Cookie header and no body.
pub async fn post_with_cookie(app: Router, uri: &str, cookie: &str) -> Response<Body> {
    send(
        app,
        Request::post(uri)
            .header(header::COOKIE, cookie)
            .body(Body::empty())
            .expect("valid request"),
    )
    .await
}

/// POST with neither body nor cookie.
pub async fn post_empty(app: Router, uri: &str) -> Response<Body> {
    send(
        app,
        Request::post(uri).body(Body::empty()).expect("valid request"),
    )
    .await
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be valid JSON")
}

/// Extract the full `Set-Cookie` header value from a response, if any.
pub fn set_cookie_header(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_string())
}

/// Extract just the refresh-token value from a response's `Set-Cookie`
/// header (the part between `refresh_token=` and the first `;`).
pub fn refresh_cookie_value(response: &Response<Body>) -> Option<String> {
    let cookie = set_cookie_header(response)?;
    let rest = cookie.strip_prefix("refresh_token=")?;
    Some(rest.split(';').next().unwrap_or("").to_string())
}

/// Sign up and sign in a fresh user via the API, returning
/// `(access_token, refresh_cookie_value)`.
pub async fn signup_and_signin(app: &Router, username: &str, password: &str) -> (String, String) {
    let signup_body = serde_json::json!({
        "username": username,
        "password": password,
        "email": format!("{username}@test.com"),
        "first_name": "Test",
        "last_name": "User",
    });
    let response = post_json(app.clone(), "/api/auth/signup", signup_body).await;
    assert_eq!(response.status(), axum::http::StatusCode::NO_CONTENT);

    let signin_body = serde_json::json!({ "username": username, "password": password });
    let response = post_json(app.clone(), "/api/auth/signin", signin_body).await;
    assert_eq!(response.status(), axum::http::StatusCode::OK);

    let refresh_token = refresh_cookie_value(&response).expect("signin must set refresh cookie");
    let json = body_json(response).await;
    let access_token = json["access_token"]
        .as_str()
        .expect("signin must return access_token")
        .to_string();

    (access_token, refresh_token)
}
