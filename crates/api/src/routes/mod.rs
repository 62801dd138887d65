pub mod auth;
pub mod health;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// /auth/signup    register (public)
/// /auth/signin    log in (public)
/// /auth/refresh   rotate refresh token (cookie)
/// /auth/signout   log out (cookie)
///
/// /users/me       resolved identity (requires auth)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/users", users::router())
}
