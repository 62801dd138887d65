//! Route definitions for the protected `/users` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at `/users`. Every handler here takes the
/// `CurrentUser` extractor, so requests pass the authorization gate first.
pub fn router() -> Router<AppState> {
    Router::new().route("/me", get(users::me))
}
