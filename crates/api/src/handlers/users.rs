//! Handlers for the protected `/users` resource.

use axum::Json;
use moji_db::models::user::UserResponse;

use crate::error::AppResult;
use crate::middleware::auth::CurrentUser;

/// GET /api/users/me
///
/// Return the identity resolved by the authorization gate. The projection
/// never includes the password hash.
pub async fn me(CurrentUser(user): CurrentUser) -> AppResult<Json<UserResponse>> {
    Ok(Json(user))
}
