//! The authorization gate: a JWT Bearer extractor for protected handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use moji_core::error::CoreError;
use moji_db::models::user::UserResponse;
use moji_db::repositories::UserRepo;

use crate::auth::jwt::validate_access_token;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated user resolved from a JWT Bearer token in the
/// `Authorization` header.
///
/// Use this as an extractor parameter in any handler that requires
/// authentication:
///
/// ```ignore
/// async fn my_handler(CurrentUser(user): CurrentUser) -> AppResult<Json<UserResponse>> {
///     tracing::info!(user_id = user.id, "handling request");
///     Ok(Json(user))
/// }
/// ```
///
/// Every request re-runs the full chain -- header extraction, token
/// validation, then a credential-store lookup of the embedded user id (the
/// password hash never leaves the projection). Nothing is cached between
/// requests.
///
/// Rejections: missing/malformed header 401, bad signature or expired
/// token 403, token subject no longer in the store 404.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub UserResponse);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })?;

        let claims = validate_access_token(token, &state.config.jwt).map_err(|_| {
            AppError::Core(CoreError::Forbidden(
                "Invalid or expired access token".into(),
            ))
        })?;

        let user = UserRepo::find_by_id(&state.pool, claims.sub)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "user",
                id: claims.sub,
            }))?;

        Ok(CurrentUser(user.into()))
    }
}
