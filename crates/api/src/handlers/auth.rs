//! Handlers for the `/auth` resource (signup, signin, refresh, signout).

use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::{HeaderMap, HeaderName, StatusCode};
use axum::response::AppendHeaders;
use axum::Json;
use chrono::Utc;
use moji_core::error::CoreError;
use moji_core::types::DbId;
use serde::{Deserialize, Serialize};

use moji_db::models::session::CreateSession;
use moji_db::models::user::CreateUser;
use moji_db::repositories::{SessionRepo, UserRepo};

use crate::auth::cookie::{clear_refresh_cookie, refresh_token_from_headers, set_refresh_cookie};
use crate::auth::jwt::{generate_access_token, generate_refresh_token};
use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// The one 401 body for both unknown usernames and wrong passwords, so the
/// two cases stay indistinguishable to a probing client.
const INVALID_CREDENTIALS: &str = "Invalid username or password";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/signup`.
///
/// Fields are optional at the serde layer so presence is checked by the
/// handler and reported as a 400 rather than a deserialization rejection.
#[derive(Debug, Deserialize)]
pub struct SignUpRequest {
    pub username: Option<String>,
    pub password: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Request body for `POST /auth/signin`.
#[derive(Debug, Deserialize)]
pub struct SignInRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Successful authentication response returned by signin and refresh.
///
/// The refresh token never appears in the body; it travels in the
/// `Set-Cookie` header alongside.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub message: String,
    pub access_token: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/auth/signup
///
/// Register a new account. Returns 204 No Content; does not log the user in.
pub async fn signup(
    State(state): State<AppState>,
    Json(input): Json<SignUpRequest>,
) -> AppResult<StatusCode> {
    // 1. All five fields are required.
    let username = require_field(input.username, "username")?;
    let password = require_field(input.password, "password")?;
    let email = require_field(input.email, "email")?;
    let first_name = require_field(input.first_name, "first_name")?;
    let last_name = require_field(input.last_name, "last_name")?;

    // 2. Friendly duplicate check. The uq_users_username index still
    //    backstops the race where two registrations pass this check.
    if UserRepo::find_by_username(&state.pool, &username)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "Username is already taken".into(),
        )));
    }

    // 3. Hash the password. A hashing fault is a system error, not a 4xx.
    let password_hash = hash_password(&password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            username,
            email,
            password_hash,
            display_name: format!("{first_name} {last_name}"),
        },
    )
    .await?;

    tracing::info!(user_id = user.id, "user registered");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/auth/signin
///
/// Authenticate with username + password. Returns the access token in the
/// body and the refresh token in an HTTP-only cookie.
pub async fn signin(
    State(state): State<AppState>,
    Json(input): Json<SignInRequest>,
) -> AppResult<(
    AppendHeaders<[(HeaderName, String); 1]>,
    Json<AuthResponse>,
)> {
    let username = require_field(input.username, "username")?;
    let password = require_field(input.password, "password")?;

    // Unknown user and wrong password produce the identical 401.
    let user = UserRepo::find_by_username(&state.pool, &username)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized(INVALID_CREDENTIALS.into())))?;

    let password_valid = verify_password(&password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        return Err(AppError::Core(CoreError::Unauthorized(
            INVALID_CREDENTIALS.into(),
        )));
    }

    let (access_token, cookie) = open_session(&state, user.id).await?;

    tracing::info!(user_id = user.id, "user signed in");

    Ok((
        AppendHeaders([(SET_COOKIE, cookie)]),
        Json(AuthResponse {
            message: format!("Welcome back, {}", user.display_name),
            access_token,
        }),
    ))
}

/// POST /api/auth/refresh
///
/// Exchange the refresh cookie for a new access token and a rotated
/// refresh token. A signed-out or expired session cannot refresh.
pub async fn refresh(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> AppResult<(
    AppendHeaders<[(HeaderName, String); 1]>,
    Json<AuthResponse>,
)> {
    let refresh_token = refresh_token_from_headers(&headers).ok_or_else(|| {
        AppError::Core(CoreError::Unauthorized("Missing refresh token".into()))
    })?;

    // Expiry is enforced by the lookup itself; a stale cookie resolves to
    // nothing even if the row has not been swept yet.
    let session = SessionRepo::find_active_by_refresh_token(&state.pool, &refresh_token)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid or expired refresh token".into(),
            ))
        })?;

    let user = UserRepo::find_by_id(&state.pool, session.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;

    // Rotation: the presented token dies with the old session.
    SessionRepo::delete_by_refresh_token(&state.pool, &refresh_token).await?;

    let (access_token, cookie) = open_session(&state, user.id).await?;

    tracing::debug!(user_id = user.id, "session refreshed");

    Ok((
        AppendHeaders([(SET_COOKIE, cookie)]),
        Json(AuthResponse {
            message: format!("Welcome back, {}", user.display_name),
            access_token,
        }),
    ))
}

/// POST /api/auth/signout
///
/// Delete the session named by the refresh cookie and clear the cookie.
/// Succeeds with 204 whether or not a cookie or session existed.
pub async fn signout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> AppResult<(
    StatusCode,
    AppendHeaders<[(HeaderName, String); 1]>,
)> {
    if let Some(refresh_token) = refresh_token_from_headers(&headers) {
        // Delete-if-exists: a session already removed by a concurrent
        // sign-out is not an error.
        let deleted = SessionRepo::delete_by_refresh_token(&state.pool, &refresh_token).await?;
        tracing::debug!(deleted, "sign-out session delete");
    }

    Ok((
        StatusCode::NO_CONTENT,
        AppendHeaders([(SET_COOKIE, clear_refresh_cookie())]),
    ))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Mint an access token, persist a new session, and build the refresh
/// cookie. Shared by signin and refresh.
async fn open_session(state: &AppState, user_id: DbId) -> AppResult<(String, String)> {
    let jwt = &state.config.jwt;

    let access_token = generate_access_token(user_id, jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    let refresh_token = generate_refresh_token();
    let expires_at = Utc::now() + chrono::Duration::days(jwt.refresh_token_expiry_days);

    SessionRepo::create(
        &state.pool,
        &CreateSession {
            user_id,
            refresh_token: refresh_token.clone(),
            expires_at,
        },
    )
    .await?;

    let max_age_secs = jwt.refresh_token_expiry_days * 24 * 60 * 60;
    let cookie = set_refresh_cookie(&refresh_token, max_age_secs);

    Ok((access_token, cookie))
}

/// Unwrap a required request field, trimming whitespace; missing or empty
/// values become a 400 naming the field.
fn require_field(value: Option<String>, name: &str) -> Result<String, AppError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(AppError::Core(CoreError::Validation(format!(
            "Missing required field: {name}"
        )))),
    }
}
