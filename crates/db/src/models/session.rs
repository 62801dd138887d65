//! Refresh-token session model and DTOs.

use moji_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A session row from the `sessions` table.
///
/// The refresh token is an opaque random string; it carries no claims and
/// exists only so the session can be found again at refresh or sign-out.
#[derive(Debug, Clone, FromRow)]
pub struct Session {
    pub id: DbId,
    pub user_id: DbId,
    pub refresh_token: String,
    pub expires_at: Timestamp,
    pub created_at: Timestamp,
}

/// DTO for creating a new session.
pub struct CreateSession {
    pub user_id: DbId,
    pub refresh_token: String,
    pub expires_at: Timestamp,
}
