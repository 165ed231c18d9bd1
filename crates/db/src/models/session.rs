//! Refresh-token sessions.

use pawlink_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// One issued refresh token. The plaintext token is never stored.
#[derive(Debug, Clone, FromRow)]
pub struct Session {
    pub id: DbId,
    pub user_id: DbId,
    pub expires_at: Timestamp,
    pub is_revoked: bool,
    pub user_agent: Option<String>,
    pub created_at: Timestamp,
}

pub struct CreateSession {
    pub user_id: DbId,
    /// Hex SHA-256 of the refresh token handed to the client.
    pub refresh_token_hash: String,
    pub expires_at: Timestamp,
    /// `User-Agent` of the client that signed in.
    pub user_agent: Option<String>,
}
