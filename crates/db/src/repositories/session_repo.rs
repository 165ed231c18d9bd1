//! Queries over `user_sessions`.

use pawlink_core::types::DbId;
use sqlx::PgPool;

use crate::models::session::{CreateSession, Session};

pub struct SessionRepo;

impl SessionRepo {
    pub async fn create(pool: &PgPool, input: &CreateSession) -> Result<Session, sqlx::Error> {
        sqlx::query_as::<_, Session>(
            "INSERT INTO user_sessions (user_id, refresh_token_hash, expires_at, user_agent)
             VALUES ($1, $2, $3, $4)
             RETURNING id, user_id, expires_at, is_revoked, user_agent, created_at",
        )
        .bind(input.user_id)
        .bind(&input.refresh_token_hash)
        .bind(input.expires_at)
        .bind(&input.user_agent)
        .fetch_one(pool)
        .await
    }

    /// Revoke the live session holding `token_hash` and return its user.
    ///
    /// Revoked, expired and unknown tokens all yield `None`. Two concurrent
    /// calls with the same token cannot both succeed.
    pub async fn consume(pool: &PgPool, token_hash: &str) -> Result<Option<DbId>, sqlx::Error> {
        sqlx::query_scalar(
            "UPDATE user_sessions SET is_revoked = TRUE
             WHERE refresh_token_hash = $1 AND NOT is_revoked AND expires_at > NOW()
             RETURNING user_id",
        )
        .bind(token_hash)
        .fetch_optional(pool)
        .await
    }

    /// Revoke every live session of a user. Returns how many were revoked.
    pub async fn revoke_all_for_user(pool: &PgPool, user_id: DbId) -> Result<u64, sqlx::Error> {
        let done = sqlx::query(
            "UPDATE user_sessions SET is_revoked = TRUE WHERE user_id = $1 AND NOT is_revoked",
        )
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(done.rows_affected())
    }
}
