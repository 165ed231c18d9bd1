//! Integration tests for sign-in bookkeeping: failed-login lockout and
//! refresh-token sessions.

use chrono::{Duration, Utc};
use pawlink_core::roles::MEMBER_ROLE_ID;
use pawlink_db::models::session::CreateSession;
use pawlink_db::models::user::CreateUser;
use pawlink_db::repositories::{RoleRepo, SessionRepo, UserRepo};
use sqlx::PgPool;

async fn seed_user(pool: &PgPool, username: &str) -> i64 {
    let input = CreateUser {
        username: username.to_string(),
        email: format!("{username}@example.com"),
        password_hash: "not-a-real-hash".to_string(),
        role_id: MEMBER_ROLE_ID,
        phone_number: None,
    };
    UserRepo::create(pool, &input).await.unwrap().id
}

async fn open_session(pool: &PgPool, user_id: i64, hash: &str, ttl: Duration) {
    SessionRepo::create(
        pool,
        &CreateSession {
            user_id,
            refresh_token_hash: hash.to_string(),
            expires_at: Utc::now() + ttl,
            user_agent: Some("integration-test".to_string()),
        },
    )
    .await
    .unwrap();
}

// ---------------------------------------------------------------------------
// Lockout
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_lock_set_on_threshold(pool: PgPool) {
    let id = seed_user(&pool, "forgetful").await;
    let until = Utc::now() + Duration::minutes(15);

    for expected in 1..3 {
        let (count, locked) = UserRepo::record_failed_login(&pool, id, 3, until).await.unwrap();
        assert_eq!(count, expected);
        assert!(locked.is_none());
    }

    let (count, locked) = UserRepo::record_failed_login(&pool, id, 3, until).await.unwrap();
    assert_eq!(count, 3);
    let locked = locked.expect("third failure should lock");
    assert!((locked - until).num_seconds().abs() < 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_successful_login_clears_counters(pool: PgPool) {
    let id = seed_user(&pool, "recovered").await;
    let until = Utc::now() + Duration::minutes(15);
    UserRepo::record_failed_login(&pool, id, 1, until).await.unwrap();

    UserRepo::record_successful_login(&pool, id).await.unwrap();

    let user = UserRepo::find_by_id(&pool, id).await.unwrap().unwrap();
    assert_eq!(user.failed_login_count, 0);
    assert!(user.locked_until.is_none());
    assert!(user.last_login_at.is_some());
}

// ---------------------------------------------------------------------------
// Sessions
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_session_consumed_once(pool: PgPool) {
    let id = seed_user(&pool, "rotator").await;
    open_session(&pool, id, "hash-a", Duration::days(7)).await;

    assert_eq!(SessionRepo::consume(&pool, "hash-a").await.unwrap(), Some(id));
    assert_eq!(SessionRepo::consume(&pool, "hash-a").await.unwrap(), None);
    assert_eq!(SessionRepo::consume(&pool, "never-issued").await.unwrap(), None);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_expired_session_not_consumed(pool: PgPool) {
    let id = seed_user(&pool, "late").await;
    open_session(&pool, id, "hash-old", Duration::minutes(-1)).await;

    assert_eq!(SessionRepo::consume(&pool, "hash-old").await.unwrap(), None);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_revoke_all_only_touches_owner(pool: PgPool) {
    let alice = seed_user(&pool, "alice").await;
    let bob = seed_user(&pool, "bob").await;
    open_session(&pool, alice, "alice-1", Duration::days(7)).await;
    open_session(&pool, alice, "alice-2", Duration::days(7)).await;
    open_session(&pool, bob, "bob-1", Duration::days(7)).await;

    assert_eq!(SessionRepo::revoke_all_for_user(&pool, alice).await.unwrap(), 2);
    assert_eq!(SessionRepo::consume(&pool, "alice-2").await.unwrap(), None);
    assert_eq!(SessionRepo::consume(&pool, "bob-1").await.unwrap(), Some(bob));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_role_names_resolve(pool: PgPool) {
    assert_eq!(RoleRepo::resolve_name(&pool, MEMBER_ROLE_ID).await.unwrap(), "member");
    assert_eq!(RoleRepo::resolve_name(&pool, 99).await.unwrap(), "unknown");
}
