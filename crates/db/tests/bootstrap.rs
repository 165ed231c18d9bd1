use sqlx::PgPool;

/// Full bootstrap test: connect, migrate, verify schema and seed data.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_full_bootstrap(pool: PgPool) {
    pawlink_db::health_check(&pool).await.unwrap();

    let tables = [
        "roles",
        "users",
        "user_sessions",
        "animals",
        "animal_images",
        "shelters",
        "veterinarians",
        "donations",
        "reviews",
        "adoption_requests",
        "contact_messages",
    ];
    for table in tables {
        sqlx::query(&format!("SELECT COUNT(*) FROM {table}"))
            .execute(&pool)
            .await
            .unwrap_or_else(|e| panic!("{table} query failed: {e}"));
    }
}

/// The three roles are seeded with fixed IDs.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_roles_seeded(pool: PgPool) {
    let rows: Vec<(i64, String)> = sqlx::query_as("SELECT id, name FROM roles ORDER BY id")
        .fetch_all(&pool)
        .await
        .unwrap();
    assert_eq!(
        rows,
        vec![
            (1, "admin".to_string()),
            (2, "staff".to_string()),
            (3, "member".to_string()),
        ]
    );
    assert_eq!(pawlink_core::roles::MEMBER_ROLE_ID, 3);
}

/// `updated_at` is bumped by the trigger on every update.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_updated_at_trigger(pool: PgPool) {
    let (id, before): (i64, chrono::DateTime<chrono::Utc>) = sqlx::query_as(
        "INSERT INTO users (username, password_hash) VALUES ('trigger', 'x')
         RETURNING id, updated_at",
    )
    .fetch_one(&pool)
    .await
    .unwrap();

    let (after,): (chrono::DateTime<chrono::Utc>,) =
        sqlx::query_as("UPDATE users SET bio = 'hi' WHERE id = $1 RETURNING updated_at")
            .bind(id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert!(after >= before);
}
