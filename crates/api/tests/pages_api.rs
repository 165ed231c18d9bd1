//! Integration tests for the health check, static pages, contact form and
//! profile.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, get_auth, post_json, post_json_auth, post_multipart_auth};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Health and static pages
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn health_reports_database(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(&app, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["database"], true);
}

/// Every response carries a generated request id.
#[sqlx::test(migrations = "../../db/migrations")]
async fn responses_carry_request_id(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(&app, "/faq/").await;
    assert!(response.headers().contains_key("x-request-id"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn static_pages(pool: PgPool) {
    let app = common::build_test_app(pool);

    let faq = body_json(get(&app, "/faq/").await).await;
    let entries = faq["data"].as_array().unwrap();
    assert!(!entries.is_empty());
    assert!(entries[0]["question"].is_string());

    for uri in ["/terms/", "/privacy/"] {
        let json = body_json(get(&app, uri).await).await;
        assert!(json["data"][0]["title"].is_string(), "{uri}");
    }

    let response = get(&app, "/contact/").await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn about_page_counts(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let owner = common::member(&pool, "owner").await;
    let staff = common::staff(&pool, "staff").await;
    common::create_listing(&app, &owner, "Rex").await;
    common::create_shelter(&app, &staff, "Safe Haven", 5).await;

    let json = body_json(get(&app, "/about/").await).await;
    assert_eq!(json["data"]["available_animals"], 1);
    assert_eq!(json["data"]["active_shelters"], 1);
    assert_eq!(json["data"]["veterinarians"], 0);
    assert_eq!(json["data"]["confirmed_donations"], 0);
}

// ---------------------------------------------------------------------------
// Contact
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn contact_message_is_stored(pool: PgPool) {
    let app = common::build_test_app(pool.clone());

    let response = post_json(
        &app,
        "/contact/",
        json!({
            "name": "Dilnoza",
            "email": "dilnoza@example.com",
            "subject": "Volunteering",
            "message": "How can I help on weekends?",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert!(body_json(response).await["message"].is_string());

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM contact_messages")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn contact_requires_valid_email_and_message(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(
        &app,
        "/contact/",
        json!({ "name": "Dilnoza", "email": "not-an-email", "message": "Hi" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["field"], "email");

    let response = post_json(
        &app,
        "/contact/",
        json!({ "name": "Dilnoza", "email": "d@example.com", "message": "   " }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["field"], "message");
}

// ---------------------------------------------------------------------------
// Profile
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn profile_shows_recent_activity(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let user = common::member(&pool, "busy").await;
    for i in 0..6 {
        common::create_listing(&app, &user, &format!("Pet {i}")).await;
    }

    let response = get_auth(&app, "/profile/", &user.token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["user"]["username"], "busy");
    assert_eq!(json["data"]["user"]["role"], "member");
    assert!(json["data"]["user"].get("password_hash").is_none());
    assert_eq!(json["data"]["animal_count"], 6);
    assert_eq!(json["data"]["recent_animals"].as_array().unwrap().len(), 5);
}

/// Fields left out of the update keep their value.
#[sqlx::test(migrations = "../../db/migrations")]
async fn profile_update_is_partial(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let user = common::member(&pool, "editor").await;

    let response = post_json_auth(
        &app,
        "/profile/",
        json!({ "first_name": "Aziz", "bio": "Cat person" }),
        &user.token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = post_json_auth(&app, "/profile/", json!({ "last_name": "Karimov" }), &user.token).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["first_name"], "Aziz");
    assert_eq!(json["data"]["last_name"], "Karimov");
    assert_eq!(json["data"]["bio"], "Cat person");
    assert_eq!(json["data"]["email"], "editor@example.com");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn avatar_upload(pool: PgPool) {
    let media = tempfile::tempdir().unwrap();
    let app = common::build_test_app_with_media(pool.clone(), media.path().to_path_buf());
    let user = common::member(&pool, "face").await;

    let response =
        post_multipart_auth(&app, "/profile/avatar/", &user.token, "avatar", "me.webp", b"RIFF", &[])
            .await;
    assert_eq!(response.status(), StatusCode::OK);
    let path = body_json(response).await["data"]["avatar_path"]
        .as_str()
        .unwrap()
        .to_string();
    assert!(path.starts_with("user_avatars/"));
}
