#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use pawlink_api::auth::jwt::{generate_access_token, JwtConfig};
use pawlink_api::auth::password::hash_password;
use pawlink_api::config::ServerConfig;
use pawlink_api::router::build_app_router;
use pawlink_api::state::AppState;
use pawlink_core::types::DbId;
use pawlink_db::models::user::CreateUser;
use pawlink_db::repositories::UserRepo;
use sqlx::PgPool;
use tower::ServiceExt;

pub const TEST_PASSWORD: &str = "correct-horse-42";

const ROLE_ADMIN_ID: DbId = 1;
const ROLE_STAFF_ID: DbId = 2;
const ROLE_MEMBER_ID: DbId = 3;

/// Build a test `ServerConfig` with safe defaults and a throwaway media root.
pub fn test_config(media_root: PathBuf) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        media_root,
        max_upload_bytes: 1024 * 1024,
        password_min_length: 8,
        jwt: jwt_config(),
    }
}

pub fn jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "pawlink-test-secret".to_string(),
        access_token_expiry_mins: 15,
        refresh_token_expiry_days: 7,
    }
}

/// Build the full application router, middleware included, over `pool`.
pub fn build_test_app(pool: PgPool) -> Router {
    let media_root = std::env::temp_dir().join(format!("pawlink-test-{}", uuid::Uuid::new_v4()));
    build_test_app_with_media(pool, media_root)
}

pub fn build_test_app_with_media(pool: PgPool, media_root: PathBuf) -> Router {
    let config = test_config(media_root);
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

/// A seeded account with a ready-made access token.
pub struct TestUser {
    pub id: DbId,
    pub username: String,
    pub token: String,
}

async fn seed_user(pool: &PgPool, username: &str, role_id: DbId, role: &str) -> TestUser {
    let user = UserRepo::create(
        pool,
        &CreateUser {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            password_hash: hash_password(TEST_PASSWORD).expect("hashing should succeed"),
            role_id,
            phone_number: None,
        },
    )
    .await
    .expect("user creation should succeed");

    let token = generate_access_token(user.id, role, &jwt_config()).expect("token should encode");
    TestUser {
        id: user.id,
        username: user.username,
        token,
    }
}

pub async fn member(pool: &PgPool, username: &str) -> TestUser {
    seed_user(pool, username, ROLE_MEMBER_ID, "member").await
}

pub async fn staff(pool: &PgPool, username: &str) -> TestUser {
    seed_user(pool, username, ROLE_STAFF_ID, "staff").await
}

pub async fn admin(pool: &PgPool, username: &str) -> TestUser {
    seed_user(pool, username, ROLE_ADMIN_ID, "admin").await
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

async fn send(app: &Router, request: Request<Body>) -> Response {
    app.clone()
        .oneshot(request)
        .await
        .expect("router is infallible")
}

pub async fn get(app: &Router, uri: &str) -> Response {
    let request = Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("valid request");
    send(app, request).await
}

pub async fn get_auth(app: &Router, uri: &str, token: &str) -> Response {
    let request = Request::builder()
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .expect("valid request");
    send(app, request).await
}

pub async fn post_json(app: &Router, uri: &str, body: serde_json::Value) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("valid request");
    send(app, request).await
}

pub async fn post_json_auth(
    app: &Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .expect("valid request");
    send(app, request).await
}

/// POST with no body.
pub async fn post_auth(app: &Router, uri: &str, token: &str) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .expect("valid request");
    send(app, request).await
}

/// POST a multipart body with one file part and optional text fields.
pub async fn post_multipart_auth(
    app: &Router,
    uri: &str,
    token: &str,
    file_field: &str,
    file_name: &str,
    bytes: &[u8],
    fields: &[(&str, &str)],
) -> Response {
    let boundary = "pawlink-test-boundary";
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    body.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"{file_field}\"; \
             filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, format!("multipart/form-data; boundary={boundary}"))
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body))
        .expect("valid request");
    send(app, request).await
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Create a free dog listing through the API and return its id.
pub async fn create_listing(app: &Router, owner: &TestUser, name: &str) -> DbId {
    let body = serde_json::json!({
        "name": name,
        "animal_type": "dog",
        "location": "Tashkent",
        "is_for_sale": false,
    });
    let response = post_json_auth(app, "/animals/add/", body, &owner.token).await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["data"]["id"]
        .as_i64()
        .expect("listing id")
}

/// Create an active shelter through the API (staff only) and return its id.
pub async fn create_shelter(app: &Router, staff: &TestUser, name: &str, capacity: i32) -> DbId {
    let body = serde_json::json!({
        "name": name,
        "shelter_type": "volunteer",
        "address": "1 Park Street",
        "phone_number": "+998 90 000 00 00",
        "capacity": capacity,
        "current_occupancy": 0,
    });
    let response = post_json_auth(app, "/shelters/create/", body, &staff.token).await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["data"]["id"]
        .as_i64()
        .expect("shelter id")
}
