//! Integration tests for the shelter and veterinarian directories.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, get_auth, post_json_auth};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Shelters
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn only_staff_may_create_shelters(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let member = common::member(&pool, "member").await;

    let response = get_auth(&app, "/shelters/create/", &member.token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = post_json_auth(
        &app,
        "/shelters/create/",
        json!({
            "name": "Safe Haven",
            "shelter_type": "state",
            "address": "1 Park Street",
            "phone_number": "+998 90 000 00 00",
            "capacity": 10,
        }),
        &member.token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

/// Capacity figures are derived and summed over active shelters.
#[sqlx::test(migrations = "../../db/migrations")]
async fn list_reports_capacity(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let staff = common::staff(&pool, "staff").await;

    let response = post_json_auth(
        &app,
        "/shelters/create/",
        json!({
            "name": "Full House",
            "shelter_type": "private",
            "address": "2 Park Street",
            "phone_number": "+998 90 000 00 01",
            "capacity": 8,
            "current_occupancy": 6,
        }),
        &staff.token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert_eq!(created["data"]["available_space"], 2);
    assert_eq!(created["data"]["occupancy_percentage"], 75.0);

    common::create_shelter(&app, &staff, "Open Arms", 4).await;

    let json = body_json(get(&app, "/shelters/").await).await;
    assert_eq!(json["data"]["shelters"].as_array().unwrap().len(), 2);
    assert_eq!(json["data"]["totals"]["capacity"], 12);
    assert_eq!(json["data"]["totals"]["available_space"], 6);

    let json = body_json(get(&app, "/shelters/?type=private").await).await;
    let shelters = json["data"]["shelters"].as_array().unwrap();
    assert_eq!(shelters.len(), 1);
    assert_eq!(shelters[0]["name"], "Full House");

    let json = body_json(get(&app, "/shelters/?search=open").await).await;
    assert_eq!(json["data"]["shelters"][0]["name"], "Open Arms");
}

/// Occupancy may exceed capacity; the free space then goes negative.
#[sqlx::test(migrations = "../../db/migrations")]
async fn over_capacity_shelter_reports_negative_space(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let staff = common::staff(&pool, "staff").await;

    let response = post_json_auth(
        &app,
        "/shelters/create/",
        json!({
            "name": "Overflow",
            "shelter_type": "volunteer",
            "address": "3 Park Street",
            "phone_number": "+998 90 000 00 02",
            "capacity": 2,
            "current_occupancy": 3,
        }),
        &staff.token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["available_space"], -1);
    assert_eq!(json["data"]["occupancy_percentage"], 150.0);
}

// ---------------------------------------------------------------------------
// Veterinarians
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn clinic_directory_filters(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let staff = common::staff(&pool, "staff").await;

    for (name, clinic_type, services, emergency) in [
        ("Night Vet", "hospital", json!(["emergency", "surgery"]), true),
        ("Corner Clinic", "clinic", json!(["general"]), false),
        ("Vet on Wheels", "mobile", json!(["vaccination", "general"]), false),
    ] {
        let response = post_json_auth(
            &app,
            "/veterinarians/create/",
            json!({
                "name": name,
                "clinic_type": clinic_type,
                "address": "Chilanzar",
                "phone_number": "+998 71 000 00 00",
                "services": services,
                "is_emergency": emergency,
            }),
            &staff.token,
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let json = body_json(get(&app, "/veterinarians/").await).await;
    assert_eq!(json["data"]["veterinarians"].as_array().unwrap().len(), 3);

    let json = body_json(get(&app, "/veterinarians/?emergency=yes").await).await;
    let clinics = json["data"]["veterinarians"].as_array().unwrap();
    assert_eq!(clinics.len(), 1);
    assert_eq!(clinics[0]["name"], "Night Vet");

    let json = body_json(get(&app, "/veterinarians/?service=general").await).await;
    assert_eq!(json["data"]["veterinarians"].as_array().unwrap().len(), 2);

    let json = body_json(get(&app, "/veterinarians/?type=mobile").await).await;
    let id = json["data"]["veterinarians"][0]["id"].as_i64().unwrap();

    let detail = body_json(get(&app, &format!("/veterinarians/{id}/")).await).await;
    assert_eq!(detail["data"]["service_labels"], json!(["General check-up", "Vaccination"]));
    assert_eq!(detail["data"]["nearby"].as_array().unwrap().len(), 2);
    assert_eq!(detail["data"]["already_reviewed"], false);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn missing_clinic_is_404(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(&app, "/veterinarians/999999/").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
