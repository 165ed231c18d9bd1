//! Integration tests for reviews and the ratings they drive.

use assert_matches::assert_matches;
use pawlink_core::review::{mean_rating, ReviewTarget};
use pawlink_core::roles::MEMBER_ROLE_ID;
use pawlink_core::shelter::ShelterType;
use pawlink_core::veterinarian::{ClinicType, ServiceCode, ServiceSet};
use pawlink_db::models::review::CreateReview;
use pawlink_db::models::shelter::CreateShelter;
use pawlink_db::models::user::CreateUser;
use pawlink_db::models::veterinarian::CreateVeterinarian;
use pawlink_db::repositories::{ReviewRepo, ShelterRepo, UserRepo, VeterinarianRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed_user(pool: &PgPool, username: &str) -> i64 {
    let input = CreateUser {
        username: username.to_string(),
        email: String::new(),
        password_hash: "not-a-real-hash".to_string(),
        role_id: MEMBER_ROLE_ID,
        phone_number: None,
    };
    UserRepo::create(pool, &input).await.unwrap().id
}

async fn seed_shelter(pool: &PgPool) -> i64 {
    let input = CreateShelter {
        name: "Happy Tails".to_string(),
        shelter_type: ShelterType::Volunteer,
        description: String::new(),
        address: "1 Main St".to_string(),
        phone_number: "555-0100".to_string(),
        email: None,
        website: None,
        capacity: 50,
        current_occupancy: Some(10),
        director: String::new(),
        founded_date: None,
        is_active: None,
    };
    ShelterRepo::create(pool, &input).await.unwrap().id
}

async fn seed_vet(pool: &PgPool) -> i64 {
    let input = CreateVeterinarian {
        name: "Paws Clinic".to_string(),
        clinic_type: ClinicType::Clinic,
        description: String::new(),
        address: "2 Side St".to_string(),
        phone_number: "555-0200".to_string(),
        email: None,
        website: None,
        services: ServiceSet::new([ServiceCode::General, ServiceCode::Surgery]),
        working_hours: String::new(),
        director: String::new(),
        doctors_count: None,
        is_emergency: false,
    };
    VeterinarianRepo::create(pool, &input).await.unwrap().id
}

fn review(user_id: i64, target: ReviewTarget, rating: i16) -> CreateReview {
    CreateReview {
        user_id,
        target,
        rating,
        comment: "  Lovely people.  ".to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_new_shelter_has_zero_rating(pool: PgPool) {
    let shelter_id = seed_shelter(&pool).await;
    let shelter = ShelterRepo::find_by_id(&pool, shelter_id).await.unwrap().unwrap();
    assert_eq!(shelter.rating, 0.0);
    assert!(shelter.is_active);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_rating_is_rounded_mean(pool: PgPool) {
    let shelter_id = seed_shelter(&pool).await;
    let target = ReviewTarget::Shelter(shelter_id);

    let ratings = [5, 4, 4];
    for (i, rating) in ratings.iter().enumerate() {
        let user = seed_user(&pool, &format!("reviewer{i}")).await;
        ReviewRepo::create_and_recompute(&pool, &review(user, target, *rating))
            .await
            .unwrap();
    }

    let shelter = ShelterRepo::find_by_id(&pool, shelter_id).await.unwrap().unwrap();
    assert_eq!(shelter.rating, 4.3);
    assert_eq!(shelter.rating, mean_rating(&ratings));
}

/// Recomputing without new reviews leaves the rating where it was.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_recompute_is_idempotent(pool: PgPool) {
    let vet_id = seed_vet(&pool).await;
    let target = ReviewTarget::Veterinarian(vet_id);
    for (i, rating) in [2, 5].into_iter().enumerate() {
        let user = seed_user(&pool, &format!("owner{i}")).await;
        ReviewRepo::create_and_recompute(&pool, &review(user, target, rating))
            .await
            .unwrap();
    }

    let first = ReviewRepo::recompute_rating(&pool, &target).await.unwrap();
    let second = ReviewRepo::recompute_rating(&pool, &target).await.unwrap();
    assert_eq!(first, 3.5);
    assert_eq!(second, first);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_comment_is_trimmed(pool: PgPool) {
    let shelter_id = seed_shelter(&pool).await;
    let user = seed_user(&pool, "reviewer").await;

    let (created, rating) =
        ReviewRepo::create_and_recompute(&pool, &review(user, ReviewTarget::Shelter(shelter_id), 3))
            .await
            .unwrap();
    assert_eq!(created.comment, "Lovely people.");
    assert_eq!(created.target(), Some(ReviewTarget::Shelter(shelter_id)));
    assert_eq!(rating, 3.0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_review_rejected_and_rating_unchanged(pool: PgPool) {
    let vet_id = seed_vet(&pool).await;
    let target = ReviewTarget::Veterinarian(vet_id);
    let user = seed_user(&pool, "reviewer").await;

    ReviewRepo::create_and_recompute(&pool, &review(user, target, 5))
        .await
        .unwrap();
    assert!(ReviewRepo::exists_for(&pool, user, &target).await.unwrap());

    let err = ReviewRepo::create_and_recompute(&pool, &review(user, target, 1))
        .await
        .unwrap_err();
    assert_matches!(
        err,
        sqlx::Error::Database(ref db) if db.constraint() == Some("uq_reviews_user_veterinarian")
    );

    let vet = VeterinarianRepo::find_by_id(&pool, vet_id).await.unwrap().unwrap();
    assert_eq!(vet.rating, 5.0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_same_user_may_review_shelter_and_vet(pool: PgPool) {
    let shelter_id = seed_shelter(&pool).await;
    let vet_id = seed_vet(&pool).await;
    let user = seed_user(&pool, "reviewer").await;

    ReviewRepo::create_and_recompute(&pool, &review(user, ReviewTarget::Shelter(shelter_id), 2))
        .await
        .unwrap();
    ReviewRepo::create_and_recompute(&pool, &review(user, ReviewTarget::Veterinarian(vet_id), 4))
        .await
        .unwrap();

    let listed = ReviewRepo::list_for_target(&pool, &ReviewTarget::Veterinarian(vet_id), Some(10))
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].username, "reviewer");
    assert_eq!(listed[0].review.rating, 4);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_rating_out_of_range_rejected_by_schema(pool: PgPool) {
    let shelter_id = seed_shelter(&pool).await;
    let user = seed_user(&pool, "reviewer").await;

    let err = ReviewRepo::create_and_recompute(&pool, &review(user, ReviewTarget::Shelter(shelter_id), 6))
        .await
        .unwrap_err();
    assert_matches!(err, sqlx::Error::Database(ref db) if db.code().as_deref() == Some("23514"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_services_round_trip(pool: PgPool) {
    let vet_id = seed_vet(&pool).await;
    let vet = VeterinarianRepo::find_by_id(&pool, vet_id).await.unwrap().unwrap();
    assert!(vet.services.contains(ServiceCode::Surgery));
    assert!(!vet.services.contains(ServiceCode::Dental));
}
