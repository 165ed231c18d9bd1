//! Integration tests for donation recording, totals and site statistics.

use pawlink_core::access::Actor;
use pawlink_core::donation::{DonationStatus, DonationType, ANONYMOUS_DONOR};
use pawlink_core::roles::{MEMBER_ROLE_ID, ROLE_MEMBER};
use pawlink_core::shelter::ShelterType;
use pawlink_db::models::donation::{CreateDonation, DonationFilter, DonationResponse};
use pawlink_db::models::shelter::CreateShelter;
use pawlink_db::models::user::CreateUser;
use pawlink_db::repositories::{DonationRepo, ShelterRepo, StatsRepo, UserRepo};
use rust_decimal::Decimal;
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

async fn seed_shelter(pool: &PgPool, name: &str) -> i64 {
    let input = CreateShelter {
        name: name.to_string(),
        shelter_type: ShelterType::State,
        description: String::new(),
        address: "1 Main St".to_string(),
        phone_number: "555-0100".to_string(),
        email: None,
        website: None,
        capacity: 20,
        current_occupancy: Some(5),
        director: String::new(),
        founded_date: None,
        is_active: None,
    };
    ShelterRepo::create(pool, &input).await.unwrap().id
}

fn money(donor_id: Option<i64>, shelter_id: i64, amount: i64, anonymous: bool) -> CreateDonation {
    CreateDonation {
        donor_id,
        shelter_id,
        donation_type: DonationType::Money,
        amount: Decimal::from(amount),
        description: None,
        is_anonymous: anonymous,
        message: None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_only_confirmed_and_delivered_count(pool: PgPool) {
    let shelter = seed_shelter(&pool, "Happy Tails").await;
    let donor = seed_user(&pool, "donor").await;

    let a = DonationRepo::create(&pool, &money(Some(donor), shelter, 100, false))
        .await
        .unwrap();
    let b = DonationRepo::create(&pool, &money(Some(donor), shelter, 40, false))
        .await
        .unwrap();
    let c = DonationRepo::create(&pool, &money(Some(donor), shelter, 7, false))
        .await
        .unwrap();
    DonationRepo::create(&pool, &money(Some(donor), shelter, 1000, false))
        .await
        .unwrap();
    assert_eq!(a.status, DonationStatus::Pending);

    DonationRepo::update_status(&pool, a.id, DonationStatus::Confirmed).await.unwrap();
    DonationRepo::update_status(&pool, b.id, DonationStatus::Delivered).await.unwrap();
    DonationRepo::update_status(&pool, c.id, DonationStatus::Cancelled).await.unwrap();

    let totals = DonationRepo::totals_for_shelter(&pool, shelter).await.unwrap();
    assert_eq!(totals.total_amount, Decimal::from(140));
    assert_eq!(totals.total_count, 2);

    let site = DonationRepo::totals(&pool).await.unwrap();
    assert_eq!(site.total_amount, Decimal::from(140));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_totals_are_per_shelter(pool: PgPool) {
    let first = seed_shelter(&pool, "First").await;
    let second = seed_shelter(&pool, "Second").await;

    let d = DonationRepo::create(&pool, &money(None, first, 25, true)).await.unwrap();
    DonationRepo::update_status(&pool, d.id, DonationStatus::Confirmed).await.unwrap();

    let empty = DonationRepo::totals_for_shelter(&pool, second).await.unwrap();
    assert_eq!(empty.total_amount, Decimal::ZERO);
    assert_eq!(empty.total_count, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_view_resolves_donor_name(pool: PgPool) {
    let shelter = seed_shelter(&pool, "Happy Tails").await;
    let donor = seed_user(&pool, "generous").await;

    let named = DonationRepo::create(&pool, &money(Some(donor), shelter, 10, false))
        .await
        .unwrap();
    let hidden = DonationRepo::create(&pool, &money(Some(donor), shelter, 10, true))
        .await
        .unwrap();

    let view = DonationRepo::find_view_by_id(&pool, named.id).await.unwrap().unwrap();
    assert_eq!(view.shelter_name, "Happy Tails");
    assert_eq!(view.donor_name(), "generous");

    let view = DonationRepo::find_view_by_id(&pool, hidden.id).await.unwrap().unwrap();
    let response = DonationResponse::for_viewer(view, None);
    assert_eq!(response.donor_name, ANONYMOUS_DONOR);
    assert_eq!(response.donation.donor_id, None);

    let view = DonationRepo::find_view_by_id(&pool, hidden.id).await.unwrap().unwrap();
    let own = Actor::new(donor, ROLE_MEMBER);
    let response = DonationResponse::for_viewer(view, Some(&own));
    assert_eq!(response.donation.donor_id, Some(donor));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_filters_and_limit(pool: PgPool) {
    let shelter = seed_shelter(&pool, "Happy Tails").await;
    for amount in 1..=3 {
        DonationRepo::create(&pool, &money(None, shelter, amount, true)).await.unwrap();
    }
    let mut food = money(None, shelter, 9, true);
    food.donation_type = DonationType::Food;
    DonationRepo::create(&pool, &food).await.unwrap();

    let filter = DonationFilter {
        donation_type: Some(DonationType::Money),
        ..Default::default()
    };
    let listed = DonationRepo::list(&pool, &filter, 2).await.unwrap();
    assert_eq!(listed.len(), 2);
    assert!(listed
        .iter()
        .all(|v| v.donation.donation_type == DonationType::Money));
    // Newest first.
    assert_eq!(listed[0].donation.amount, Decimal::from(3));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_donor_delete_keeps_donation(pool: PgPool) {
    let shelter = seed_shelter(&pool, "Happy Tails").await;
    let donor = seed_user(&pool, "leaving").await;
    let d = DonationRepo::create(&pool, &money(Some(donor), shelter, 10, false))
        .await
        .unwrap();

    sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(donor)
        .execute(&pool)
        .await
        .unwrap();

    let kept = DonationRepo::find_by_id(&pool, d.id).await.unwrap().unwrap();
    assert_eq!(kept.donor_id, None);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_site_stats(pool: PgPool) {
    let shelter = seed_shelter(&pool, "Happy Tails").await;
    let d = DonationRepo::create(&pool, &money(None, shelter, 30, true)).await.unwrap();
    DonationRepo::update_status(&pool, d.id, DonationStatus::Confirmed).await.unwrap();
    DonationRepo::create(&pool, &money(None, shelter, 70, true)).await.unwrap();

    let stats = StatsRepo::site_stats(&pool).await.unwrap();
    assert_eq!(stats.active_shelters, 1);
    assert_eq!(stats.available_animals, 0);
    assert_eq!(stats.veterinarians, 0);
    assert_eq!(stats.confirmed_donations, 1);
    assert_eq!(stats.confirmed_donation_amount, Decimal::from(30));
}
