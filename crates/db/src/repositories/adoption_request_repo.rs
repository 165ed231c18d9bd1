//! Repository for the `adoption_requests` table.

use pawlink_core::adoption::AdoptionStatus;
use pawlink_core::animal::ListingStatus;
use pawlink_core::types::DbId;
use sqlx::PgPool;

use crate::models::adoption::{
    AdoptionRequest, AdoptionRequestView, AdoptionRequestWithOwner, CreateAdoptionRequest,
};

const COLUMNS: &str = "id, animal_id, requester_id, message, phone_number, address, \
                       experience, status, owner_notes, created_at, updated_at";

/// Request columns qualified with `r.`.
const QUALIFIED_COLUMNS: &str = "r.id, r.animal_id, r.requester_id, r.message, r.phone_number, \
                                 r.address, r.experience, r.status, r.owner_notes, \
                                 r.created_at, r.updated_at";

/// Provides submission, listing and status transitions for adoption requests.
pub struct AdoptionRequestRepo;

impl AdoptionRequestRepo {
    /// Submit a new request in `pending` status.
    ///
    /// A second active request for the same (animal, requester) pair fails on
    /// `uq_adoption_requests_active`.
    pub async fn create(
        pool: &PgPool,
        input: &CreateAdoptionRequest,
    ) -> Result<AdoptionRequest, sqlx::Error> {
        let query = format!(
            "INSERT INTO adoption_requests
                (animal_id, requester_id, message, phone_number, address, experience)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AdoptionRequest>(&query)
            .bind(input.animal_id)
            .bind(input.requester_id)
            .bind(&input.message)
            .bind(&input.phone_number)
            .bind(&input.address)
            .bind(&input.experience)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<AdoptionRequest>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM adoption_requests WHERE id = $1");
        sqlx::query_as::<_, AdoptionRequest>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a request together with the owner of its listing.
    pub async fn find_with_owner(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<AdoptionRequestWithOwner>, sqlx::Error> {
        let query = format!(
            "SELECT {QUALIFIED_COLUMNS}, a.owner_id AS listing_owner_id
             FROM adoption_requests r
             JOIN animals a ON a.id = r.animal_id
             WHERE r.id = $1"
        );
        sqlx::query_as::<_, AdoptionRequestWithOwner>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Whether `requester_id` holds a pending or approved request on the animal.
    pub async fn has_active(
        pool: &PgPool,
        animal_id: DbId,
        requester_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let active: Vec<String> = AdoptionStatus::ACTIVE
            .iter()
            .map(|s| s.as_str().to_string())
            .collect();
        let (exists,): (bool,) = sqlx::query_as(
            "SELECT EXISTS(
                SELECT 1 FROM adoption_requests
                WHERE animal_id = $1 AND requester_id = $2 AND status = ANY($3)
             )",
        )
        .bind(animal_id)
        .bind(requester_id)
        .bind(active)
        .fetch_one(pool)
        .await?;
        Ok(exists)
    }

    /// All requests on one listing, newest first.
    pub async fn list_for_animal(
        pool: &PgPool,
        animal_id: DbId,
    ) -> Result<Vec<AdoptionRequestView>, sqlx::Error> {
        let query = format!(
            "SELECT {QUALIFIED_COLUMNS}, a.name AS animal_name, u.username AS requester_username
             FROM adoption_requests r
             JOIN animals a ON a.id = r.animal_id
             JOIN users u ON u.id = r.requester_id
             WHERE r.animal_id = $1
             ORDER BY r.created_at DESC, r.id DESC"
        );
        sqlx::query_as::<_, AdoptionRequestView>(&query)
            .bind(animal_id)
            .fetch_all(pool)
            .await
    }

    /// A user's own requests, newest first.
    pub async fn list_by_requester(
        pool: &PgPool,
        requester_id: DbId,
        limit: i64,
    ) -> Result<Vec<AdoptionRequestView>, sqlx::Error> {
        let query = format!(
            "SELECT {QUALIFIED_COLUMNS}, a.name AS animal_name, u.username AS requester_username
             FROM adoption_requests r
             JOIN animals a ON a.id = r.animal_id
             JOIN users u ON u.id = r.requester_id
             WHERE r.requester_id = $1
             ORDER BY r.created_at DESC, r.id DESC
             LIMIT $2"
        );
        sqlx::query_as::<_, AdoptionRequestView>(&query)
            .bind(requester_id)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    pub async fn count_by_requester(pool: &PgPool, requester_id: DbId) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM adoption_requests WHERE requester_id = $1")
                .bind(requester_id)
                .fetch_one(pool)
                .await?;
        Ok(count)
    }

    /// Move a request from `from` to `to`, optionally setting owner notes and
    /// the listing's status, in one transaction.
    ///
    /// The update only applies while the request is still in `from`; returns
    /// `None` (and writes nothing) if another writer moved it first.
    pub async fn apply_transition(
        pool: &PgPool,
        id: DbId,
        from: AdoptionStatus,
        to: AdoptionStatus,
        owner_notes: Option<&str>,
        listing_effect: Option<ListingStatus>,
    ) -> Result<Option<AdoptionRequest>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE adoption_requests
             SET status = $3, owner_notes = COALESCE($4, owner_notes)
             WHERE id = $1 AND status = $2
             RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, AdoptionRequest>(&query)
            .bind(id)
            .bind(from.as_str())
            .bind(to.as_str())
            .bind(owner_notes)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(request) = updated else {
            tx.rollback().await?;
            return Ok(None);
        };

        if let Some(listing_status) = listing_effect {
            sqlx::query("UPDATE animals SET status = $2 WHERE id = $1")
                .bind(request.animal_id)
                .bind(listing_status.as_str())
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(Some(request))
    }
}
