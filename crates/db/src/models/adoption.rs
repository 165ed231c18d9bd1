//! Adoption request model and DTOs.

use pawlink_core::adoption::AdoptionStatus;
use pawlink_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `adoption_requests` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AdoptionRequest {
    pub id: DbId,
    pub animal_id: DbId,
    pub requester_id: DbId,
    pub message: String,
    pub phone_number: String,
    pub address: String,
    pub experience: Option<String>,
    #[sqlx(try_from = "String")]
    pub status: AdoptionStatus,
    pub owner_notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A request joined with the animal name and requester username.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AdoptionRequestView {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub request: AdoptionRequest,
    pub animal_name: String,
    pub requester_username: String,
}

/// A request with the owner of the listing it targets, for authorization.
#[derive(Debug, Clone, FromRow)]
pub struct AdoptionRequestWithOwner {
    #[sqlx(flatten)]
    pub request: AdoptionRequest,
    pub listing_owner_id: DbId,
}

/// DTO for submitting a request. Status always starts at `pending`.
#[derive(Debug, Clone)]
pub struct CreateAdoptionRequest {
    pub animal_id: DbId,
    pub requester_id: DbId,
    pub message: String,
    pub phone_number: String,
    pub address: String,
    pub experience: Option<String>,
}
