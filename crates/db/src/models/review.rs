//! Review entity model and DTOs.

use pawlink_core::review::ReviewTarget;
use pawlink_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `reviews` table. Exactly one of `shelter_id` and
/// `veterinarian_id` is set.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Review {
    pub id: DbId,
    pub user_id: DbId,
    pub shelter_id: Option<DbId>,
    pub veterinarian_id: Option<DbId>,
    pub rating: i16,
    pub comment: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Review {
    pub fn target(&self) -> Option<ReviewTarget> {
        match (self.shelter_id, self.veterinarian_id) {
            (Some(id), None) => Some(ReviewTarget::Shelter(id)),
            (None, Some(id)) => Some(ReviewTarget::Veterinarian(id)),
            _ => None,
        }
    }
}

/// A review joined with its author's username.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ReviewView {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub review: Review,
    pub username: String,
}

/// DTO for creating a review.
#[derive(Debug, Clone)]
pub struct CreateReview {
    pub user_id: DbId,
    pub target: ReviewTarget,
    pub rating: i16,
    pub comment: String,
}
