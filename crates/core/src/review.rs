//! Review targets, rating validation, and rating aggregation.

use serde::Serialize;

use crate::error::CoreError;
use crate::types::DbId;

/* --------------------------------------------------------------------------
Constants
-------------------------------------------------------------------------- */

pub const MIN_RATING: i16 = 1;
pub const MAX_RATING: i16 = 5;

/// Maximum length for a review comment.
pub const MAX_COMMENT_LENGTH: usize = 5_000;

/* --------------------------------------------------------------------------
Target
-------------------------------------------------------------------------- */

/// The entity a review is written about. Exactly one per review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum ReviewTarget {
    Shelter(DbId),
    Veterinarian(DbId),
}

impl ReviewTarget {
    /// Parse the `<target_type>` path segment.
    pub fn parse(kind: &str, id: DbId) -> Result<Self, CoreError> {
        match kind {
            "shelter" => Ok(ReviewTarget::Shelter(id)),
            "veterinarian" => Ok(ReviewTarget::Veterinarian(id)),
            other => Err(CoreError::validation(
                "target_type",
                format!("Unknown review target '{other}'. Must be one of: shelter, veterinarian"),
            )),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ReviewTarget::Shelter(_) => "shelter",
            ReviewTarget::Veterinarian(_) => "veterinarian",
        }
    }

    pub fn id(&self) -> DbId {
        match self {
            ReviewTarget::Shelter(id) | ReviewTarget::Veterinarian(id) => *id,
        }
    }

    /// Entity name used in not-found errors.
    pub fn entity_name(&self) -> &'static str {
        match self {
            ReviewTarget::Shelter(_) => "Shelter",
            ReviewTarget::Veterinarian(_) => "Veterinarian",
        }
    }

    pub fn not_found(&self) -> CoreError {
        CoreError::NotFound {
            entity: self.entity_name(),
            id: self.id(),
        }
    }

    /// `(shelter_id, veterinarian_id)` column pair for this target.
    pub fn columns(&self) -> (Option<DbId>, Option<DbId>) {
        match self {
            ReviewTarget::Shelter(id) => (Some(*id), None),
            ReviewTarget::Veterinarian(id) => (None, Some(*id)),
        }
    }
}

/* --------------------------------------------------------------------------
Validation
-------------------------------------------------------------------------- */

pub fn validate_rating(rating: i16) -> Result<(), CoreError> {
    if (MIN_RATING..=MAX_RATING).contains(&rating) {
        Ok(())
    } else {
        Err(CoreError::validation(
            "rating",
            format!("Rating must be between {MIN_RATING} and {MAX_RATING}"),
        ))
    }
}

pub fn validate_comment(comment: &str) -> Result<(), CoreError> {
    let trimmed = comment.trim();
    if trimmed.is_empty() {
        return Err(CoreError::validation("comment", "Comment must not be empty"));
    }
    if trimmed.chars().count() > MAX_COMMENT_LENGTH {
        return Err(CoreError::validation(
            "comment",
            format!("Comment exceeds maximum length of {MAX_COMMENT_LENGTH} characters"),
        ));
    }
    Ok(())
}

/* --------------------------------------------------------------------------
Aggregation
-------------------------------------------------------------------------- */

/// Round a rating to one decimal place.
pub fn round_rating(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Mean of all ratings, rounded to one decimal; 0 when there are none.
///
/// Mirrors the SQL recompute run after each review insert.
pub fn mean_rating(ratings: &[i16]) -> f64 {
    if ratings.is_empty() {
        return 0.0;
    }
    let sum: f64 = ratings.iter().map(|r| f64::from(*r)).sum();
    round_rating(sum / ratings.len() as f64)
}
