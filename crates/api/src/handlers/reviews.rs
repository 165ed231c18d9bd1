//! Handlers for reviews of shelters and clinics.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use pawlink_core::error::CoreError;
use pawlink_core::review::{validate_comment, validate_rating, ReviewTarget};
use pawlink_core::types::DbId;
use pawlink_db::models::review::{CreateReview, Review};
use pawlink_db::repositories::{ReviewRepo, ShelterRepo, VeterinarianRepo};
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Body for `POST /review/add/{target_type}/{id}/`.
#[derive(Debug, Deserialize)]
pub struct ReviewForm {
    pub rating: i16,
    pub comment: String,
}

/// What is being reviewed.
#[derive(Debug, Serialize)]
pub struct TargetSummary {
    pub target: ReviewTarget,
    pub name: String,
    pub rating: f64,
}

/// `GET /review/add/{target_type}/{id}/`
#[derive(Debug, Serialize)]
pub struct ReviewFormContext {
    #[serde(flatten)]
    pub summary: TargetSummary,
    pub already_reviewed: bool,
}

/// `POST /review/add/{target_type}/{id}/`
#[derive(Debug, Serialize)]
pub struct ReviewCreated {
    pub review: Review,
    /// The target's rating after this review.
    pub rating: f64,
}

/// GET /review/add/{target_type}/{id}/
pub async fn review_form(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((target_type, id)): Path<(String, DbId)>,
) -> AppResult<Json<DataResponse<ReviewFormContext>>> {
    let target = ReviewTarget::parse(&target_type, id)?;
    let summary = load_target(&state, target).await?;
    let already_reviewed = ReviewRepo::exists_for(&state.pool, auth.user_id, &target).await?;
    Ok(Json(DataResponse::new(ReviewFormContext {
        summary,
        already_reviewed,
    })))
}

/// POST /review/add/{target_type}/{id}/
///
/// Inserts the review and recomputes the target's rating in one
/// transaction. A second review of the same target by the same user is a
/// conflict and writes nothing.
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((target_type, id)): Path<(String, DbId)>,
    Json(input): Json<ReviewForm>,
) -> AppResult<(StatusCode, Json<DataResponse<ReviewCreated>>)> {
    let target = ReviewTarget::parse(&target_type, id)?;
    load_target(&state, target).await?;

    if ReviewRepo::exists_for(&state.pool, auth.user_id, &target).await? {
        return Err(CoreError::Conflict(format!(
            "You have already reviewed this {}",
            target.kind()
        ))
        .into());
    }
    validate_rating(input.rating)?;
    validate_comment(&input.comment)?;

    let (review, rating) = ReviewRepo::create_and_recompute(
        &state.pool,
        &CreateReview {
            user_id: auth.user_id,
            target,
            rating: input.rating,
            comment: input.comment,
        },
    )
    .await?;

    tracing::info!(
        review_id = review.id,
        user_id = auth.user_id,
        target = target.kind(),
        target_id = id,
        rating,
        "Review added",
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse::new(ReviewCreated { review, rating }).with_message("Review added")),
    ))
}

/// Resolve a target to its display summary. Inactive shelters are not
/// reviewable and read as missing.
async fn load_target(state: &AppState, target: ReviewTarget) -> AppResult<TargetSummary> {
    let found = match target {
        ReviewTarget::Shelter(id) => ShelterRepo::find_active_by_id(&state.pool, id)
            .await?
            .map(|s| (s.name, s.rating)),
        ReviewTarget::Veterinarian(id) => VeterinarianRepo::find_by_id(&state.pool, id)
            .await?
            .map(|v| (v.name, v.rating)),
    };
    let (name, rating) = found.ok_or_else(|| target.not_found())?;
    Ok(TargetSummary {
        target,
        name,
        rating,
    })
}
