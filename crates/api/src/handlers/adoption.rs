//! Handlers for adoption requests: submitting one against a listing and
//! moving it through its lifecycle.

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use pawlink_core::adoption::{
    authorize, ensure_can_request, transition, AdoptionAction, MAX_NOTES_LENGTH,
};
use pawlink_core::animal::MAX_PHONE_LENGTH;
use pawlink_core::error::CoreError;
use pawlink_core::types::DbId;
use pawlink_core::validation::{require_non_blank, validate_input};
use pawlink_db::models::adoption::{AdoptionRequest, CreateAdoptionRequest};
use pawlink_db::models::animal::Animal;
use pawlink_db::repositories::AdoptionRequestRepo;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::handlers::animals::find_animal;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Body for `POST /animals/{id}/request-adoption/`.
#[derive(Debug, Deserialize, Validate)]
pub struct AdoptionRequestForm {
    #[validate(length(max = 5000))]
    pub message: String,
    #[validate(length(max = MAX_PHONE_LENGTH))]
    pub phone_number: String,
    #[validate(length(max = 500))]
    pub address: String,
    pub experience: Option<String>,
}

/// Optional body for `POST /adoption-request/{id}/{action}/`.
#[derive(Debug, Default, Deserialize)]
pub struct TransitionBody {
    pub notes: Option<String>,
}

/// `GET /animals/{id}/request-adoption/`
#[derive(Debug, Serialize)]
pub struct RequestForm {
    pub animal: Animal,
}

/// GET /animals/{id}/request-adoption/
///
/// Runs the submission guard so a client learns up front whether the
/// caller may request this listing.
pub async fn request_form(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<RequestForm>>> {
    let animal = guarded_listing(&state, &auth, id).await?;
    Ok(Json(DataResponse::new(RequestForm { animal })))
}

/// POST /animals/{id}/request-adoption/
pub async fn submit(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<AdoptionRequestForm>,
) -> AppResult<(StatusCode, Json<DataResponse<AdoptionRequest>>)> {
    guarded_listing(&state, &auth, id).await?;

    validate_input(&input)?;
    require_non_blank("message", &input.message)?;
    require_non_blank("phone_number", &input.phone_number)?;
    require_non_blank("address", &input.address)?;

    let request = AdoptionRequestRepo::create(
        &state.pool,
        &CreateAdoptionRequest {
            animal_id: id,
            requester_id: auth.user_id,
            message: input.message.trim().to_string(),
            phone_number: input.phone_number.trim().to_string(),
            address: input.address.trim().to_string(),
            experience: input.experience.filter(|e| !e.trim().is_empty()),
        },
    )
    .await?;

    tracing::info!(
        request_id = request.id,
        animal_id = id,
        requester_id = auth.user_id,
        "Adoption request submitted",
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse::new(request).with_message("Adoption request sent")),
    ))
}

/// POST /adoption-request/{id}/{action}/
///
/// `approve`, `reject` and `complete` are for the listing owner, `cancel`
/// for the requester. A `reject` may carry `{"notes": "..."}`.
pub async fn apply_action(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((id, action)): Path<(DbId, String)>,
    body: Bytes,
) -> AppResult<Json<DataResponse<AdoptionRequest>>> {
    let action: AdoptionAction = action.parse()?;
    let body: TransitionBody = if body.is_empty() {
        TransitionBody::default()
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| AppError::BadRequest(format!("Invalid JSON body: {e}")))?
    };

    let found = AdoptionRequestRepo::find_with_owner(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "AdoptionRequest",
            id,
        })?;
    let current = &found.request;

    authorize(action, auth.user_id, found.listing_owner_id, current.requester_id)?;
    let next = transition(current.status, action)?;

    let notes = match action {
        AdoptionAction::Reject => body
            .notes
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty()),
        _ => None,
    };
    if notes
        .as_ref()
        .is_some_and(|n| n.chars().count() > MAX_NOTES_LENGTH)
    {
        return Err(CoreError::validation(
            "notes",
            format!("Notes exceed maximum length of {MAX_NOTES_LENGTH} characters"),
        )
        .into());
    }

    let updated = AdoptionRequestRepo::apply_transition(
        &state.pool,
        id,
        current.status,
        next,
        notes.as_deref(),
        action.listing_effect(),
    )
    .await?
    // Someone else moved the request between our read and the write.
    .ok_or(CoreError::InvalidTransition {
        from: current.status.as_str(),
        action: action.as_str(),
    })?;

    tracing::info!(
        request_id = id,
        user_id = auth.user_id,
        action = %action,
        from = %current.status,
        to = %updated.status,
        "Adoption request transitioned",
    );

    let message = format!("Request {}", updated.status.label().to_lowercase());
    Ok(Json(DataResponse::new(updated).with_message(message)))
}

/// Load the listing and apply the submission guard for `auth`.
async fn guarded_listing(state: &AppState, auth: &AuthUser, id: DbId) -> AppResult<Animal> {
    let animal = find_animal(state, id).await?;
    let has_active = AdoptionRequestRepo::has_active(&state.pool, id, auth.user_id).await?;
    ensure_can_request(id, animal.status, animal.owner_id, auth.user_id, has_active)?;
    Ok(animal)
}
