//! Handlers for the `/donations` resource.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use pawlink_core::access::can_view_donation;
use pawlink_core::donation::{validate_amount, DonationStatus, DonationType, DONATION_LIST_LIMIT};
use pawlink_core::enums::Choice;
use pawlink_core::error::CoreError;
use pawlink_core::types::{DbId, Money};
use pawlink_core::validation::validate_input;
use pawlink_db::models::donation::{
    CreateDonation, Donation, DonationFilter, DonationResponse, DonationTotals,
};
use pawlink_db::models::shelter::{Shelter, ShelterFilter};
use pawlink_db::repositories::{DonationRepo, ShelterRepo};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::AppResult;
use crate::media::{self, MediaDir};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireStaff;
use crate::query::{parse_choice, DonationListParams};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Donation fields shared by both entry points.
#[derive(Debug, Deserialize, Validate)]
pub struct DonationForm {
    pub donation_type: DonationType,
    pub amount: Money,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    #[serde(default)]
    pub is_anonymous: bool,
    #[validate(length(max = 2000))]
    pub message: Option<String>,
}

/// Body for `POST /donations/create/`.
#[derive(Debug, Deserialize)]
pub struct CreateDonationRequest {
    pub shelter_id: DbId,
    #[serde(flatten)]
    pub donation: DonationForm,
}

/// Body for `POST /donations/{id}/status/`.
#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: DonationStatus,
}

/// `GET /donations/`
#[derive(Debug, Serialize)]
pub struct DonationList {
    pub donations: Vec<DonationResponse>,
    pub totals: DonationTotals,
    /// The caller's own donations; absent for anonymous visitors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_donations: Option<Vec<DonationResponse>>,
    pub shelters: Vec<Shelter>,
    pub donation_types: Vec<Choice>,
    pub statuses: Vec<Choice>,
    pub filters: DonationListParams,
}

/// `GET /donations/create/`
#[derive(Debug, Serialize)]
pub struct DonationFormContext {
    pub shelters: Vec<Shelter>,
    pub donation_types: Vec<Choice>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /donations/
///
/// Newest first, capped at [`DONATION_LIST_LIMIT`]. Unknown filter values
/// are ignored.
pub async fn list(
    State(state): State<AppState>,
    viewer: Option<AuthUser>,
    Query(params): Query<DonationListParams>,
) -> AppResult<Json<DataResponse<DonationList>>> {
    let filter = DonationFilter {
        donation_type: parse_choice(params.donation_type.as_deref()),
        status: parse_choice(params.status.as_deref()),
        shelter_id: parse_choice(params.shelter.as_deref()),
    };

    let donations = DonationRepo::list(&state.pool, &filter, DONATION_LIST_LIMIT).await?;
    let totals = DonationRepo::totals(&state.pool).await?;
    let actor = viewer.as_ref().map(AuthUser::actor);
    let render = |view| DonationResponse::for_viewer(view, actor.as_ref());
    let user_donations = match &viewer {
        Some(user) => Some(
            DonationRepo::list_by_donor(&state.pool, user.user_id, DONATION_LIST_LIMIT)
                .await?
                .into_iter()
                .map(render)
                .collect(),
        ),
        None => None,
    };
    let shelters = ShelterRepo::list_active(&state.pool, &ShelterFilter::default()).await?;

    Ok(Json(DataResponse::new(DonationList {
        donations: donations.into_iter().map(render).collect(),
        totals,
        user_donations,
        shelters,
        donation_types: DonationType::choices(),
        statuses: DonationStatus::choices(),
        filters: params,
    })))
}

/// GET /donations/create/
pub async fn create_form(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> AppResult<Json<DataResponse<DonationFormContext>>> {
    let shelters = ShelterRepo::list_active(&state.pool, &ShelterFilter::default()).await?;
    Ok(Json(DataResponse::new(DonationFormContext {
        shelters,
        donation_types: DonationType::choices(),
    })))
}

/// POST /donations/create/
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CreateDonationRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Donation>>)> {
    let donation = record_donation(&state, &auth, input.shelter_id, input.donation).await?;
    Ok((
        StatusCode::CREATED,
        Json(DataResponse::new(donation).with_message("Thank you for your donation")),
    ))
}

/// GET /donations/{id}/
///
/// Visible to the donor, to staff, and to anyone when anonymous.
pub async fn detail(
    State(state): State<AppState>,
    viewer: Option<AuthUser>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<DonationResponse>>> {
    let view = DonationRepo::find_view_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Donation",
            id,
        })?;

    let actor = viewer.as_ref().map(AuthUser::actor);
    if !can_view_donation(
        actor.as_ref(),
        view.donation.donor_id,
        view.donation.is_anonymous,
    ) {
        return Err(CoreError::Forbidden("You cannot view this donation".into()).into());
    }

    Ok(Json(DataResponse::new(DonationResponse::for_viewer(view, actor.as_ref()))))
}

/// POST /donations/{id}/status/
pub async fn update_status(
    State(state): State<AppState>,
    RequireStaff(staff): RequireStaff,
    Path(id): Path<DbId>,
    Json(input): Json<StatusUpdate>,
) -> AppResult<Json<DataResponse<Donation>>> {
    let donation = DonationRepo::update_status(&state.pool, id, input.status)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Donation",
            id,
        })?;

    tracing::info!(
        donation_id = id,
        staff_id = staff.user_id,
        status = %donation.status,
        "Donation status updated",
    );
    Ok(Json(
        DataResponse::new(donation).with_message("Donation status updated"),
    ))
}

/// POST /donations/{id}/receipt/
///
/// Multipart body with a `receipt` image. Donor only.
pub async fn upload_receipt(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<Json<DataResponse<Donation>>> {
    let donation = DonationRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Donation",
            id,
        })?;
    if donation.donor_id != Some(auth.user_id) {
        return Err(CoreError::Forbidden("Only the donor can attach a receipt".into()).into());
    }

    let mut form = media::read_multipart(multipart, "receipt").await?;
    let upload = form.require_file("receipt")?;
    let path =
        media::store(&state.config.media_root, MediaDir::DonationReceipts, "receipt", &upload)
            .await?;
    DonationRepo::set_receipt_path(&state.pool, id, &path).await?;

    let donation = Donation {
        receipt_path: Some(path),
        ..donation
    };
    tracing::info!(donation_id = id, user_id = auth.user_id, "Receipt uploaded");
    Ok(Json(DataResponse::new(donation).with_message("Receipt uploaded")))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Record a pending donation from `donor` to an active shelter.
pub(crate) async fn record_donation(
    state: &AppState,
    donor: &AuthUser,
    shelter_id: DbId,
    form: DonationForm,
) -> AppResult<Donation> {
    ShelterRepo::find_active_by_id(&state.pool, shelter_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Shelter",
            id: shelter_id,
        })?;
    validate_input(&form)?;
    validate_amount(form.amount)?;

    let donation = DonationRepo::create(
        &state.pool,
        &CreateDonation {
            donor_id: Some(donor.user_id),
            shelter_id,
            donation_type: form.donation_type,
            amount: form.amount,
            description: form.description.filter(|d| !d.trim().is_empty()),
            is_anonymous: form.is_anonymous,
            message: form.message.filter(|m| !m.trim().is_empty()),
        },
    )
    .await?;

    tracing::info!(
        donation_id = donation.id,
        donor_id = donor.user_id,
        shelter_id,
        amount = %donation.amount,
        "Donation recorded",
    );
    Ok(donation)
}
