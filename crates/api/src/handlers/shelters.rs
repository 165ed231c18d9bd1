//! Handlers for the `/shelters` resource.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use pawlink_core::donation::DonationType;
use pawlink_core::enums::Choice;
use pawlink_core::error::CoreError;
use pawlink_core::review::ReviewTarget;
use pawlink_core::shelter::{
    ShelterType, SHELTER_DETAIL_ANIMALS, SHELTER_DETAIL_DONATIONS, SHELTER_DETAIL_REVIEWS,
};
use pawlink_core::types::DbId;
use pawlink_core::validation::validate_input;
use pawlink_db::models::animal::Animal;
use pawlink_db::models::donation::{Donation, DonationFilter, DonationResponse, DonationTotals};
use pawlink_db::models::review::ReviewView;
use pawlink_db::models::shelter::{
    CapacityTotals, CreateShelter, Shelter, ShelterFilter, ShelterWithMetrics,
};
use pawlink_db::repositories::{AnimalRepo, DonationRepo, ReviewRepo, ShelterRepo};
use serde::Serialize;

use super::donations::{record_donation, DonationForm};
use crate::error::AppResult;
use crate::media::{self, MediaDir};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireStaff;
use crate::query::{parse_choice, search_pattern, ShelterListParams};
use crate::response::DataResponse;
use crate::state::AppState;

/// `GET /shelters/`
#[derive(Debug, Serialize)]
pub struct ShelterList {
    pub shelters: Vec<ShelterWithMetrics>,
    pub totals: CapacityTotals,
    pub shelter_types: Vec<Choice>,
    pub filters: ShelterListParams,
}

/// `GET /shelters/{id}/`
#[derive(Debug, Serialize)]
pub struct ShelterDetail {
    pub shelter: ShelterWithMetrics,
    pub reviews: Vec<ReviewView>,
    pub recent_donations: Vec<DonationResponse>,
    pub donation_totals: DonationTotals,
    /// Available listings placed with this shelter.
    pub animals: Vec<Animal>,
    pub already_reviewed: bool,
}

/// `GET /shelters/{id}/donate/`
#[derive(Debug, Serialize)]
pub struct DonateForm {
    pub shelter: ShelterWithMetrics,
    pub donation_types: Vec<Choice>,
}

/// GET /shelters/
///
/// Active shelters only, best rated first.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ShelterListParams>,
) -> AppResult<Json<DataResponse<ShelterList>>> {
    let filter = ShelterFilter {
        shelter_type: parse_choice(params.shelter_type.as_deref()),
        search_pattern: search_pattern(params.search.as_deref()),
    };
    let shelters = ShelterRepo::list_active(&state.pool, &filter).await?;
    let totals = ShelterRepo::capacity_totals(&state.pool).await?;

    Ok(Json(DataResponse::new(ShelterList {
        shelters: shelters.into_iter().map(ShelterWithMetrics::from).collect(),
        totals,
        shelter_types: ShelterType::choices(),
        filters: params,
    })))
}

/// GET /shelters/{id}/
pub async fn detail(
    State(state): State<AppState>,
    viewer: Option<AuthUser>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ShelterDetail>>> {
    let shelter = find_active(&state, id).await?;
    let target = ReviewTarget::Shelter(id);

    let reviews =
        ReviewRepo::list_for_target(&state.pool, &target, Some(SHELTER_DETAIL_REVIEWS)).await?;
    let recent_donations = DonationRepo::list(
        &state.pool,
        &DonationFilter {
            shelter_id: Some(id),
            ..Default::default()
        },
        SHELTER_DETAIL_DONATIONS,
    )
    .await?;
    let donation_totals = DonationRepo::totals_for_shelter(&state.pool, id).await?;
    let animals = AnimalRepo::for_shelter(&state.pool, &shelter.name, SHELTER_DETAIL_ANIMALS).await?;
    let already_reviewed = match &viewer {
        Some(user) => ReviewRepo::exists_for(&state.pool, user.user_id, &target).await?,
        None => false,
    };
    let actor = viewer.as_ref().map(AuthUser::actor);

    Ok(Json(DataResponse::new(ShelterDetail {
        shelter: shelter.into(),
        reviews,
        recent_donations: recent_donations
            .into_iter()
            .map(|view| DonationResponse::for_viewer(view, actor.as_ref()))
            .collect(),
        donation_totals,
        animals,
        already_reviewed,
    })))
}

/// GET /shelters/create/
pub async fn create_form(_staff: RequireStaff) -> Json<DataResponse<Vec<Choice>>> {
    Json(DataResponse::new(ShelterType::choices()))
}

/// POST /shelters/create/
pub async fn create(
    State(state): State<AppState>,
    RequireStaff(staff): RequireStaff,
    Json(input): Json<CreateShelter>,
) -> AppResult<(StatusCode, Json<DataResponse<ShelterWithMetrics>>)> {
    validate_input(&input)?;
    let shelter = ShelterRepo::create(&state.pool, &input).await?;
    tracing::info!(shelter_id = shelter.id, staff_id = staff.user_id, "Shelter created");
    Ok((
        StatusCode::CREATED,
        Json(DataResponse::new(ShelterWithMetrics::from(shelter)).with_message("Shelter created")),
    ))
}

/// POST /shelters/{id}/image/
///
/// Multipart body with an `image` file part.
pub async fn upload_image(
    State(state): State<AppState>,
    RequireStaff(staff): RequireStaff,
    Path(id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<Json<DataResponse<ShelterWithMetrics>>> {
    let shelter = ShelterRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Shelter",
            id,
        })?;

    let mut form = media::read_multipart(multipart, "image").await?;
    let upload = form.require_file("image")?;
    let path =
        media::store(&state.config.media_root, MediaDir::ShelterImages, "image", &upload).await?;
    ShelterRepo::set_image_path(&state.pool, id, &path).await?;

    tracing::info!(shelter_id = id, staff_id = staff.user_id, "Shelter image uploaded");
    let mut shelter = ShelterWithMetrics::from(shelter);
    shelter.shelter.image_path = Some(path);
    Ok(Json(DataResponse::new(shelter).with_message("Image uploaded")))
}

/// GET /shelters/{id}/donate/
pub async fn donate_form(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<DonateForm>>> {
    let shelter = find_active(&state, id).await?;
    Ok(Json(DataResponse::new(DonateForm {
        shelter: shelter.into(),
        donation_types: DonationType::choices(),
    })))
}

/// POST /shelters/{id}/donate/
pub async fn donate(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<DonationForm>,
) -> AppResult<(StatusCode, Json<DataResponse<Donation>>)> {
    let donation = record_donation(&state, &auth, id, input).await?;
    Ok((
        StatusCode::CREATED,
        Json(DataResponse::new(donation).with_message("Thank you for your donation")),
    ))
}

/// Load an active shelter or fail with 404.
async fn find_active(state: &AppState, id: DbId) -> AppResult<Shelter> {
    let shelter = ShelterRepo::find_active_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Shelter",
            id,
        })?;
    Ok(shelter)
}
