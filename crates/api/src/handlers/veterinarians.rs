//! Handlers for the `/veterinarians` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use pawlink_core::enums::Choice;
use pawlink_core::error::CoreError;
use pawlink_core::review::ReviewTarget;
use pawlink_core::types::DbId;
use pawlink_core::validation::validate_input;
use pawlink_core::veterinarian::{ClinicType, ServiceCode, VETERINARIAN_DETAIL_REVIEWS};
use pawlink_db::models::review::ReviewView;
use pawlink_db::models::veterinarian::{CreateVeterinarian, Veterinarian, VeterinarianFilter};
use pawlink_db::repositories::{ReviewRepo, VeterinarianRepo};
use serde::Serialize;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireStaff;
use crate::query::{parse_choice, search_pattern, VeterinarianListParams};
use crate::response::DataResponse;
use crate::state::AppState;

/// Other clinics suggested on a clinic page.
const NEARBY_CLINICS: i64 = 4;

#[derive(Debug, Serialize)]
pub struct VeterinarianList {
    pub veterinarians: Vec<Veterinarian>,
    pub clinic_types: Vec<Choice>,
    pub services: Vec<Choice>,
    pub filters: VeterinarianListParams,
}

#[derive(Debug, Serialize)]
pub struct VeterinarianDetail {
    pub veterinarian: Veterinarian,
    /// Display labels of the offered services.
    pub service_labels: Vec<&'static str>,
    pub reviews: Vec<ReviewView>,
    pub nearby: Vec<Veterinarian>,
    pub already_reviewed: bool,
}

#[derive(Debug, Serialize)]
pub struct VeterinarianFormChoices {
    pub clinic_types: Vec<Choice>,
    pub services: Vec<Choice>,
}

/// GET /veterinarians/
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<VeterinarianListParams>,
) -> AppResult<Json<DataResponse<VeterinarianList>>> {
    let filter = VeterinarianFilter {
        clinic_type: parse_choice(params.clinic_type.as_deref()),
        service: parse_choice(params.service.as_deref()),
        emergency_only: params.emergency.as_deref().map(str::trim) == Some("yes"),
        search_pattern: search_pattern(params.search.as_deref()),
    };
    let veterinarians = VeterinarianRepo::list(&state.pool, &filter).await?;

    Ok(Json(DataResponse::new(VeterinarianList {
        veterinarians,
        clinic_types: ClinicType::choices(),
        services: ServiceCode::choices(),
        filters: params,
    })))
}

/// GET /veterinarians/{id}/
pub async fn detail(
    State(state): State<AppState>,
    viewer: Option<AuthUser>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<VeterinarianDetail>>> {
    let veterinarian = VeterinarianRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Veterinarian",
            id,
        })?;
    let target = ReviewTarget::Veterinarian(id);

    let reviews =
        ReviewRepo::list_for_target(&state.pool, &target, Some(VETERINARIAN_DETAIL_REVIEWS))
            .await?;
    let nearby = VeterinarianRepo::others(&state.pool, id, NEARBY_CLINICS).await?;
    let already_reviewed = match &viewer {
        Some(user) => ReviewRepo::exists_for(&state.pool, user.user_id, &target).await?,
        None => false,
    };

    Ok(Json(DataResponse::new(VeterinarianDetail {
        service_labels: veterinarian.services.labels(),
        veterinarian,
        reviews,
        nearby,
        already_reviewed,
    })))
}

/// GET /veterinarians/create/
pub async fn create_form(_staff: RequireStaff) -> Json<DataResponse<VeterinarianFormChoices>> {
    Json(DataResponse::new(VeterinarianFormChoices {
        clinic_types: ClinicType::choices(),
        services: ServiceCode::choices(),
    }))
}

/// POST /veterinarians/create/
pub async fn create(
    State(state): State<AppState>,
    RequireStaff(staff): RequireStaff,
    Json(input): Json<CreateVeterinarian>,
) -> AppResult<(StatusCode, Json<DataResponse<Veterinarian>>)> {
    validate_input(&input)?;
    let veterinarian = VeterinarianRepo::create(&state.pool, &input).await?;
    tracing::info!(
        veterinarian_id = veterinarian.id,
        staff_id = staff.user_id,
        "Veterinarian created",
    );
    Ok((
        StatusCode::CREATED,
        Json(DataResponse::new(veterinarian).with_message("Clinic created")),
    ))
}
