//! Handlers for the `/animals` resource: browsing, the caller's own
//! listings, create/edit/delete, and gallery uploads.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use pawlink_core::access::ensure_listing_manager;
use pawlink_core::animal::{
    resolve_price, AnimalType, Gender, ListingStatus, MAX_BREED_LENGTH, MAX_LOCATION_LENGTH,
    MAX_NAME_LENGTH, MAX_PHONE_LENGTH, SIMILAR_LISTINGS_LIMIT,
};
use pawlink_core::enums::Choice;
use pawlink_core::error::CoreError;
use pawlink_core::listing::LISTING_PAGE_SIZE;
use pawlink_core::pagination::{Page, PageWindow};
use pawlink_core::types::{DbId, Money};
use pawlink_core::validation::validate_input;
use pawlink_db::models::adoption::AdoptionRequestView;
use pawlink_db::models::animal::{Animal, AnimalImage, CreateAnimal, CreateAnimalImage, UpdateAnimal};
use pawlink_db::models::stats::ListingCounts;
use pawlink_db::repositories::{AdoptionRequestRepo, AnimalImageRepo, AnimalRepo};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::AppResult;
use crate::media::{self, MediaDir};
use crate::middleware::auth::AuthUser;
use crate::query::{FilterEcho, ListingParams, PageParams};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Body for `POST /animals/add/` and `POST /animals/{id}/edit/`.
#[derive(Debug, Deserialize, Validate)]
pub struct AnimalForm {
    #[validate(length(min = 1, max = MAX_NAME_LENGTH, message = "Name is required"))]
    pub name: String,
    pub animal_type: AnimalType,
    #[validate(length(max = MAX_BREED_LENGTH))]
    pub breed: Option<String>,
    #[validate(range(min = 0, max = 100))]
    pub age: Option<i32>,
    #[serde(default)]
    pub gender: Gender,
    pub description: Option<String>,
    #[validate(length(min = 1, max = MAX_LOCATION_LENGTH, message = "Location is required"))]
    pub location: String,
    #[serde(default)]
    pub is_for_sale: bool,
    pub price: Option<Money>,
    #[serde(default)]
    pub vaccinated: bool,
    #[serde(default)]
    pub sterilized: bool,
    #[validate(length(max = MAX_PHONE_LENGTH))]
    pub phone_number: Option<String>,
    /// Edit only. Keeps the current status when omitted.
    pub status: Option<ListingStatus>,
}

/// Select options for the listing form.
#[derive(Debug, Serialize)]
pub struct ListingFormChoices {
    pub animal_types: Vec<Choice>,
    pub genders: Vec<Choice>,
    pub statuses: Vec<Choice>,
}

impl ListingFormChoices {
    fn all() -> Self {
        Self {
            animal_types: AnimalType::choices(),
            genders: Gender::choices(),
            statuses: ListingStatus::choices(),
        }
    }
}

/// `GET /animals/`
#[derive(Debug, Serialize)]
pub struct ListingPage {
    pub page: Page<Animal>,
    pub counts: ListingCounts,
    pub filters: FilterEcho,
    pub animal_types: Vec<Choice>,
}

/// `GET /animals/{id}/`
#[derive(Debug, Serialize)]
pub struct AnimalDetail {
    pub animal: Animal,
    pub images: Vec<AnimalImage>,
    pub similar: Vec<Animal>,
    pub is_owner: bool,
    /// Present for the listing owner only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adoption_requests: Option<Vec<AdoptionRequestView>>,
    /// Whether the caller already holds a pending or approved request.
    pub has_active_request: bool,
}

/// `GET /animals/{id}/edit/`
#[derive(Debug, Serialize)]
pub struct EditForm {
    pub animal: Animal,
    #[serde(flatten)]
    pub choices: ListingFormChoices,
}

// ---------------------------------------------------------------------------
// Browsing
// ---------------------------------------------------------------------------

/// GET /animals/
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListingParams>,
) -> AppResult<Json<DataResponse<ListingPage>>> {
    let filter = params.filter();

    let total = AnimalRepo::count_available(&state.pool, &filter).await?;
    let window = PageWindow::resolve(params.page(), total, LISTING_PAGE_SIZE);
    let items =
        AnimalRepo::list_available(&state.pool, &filter, window.per_page, window.offset()).await?;
    let counts = AnimalRepo::counts(&state.pool, &filter).await?;

    Ok(Json(DataResponse::new(ListingPage {
        page: Page::new(items, window),
        counts,
        filters: params.echo(),
        animal_types: AnimalType::choices(),
    })))
}

/// GET /animals/my/
pub async fn my_listings(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<PageParams>,
) -> AppResult<Json<DataResponse<Page<Animal>>>> {
    let total = AnimalRepo::count_by_owner(&state.pool, auth.user_id).await?;
    let window = PageWindow::resolve(params.page(), total, LISTING_PAGE_SIZE);
    let items =
        AnimalRepo::list_by_owner(&state.pool, auth.user_id, window.per_page, window.offset())
            .await?;
    Ok(Json(DataResponse::new(Page::new(items, window))))
}

/// GET /animals/{id}/
pub async fn detail(
    State(state): State<AppState>,
    viewer: Option<AuthUser>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<AnimalDetail>>> {
    let animal = find_animal(&state, id).await?;
    let images = AnimalImageRepo::list_for_animal(&state.pool, id).await?;
    let similar = AnimalRepo::similar(&state.pool, &animal, SIMILAR_LISTINGS_LIMIT).await?;

    let is_owner = viewer
        .as_ref()
        .is_some_and(|u| u.actor().is_owner_of(animal.owner_id));
    let adoption_requests = if is_owner {
        Some(AdoptionRequestRepo::list_for_animal(&state.pool, id).await?)
    } else {
        None
    };
    let has_active_request = match &viewer {
        Some(u) if !is_owner => AdoptionRequestRepo::has_active(&state.pool, id, u.user_id).await?,
        _ => false,
    };

    Ok(Json(DataResponse::new(AnimalDetail {
        animal,
        images,
        similar,
        is_owner,
        adoption_requests,
        has_active_request,
    })))
}

// ---------------------------------------------------------------------------
// Mutations
// ---------------------------------------------------------------------------

/// GET /animals/add/
pub async fn add_form(_auth: AuthUser) -> Json<DataResponse<ListingFormChoices>> {
    Json(DataResponse::new(ListingFormChoices::all()))
}

/// POST /animals/add/
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<AnimalForm>,
) -> AppResult<(StatusCode, Json<DataResponse<Animal>>)> {
    validate_input(&input)?;
    let price = resolve_price(input.is_for_sale, input.price)?;

    let animal = AnimalRepo::create(
        &state.pool,
        &CreateAnimal {
            owner_id: auth.user_id,
            name: input.name.trim().to_string(),
            animal_type: input.animal_type,
            breed: input.breed,
            age: input.age,
            gender: input.gender,
            description: input.description,
            location: input.location.trim().to_string(),
            is_for_sale: input.is_for_sale,
            price,
            vaccinated: input.vaccinated,
            sterilized: input.sterilized,
            phone_number: input.phone_number,
        },
    )
    .await?;

    tracing::info!(
        animal_id = animal.id,
        owner_id = auth.user_id,
        animal_type = %animal.animal_type,
        "Listing created",
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse::new(animal).with_message("Listing created")),
    ))
}

/// GET /animals/{id}/edit/
pub async fn edit_form(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<EditForm>>> {
    let animal = find_animal(&state, id).await?;
    ensure_listing_manager(&auth.actor(), animal.owner_id)?;
    Ok(Json(DataResponse::new(EditForm {
        animal,
        choices: ListingFormChoices::all(),
    })))
}

/// POST /animals/{id}/edit/
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<AnimalForm>,
) -> AppResult<Json<DataResponse<Animal>>> {
    let current = find_animal(&state, id).await?;
    ensure_listing_manager(&auth.actor(), current.owner_id)?;
    validate_input(&input)?;
    let price = resolve_price(input.is_for_sale, input.price)?;

    let animal = AnimalRepo::update(
        &state.pool,
        id,
        &UpdateAnimal {
            name: input.name.trim().to_string(),
            animal_type: input.animal_type,
            breed: input.breed,
            age: input.age,
            gender: input.gender,
            description: input.description,
            location: input.location.trim().to_string(),
            is_for_sale: input.is_for_sale,
            price,
            status: input.status.unwrap_or(current.status),
            vaccinated: input.vaccinated,
            sterilized: input.sterilized,
            phone_number: input.phone_number,
        },
    )
    .await?
    .ok_or(CoreError::NotFound {
        entity: "Animal",
        id,
    })?;

    tracing::info!(animal_id = id, user_id = auth.user_id, status = %animal.status, "Listing updated");
    Ok(Json(DataResponse::new(animal).with_message("Listing updated")))
}

/// POST /animals/{id}/delete/
///
/// Images and adoption requests go with the listing.
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let animal = find_animal(&state, id).await?;
    ensure_listing_manager(&auth.actor(), animal.owner_id)?;

    if !AnimalRepo::delete(&state.pool, id).await? {
        return Err(CoreError::NotFound {
            entity: "Animal",
            id,
        }
        .into());
    }
    tracing::info!(animal_id = id, user_id = auth.user_id, "Listing deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /animals/{id}/images/
///
/// Multipart body: `image` file part plus an optional `is_primary` flag. A
/// primary image also becomes the listing's main image.
pub async fn upload_image(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<AnimalImage>>)> {
    let animal = find_animal(&state, id).await?;
    ensure_listing_manager(&auth.actor(), animal.owner_id)?;

    let mut form = media::read_multipart(multipart, "image").await?;
    let upload = form.require_file("image")?;
    let is_primary = form.flag("is_primary");

    let path = media::store(&state.config.media_root, MediaDir::AnimalGallery, "image", &upload).await?;
    let image = AnimalImageRepo::create(
        &state.pool,
        &CreateAnimalImage {
            animal_id: id,
            image_path: path,
            is_primary,
        },
    )
    .await?;
    if is_primary {
        AnimalRepo::set_image_path(&state.pool, id, &image.image_path).await?;
    }

    tracing::info!(animal_id = id, image_id = image.id, is_primary, "Gallery image added");
    Ok((
        StatusCode::CREATED,
        Json(DataResponse::new(image).with_message("Image uploaded")),
    ))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Load a listing of any status or fail with 404.
pub(crate) async fn find_animal(state: &AppState, id: DbId) -> AppResult<Animal> {
    let animal = AnimalRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Animal",
            id,
        })?;
    Ok(animal)
}
