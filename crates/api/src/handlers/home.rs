//! Handler for the home page.

use axum::extract::{Query, State};
use axum::Json;
use pawlink_core::listing::{ListingFilter, LATEST_LISTINGS_LIMIT, LISTING_PAGE_SIZE};
use pawlink_core::shelter::HOME_TOP_SHELTERS;
use pawlink_core::veterinarian::HOME_TOP_VETERINARIANS;
use pawlink_db::models::animal::Animal;
use pawlink_db::models::shelter::ShelterWithMetrics;
use pawlink_db::models::stats::ListingCounts;
use pawlink_db::models::veterinarian::Veterinarian;
use pawlink_db::repositories::{AnimalRepo, DonationRepo, ShelterRepo, VeterinarianRepo};
use serde::Serialize;

use crate::error::AppResult;
use crate::query::{FilterEcho, ListingParams};
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HomePage {
    /// First page of the filtered listings.
    pub animals: Vec<Animal>,
    /// Newest available listings, ignoring the filter.
    pub latest: Vec<Animal>,
    /// Counts over every available listing.
    pub counts: ListingCounts,
    pub active_shelters: i64,
    pub confirmed_donations: i64,
    pub top_shelters: Vec<ShelterWithMetrics>,
    pub top_veterinarians: Vec<Veterinarian>,
    pub filters: FilterEcho,
}

/// GET /
pub async fn home(
    State(state): State<AppState>,
    Query(params): Query<ListingParams>,
) -> AppResult<Json<DataResponse<HomePage>>> {
    let filter = params.filter();
    let unfiltered = ListingFilter::default();

    let animals = AnimalRepo::list_available(&state.pool, &filter, LISTING_PAGE_SIZE, 0).await?;
    let latest =
        AnimalRepo::list_available(&state.pool, &unfiltered, LATEST_LISTINGS_LIMIT, 0).await?;
    let counts = AnimalRepo::counts(&state.pool, &unfiltered).await?;
    let active_shelters = ShelterRepo::count_active(&state.pool).await?;
    let confirmed_donations = DonationRepo::totals(&state.pool).await?.total_count;
    let top_shelters = ShelterRepo::top_rated(&state.pool, HOME_TOP_SHELTERS).await?;
    let top_veterinarians = VeterinarianRepo::top_rated(&state.pool, HOME_TOP_VETERINARIANS).await?;

    Ok(Json(DataResponse::new(HomePage {
        animals,
        latest,
        counts,
        active_shelters,
        confirmed_donations,
        top_shelters: top_shelters.into_iter().map(ShelterWithMetrics::from).collect(),
        top_veterinarians,
        filters: params.echo(),
    })))
}
