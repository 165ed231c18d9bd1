pub mod adoption;
pub mod animals;
pub mod auth;
pub mod donations;
pub mod health;
pub mod pages;
pub mod profile;
pub mod reviews;
pub mod shelters;
pub mod veterinarians;

use axum::Router;

use crate::state::AppState;

/// Build the application route tree. Paths are absolute and keep their
/// trailing slash, so the per-resource routers are merged rather than
/// nested.
///
/// ```text
/// /                                        home
/// /auth/{register,login,refresh,logout}/   accounts
/// /animals/...                             listings, gallery, adoption requests
/// /adoption-request/{id}/{action}/         request transitions
/// /shelters/...                            shelters, donations to a shelter
/// /veterinarians/...                       clinics
/// /donations/...                           donations
/// /review/add/{target_type}/{id}/          reviews
/// /profile/...                             the caller's profile
/// /about/ /contact/ /faq/ /terms/ /privacy/
/// ```
pub fn app_routes() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .merge(animals::router())
        .merge(adoption::router())
        .merge(shelters::router())
        .merge(veterinarians::router())
        .merge(donations::router())
        .merge(reviews::router())
        .merge(profile::router())
        .merge(pages::router())
}
