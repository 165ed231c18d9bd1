//! Route definitions for the `/animals` resource, including adoption
//! request submission.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{adoption, animals, home};
use crate::state::AppState;

/// ```text
/// GET       /                                -> home
///
/// GET       /animals/                        -> list
/// GET       /animals/my/                     -> my_listings (requires auth)
/// GET|POST  /animals/add/                    -> add_form, create (requires auth)
/// GET       /animals/{id}/                   -> detail
/// GET|POST  /animals/{id}/edit/              -> edit_form, update (owner or staff)
/// POST      /animals/{id}/delete/            -> delete (owner or staff)
/// POST      /animals/{id}/images/            -> upload_image (owner or staff)
/// GET|POST  /animals/{id}/request-adoption/  -> request_form, submit (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/animals/", get(animals::list))
        .route("/animals/my/", get(animals::my_listings))
        .route("/animals/add/", get(animals::add_form).post(animals::create))
        .route("/animals/{id}/", get(animals::detail))
        .route(
            "/animals/{id}/edit/",
            get(animals::edit_form).post(animals::update),
        )
        .route("/animals/{id}/delete/", post(animals::delete))
        .route("/animals/{id}/images/", post(animals::upload_image))
        .route(
            "/animals/{id}/request-adoption/",
            get(adoption::request_form).post(adoption::submit),
        )
}
