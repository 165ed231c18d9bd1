//! Route definitions for the `/shelters` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::shelters;
use crate::state::AppState;

/// ```text
/// GET       /shelters/               -> list
/// GET|POST  /shelters/create/        -> create_form, create (staff)
/// GET       /shelters/{id}/          -> detail
/// GET|POST  /shelters/{id}/donate/   -> donate_form, donate (requires auth)
/// POST      /shelters/{id}/image/    -> upload_image (staff)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/shelters/", get(shelters::list))
        .route(
            "/shelters/create/",
            get(shelters::create_form).post(shelters::create),
        )
        .route("/shelters/{id}/", get(shelters::detail))
        .route(
            "/shelters/{id}/donate/",
            get(shelters::donate_form).post(shelters::donate),
        )
        .route("/shelters/{id}/image/", post(shelters::upload_image))
}
