//! Route definitions for the `/donations` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::donations;
use crate::state::AppState;

/// ```text
/// GET       /donations/                -> list
/// GET|POST  /donations/create/         -> create_form, create (requires auth)
/// GET       /donations/{id}/           -> detail (donor, staff, or anyone if anonymous)
/// POST      /donations/{id}/status/    -> update_status (staff)
/// POST      /donations/{id}/receipt/   -> upload_receipt (donor)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/donations/", get(donations::list))
        .route(
            "/donations/create/",
            get(donations::create_form).post(donations::create),
        )
        .route("/donations/{id}/", get(donations::detail))
        .route("/donations/{id}/status/", post(donations::update_status))
        .route("/donations/{id}/receipt/", post(donations::upload_receipt))
}
