//! Route definitions for reviews.

use axum::routing::get;
use axum::Router;

use crate::handlers::reviews;
use crate::state::AppState;

/// ```text
/// GET|POST  /review/add/{target_type}/{id}/  -> review_form, create (requires auth)
/// ```
///
/// `target_type` is `shelter` or `veterinarian`.
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/review/add/{target_type}/{id}/",
        get(reviews::review_form).post(reviews::create),
    )
}
