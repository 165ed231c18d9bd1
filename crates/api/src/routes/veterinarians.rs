//! Route definitions for the `/veterinarians` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::veterinarians;
use crate::state::AppState;

/// ```text
/// GET       /veterinarians/          -> list
/// GET|POST  /veterinarians/create/   -> create_form, create (staff)
/// GET       /veterinarians/{id}/     -> detail
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/veterinarians/", get(veterinarians::list))
        .route(
            "/veterinarians/create/",
            get(veterinarians::create_form).post(veterinarians::create),
        )
        .route("/veterinarians/{id}/", get(veterinarians::detail))
}
