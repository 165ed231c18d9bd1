//! Route definitions for adoption request transitions.

use axum::routing::post;
use axum::Router;

use crate::handlers::adoption;
use crate::state::AppState;

/// ```text
/// POST /adoption-request/{id}/{action}/  -> apply_action (approve | reject | complete | cancel)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/adoption-request/{id}/{action}/",
        post(adoption::apply_action),
    )
}
