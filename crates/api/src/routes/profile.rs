//! Route definitions for the caller's profile.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::profile;
use crate::state::AppState;

/// ```text
/// GET|POST  /profile/          -> show, update (requires auth)
/// POST      /profile/avatar/   -> upload_avatar (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/profile/", get(profile::show).post(profile::update))
        .route("/profile/avatar/", post(profile::upload_avatar))
}
