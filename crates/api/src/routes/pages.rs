//! Route definitions for the about, contact and static pages.

use axum::routing::get;
use axum::Router;

use crate::handlers::pages;
use crate::state::AppState;

/// ```text
/// GET       /about/     -> about
/// GET|POST  /contact/   -> contact_form, contact
/// GET       /faq/       -> faq
/// GET       /terms/     -> terms
/// GET       /privacy/   -> privacy
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/about/", get(pages::about))
        .route("/contact/", get(pages::contact_form).post(pages::contact))
        .route("/faq/", get(pages::faq))
        .route("/terms/", get(pages::terms))
        .route("/privacy/", get(pages::privacy))
}
