//! Role-gated extractors.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use pawlink_core::access::ensure_staff;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// A caller with the `staff` or `admin` role; members get 403. Used by
/// shelter and clinic creation and by donation status changes.
pub struct RequireStaff(pub AuthUser);

impl FromRequestParts<AppState> for RequireStaff {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = <AuthUser as FromRequestParts<AppState>>::from_request_parts(parts, state).await?;
        ensure_staff(&user.actor())?;
        Ok(Self(user))
    }
}
