//! Bearer-token extractor.
//!
//! Handlers that need a signed-in caller take [`AuthUser`]; pages open to
//! visitors take `Option<AuthUser>`. Either way a header that is present but
//! malformed, expired or forged is a 401, never silently anonymous.

use axum::extract::{FromRequestParts, OptionalFromRequestParts};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use pawlink_core::access::Actor;
use pawlink_core::error::CoreError;
use pawlink_core::types::DbId;

use crate::auth::jwt::{validate_token, JwtConfig};
use crate::error::AppError;
use crate::state::AppState;

/// Caller identity taken from the access token's claims.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: DbId,
    /// `admin`, `staff` or `member`.
    pub role: String,
}

impl AuthUser {
    pub fn actor(&self) -> Actor {
        Actor::new(self.user_id, self.role.clone())
    }
}

fn unauthorized(msg: &str) -> AppError {
    CoreError::Unauthorized(msg.to_owned()).into()
}

/// `Ok(None)` when no `Authorization` header was sent.
fn authenticate(headers: &HeaderMap, jwt: &JwtConfig) -> Result<Option<AuthUser>, AppError> {
    let Some(value) = headers.get(AUTHORIZATION) else {
        return Ok(None);
    };
    let token = value
        .to_str()
        .ok()
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| unauthorized("Expected Authorization: Bearer <token>"))?;

    let claims = validate_token(token, jwt).map_err(|err| {
        tracing::debug!(error = %err, "Rejected access token");
        unauthorized("Invalid or expired token")
    })?;
    Ok(Some(AuthUser {
        user_id: claims.sub,
        role: claims.role,
    }))
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        authenticate(&parts.headers, &state.config.jwt)?
            .ok_or_else(|| unauthorized("Authentication required"))
    }
}

impl OptionalFromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Option<Self>, Self::Rejection> {
        authenticate(&parts.headers, &state.config.jwt)
    }
}
