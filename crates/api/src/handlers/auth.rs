//! Handlers for the `/auth` resource (register, login, refresh, logout).
//!
//! Every successful sign-in opens a `user_sessions` row holding the digest
//! of a fresh refresh token; refreshing consumes that row.

use axum::extract::State;
use axum::http::header::USER_AGENT;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use chrono::Utc;
use pawlink_core::account::{
    ensure_can_sign_in, lockout_expiry, normalize_username, MAX_FAILED_LOGINS,
};
use pawlink_core::error::CoreError;
use pawlink_core::roles::MEMBER_ROLE_ID;
use pawlink_core::types::DbId;
use pawlink_core::validation::validate_input;
use pawlink_db::models::session::CreateSession;
use pawlink_db::models::user::{CreateUser, User};
use pawlink_db::repositories::{RoleRepo, SessionRepo, UserRepo};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::jwt::{generate_access_token, RefreshToken};
use crate::auth::password::{hash_password, validate_password_strength, verify_password};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    #[validate(email(message = "Enter a valid email address"))]
    pub email: Option<String>,
    #[validate(length(max = 20))]
    pub phone_number: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Tokens plus who they belong to. Returned by register, login and refresh.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: SignedInUser,
}

#[derive(Debug, Serialize)]
pub struct SignedInUser {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub role: String,
}

fn bad_credentials() -> AppError {
    CoreError::Unauthorized("Invalid username or password".into()).into()
}

/// POST /auth/register/
///
/// New accounts always get the `member` role.
pub async fn register(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(input): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    validate_input(&input)?;
    let username = normalize_username(&input.username)?;
    validate_password_strength(&input.password, state.config.password_min_length)
        .map_err(|msg| CoreError::validation("password", msg))?;

    if UserRepo::find_by_username(&state.pool, username).await?.is_some() {
        return Err(CoreError::Conflict(format!("Username '{username}' is already taken")).into());
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            username: username.to_string(),
            email: input.email.unwrap_or_default(),
            password_hash,
            role_id: MEMBER_ROLE_ID,
            phone_number: input.phone_number,
        },
    )
    .await?;
    tracing::info!(user_id = user.id, username = %user.username, "User registered");

    let response = open_session(&state, &headers, user).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /auth/login/
///
/// Unknown usernames and wrong passwords get the same 401. The fifth
/// consecutive failure locks the account.
pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let user = UserRepo::find_by_username(&state.pool, input.username.trim())
        .await?
        .ok_or_else(bad_credentials)?;

    let now = Utc::now();
    ensure_can_sign_in(user.is_active, user.locked_until, now)?;

    let valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !valid {
        let (failures, locked_until) = UserRepo::record_failed_login(
            &state.pool,
            user.id,
            MAX_FAILED_LOGINS,
            lockout_expiry(now),
        )
        .await?;
        if locked_until.is_some_and(|until| until > now) {
            tracing::warn!(user_id = user.id, failures, "Account locked after failed logins");
        }
        return Err(bad_credentials());
    }

    UserRepo::record_successful_login(&state.pool, user.id).await?;
    let response = open_session(&state, &headers, user).await?;
    Ok(Json(response))
}

/// POST /auth/refresh/
///
/// The presented token is single-use: its session is revoked and a new one
/// opened.
pub async fn refresh(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(input): Json<RefreshRequest>,
) -> AppResult<Json<AuthResponse>> {
    let expired = || CoreError::Unauthorized("Invalid or expired refresh token".into());

    let user_id = SessionRepo::consume(&state.pool, &RefreshToken::digest(&input.refresh_token))
        .await?
        .ok_or_else(expired)?;

    let user = UserRepo::find_by_id(&state.pool, user_id)
        .await?
        .ok_or_else(|| CoreError::Unauthorized("User no longer exists".into()))?;
    ensure_can_sign_in(user.is_active, None, Utc::now())?;

    let response = open_session(&state, &headers, user).await?;
    Ok(Json(response))
}

/// POST /auth/logout/
///
/// Ends every session of the caller, not just the current one.
pub async fn logout(State(state): State<AppState>, auth: AuthUser) -> AppResult<StatusCode> {
    let revoked = SessionRepo::revoke_all_for_user(&state.pool, auth.user_id).await?;
    tracing::info!(user_id = auth.user_id, revoked, "User logged out");
    Ok(StatusCode::NO_CONTENT)
}

/// Issue an access token and a refresh token for `user`, recording the
/// refresh token's digest as a new session.
async fn open_session(state: &AppState, headers: &HeaderMap, user: User) -> AppResult<AuthResponse> {
    let jwt = &state.config.jwt;
    let role = RoleRepo::resolve_name(&state.pool, user.role_id).await?;

    let access_token = generate_access_token(user.id, &role, jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;
    let refresh = RefreshToken::generate();

    SessionRepo::create(
        &state.pool,
        &CreateSession {
            user_id: user.id,
            refresh_token_hash: refresh.hash,
            expires_at: Utc::now() + jwt.refresh_ttl(),
            user_agent: headers
                .get(USER_AGENT)
                .and_then(|v| v.to_str().ok())
                .map(str::to_owned),
        },
    )
    .await?;

    Ok(AuthResponse {
        access_token,
        refresh_token: refresh.plaintext,
        expires_in: jwt.access_ttl().num_seconds(),
        user: SignedInUser {
            id: user.id,
            username: user.username,
            email: user.email,
            role,
        },
    })
}
