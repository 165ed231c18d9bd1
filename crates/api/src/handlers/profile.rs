//! Handlers for the caller's own profile.

use axum::extract::{Multipart, State};
use axum::Json;
use pawlink_core::error::CoreError;
use pawlink_core::validation::validate_input;
use pawlink_db::models::adoption::AdoptionRequestView;
use pawlink_db::models::animal::Animal;
use pawlink_db::models::donation::DonationResponse;
use pawlink_db::models::user::{UpdateProfile, User, UserResponse};
use pawlink_db::repositories::{
    AdoptionRequestRepo, AnimalRepo, DonationRepo, RoleRepo, UserRepo,
};
use serde::Serialize;

use crate::error::AppResult;
use crate::media::{self, MediaDir};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Recent items of each kind shown on the profile.
const PROFILE_RECENT_ITEMS: i64 = 5;

#[derive(Debug, Serialize)]
pub struct ProfilePage {
    pub user: UserResponse,
    pub recent_animals: Vec<Animal>,
    pub recent_donations: Vec<DonationResponse>,
    pub recent_adoption_requests: Vec<AdoptionRequestView>,
    pub animal_count: i64,
    pub donation_count: i64,
    pub adoption_request_count: i64,
}

/// GET /profile/
pub async fn show(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<ProfilePage>>> {
    let user = current_user(&state, &auth).await?;
    let id = user.id;
    let actor = auth.actor();

    let recent_animals = AnimalRepo::list_by_owner(&state.pool, id, PROFILE_RECENT_ITEMS, 0).await?;
    let recent_donations = DonationRepo::list_by_donor(&state.pool, id, PROFILE_RECENT_ITEMS).await?;
    let recent_adoption_requests =
        AdoptionRequestRepo::list_by_requester(&state.pool, id, PROFILE_RECENT_ITEMS).await?;
    let animal_count = AnimalRepo::count_by_owner(&state.pool, id).await?;
    let donation_count = DonationRepo::count_by_donor(&state.pool, id).await?;
    let adoption_request_count = AdoptionRequestRepo::count_by_requester(&state.pool, id).await?;

    Ok(Json(DataResponse::new(ProfilePage {
        user: to_response(&state, user).await?,
        recent_animals,
        recent_donations: recent_donations
            .into_iter()
            .map(|view| DonationResponse::for_viewer(view, Some(&actor)))
            .collect(),
        recent_adoption_requests,
        animal_count,
        donation_count,
        adoption_request_count,
    })))
}

/// POST /profile/
///
/// Omitted fields keep their current value.
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<UpdateProfile>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    validate_input(&input)?;
    let user = UserRepo::update_profile(&state.pool, auth.user_id, &input)
        .await?
        .ok_or_else(gone)?;
    tracing::info!(user_id = auth.user_id, "Profile updated");
    Ok(Json(
        DataResponse::new(to_response(&state, user).await?).with_message("Profile updated"),
    ))
}

/// POST /profile/avatar/
///
/// Multipart body with an `avatar` image.
pub async fn upload_avatar(
    State(state): State<AppState>,
    auth: AuthUser,
    multipart: Multipart,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let mut user = current_user(&state, &auth).await?;

    let mut form = media::read_multipart(multipart, "avatar").await?;
    let upload = form.require_file("avatar")?;
    let path =
        media::store(&state.config.media_root, MediaDir::UserAvatars, "avatar", &upload).await?;
    UserRepo::set_avatar_path(&state.pool, user.id, &path).await?;
    user.avatar_path = Some(path);

    tracing::info!(user_id = user.id, "Avatar uploaded");
    Ok(Json(
        DataResponse::new(to_response(&state, user).await?).with_message("Avatar updated"),
    ))
}

async fn current_user(state: &AppState, auth: &AuthUser) -> AppResult<User> {
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or_else(gone)?;
    Ok(user)
}

async fn to_response(state: &AppState, user: User) -> AppResult<UserResponse> {
    let role = RoleRepo::resolve_name(&state.pool, user.role_id).await?;
    Ok(UserResponse::from_user(user, role))
}

/// The token outlived its account.
fn gone() -> CoreError {
    CoreError::Unauthorized("User no longer exists".into())
}
