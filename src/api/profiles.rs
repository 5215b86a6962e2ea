//! User profile endpoints - /api/user-profiles
//!
//! Thin pass-throughs to the profile store. Create forces a fresh id;
//! update enforces the path id and preserves the stored credential when
//! the body omits it.

use crate::api::{ApiError, AppState};
use crate::models::UserProfile;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};

/// GET /api/user-profiles
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<UserProfile>>, ApiError> {
    Ok(Json(state.profiles.list()?))
}

/// GET /api/user-profiles/:id
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<UserProfile>, ApiError> {
    state
        .profiles
        .find_by_id(id)?
        .map(Json)
        .ok_or(ApiError::NotFound(format!("Profile {} not found", id)))
}

/// GET /api/user-profiles/username/:username
pub async fn get_by_username(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<UserProfile>, ApiError> {
    state
        .profiles
        .find_by_username(&username)?
        .map(Json)
        .ok_or(ApiError::NotFound(format!(
            "Profile {} not found",
            username
        )))
}

/// POST /api/user-profiles
pub async fn create(
    State(state): State<AppState>,
    Json(mut profile): Json<UserProfile>,
) -> Result<(StatusCode, Json<UserProfile>), ApiError> {
    if profile.username.trim().is_empty() {
        return Err(ApiError::BadRequest("username is required".to_string()));
    }

    profile.id = None;
    let saved = state.profiles.save(&profile)?;
    Ok((StatusCode::CREATED, Json(saved)))
}

/// PUT /api/user-profiles/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(mut profile): Json<UserProfile>,
) -> Result<Json<UserProfile>, ApiError> {
    let existing = state
        .profiles
        .find_by_id(id)?
        .ok_or(ApiError::NotFound(format!("Profile {} not found", id)))?;

    profile.id = Some(id);
    if profile.password_hash.is_none() {
        profile.password_hash = existing.password_hash;
    }

    Ok(Json(state.profiles.save(&profile)?))
}

/// DELETE /api/user-profiles/:id
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    if state.profiles.delete(id)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound(format!("Profile {} not found", id)))
    }
}
