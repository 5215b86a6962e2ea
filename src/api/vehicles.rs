//! Vehicle endpoints - /api/vehicles
//!
//! Create requires the owning profile reference; update preserves the
//! existing owner when the body omits it.

use crate::api::{ApiError, AppState};
use crate::models::VehicleInfo;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};

/// GET /api/vehicles
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<VehicleInfo>>, ApiError> {
    Ok(Json(state.vehicles.list()?))
}

/// GET /api/vehicles/:id
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<VehicleInfo>, ApiError> {
    state
        .vehicles
        .find_by_id(id)?
        .map(Json)
        .ok_or(ApiError::NotFound(format!("Vehicle {} not found", id)))
}

/// GET /api/vehicles/user/:user_profile_id
pub async fn get_by_user(
    State(state): State<AppState>,
    Path(user_profile_id): Path<i64>,
) -> Result<Json<VehicleInfo>, ApiError> {
    state
        .vehicles
        .find_by_user_profile(user_profile_id)?
        .map(Json)
        .ok_or(ApiError::NotFound(format!(
            "No vehicle for profile {}",
            user_profile_id
        )))
}

/// POST /api/vehicles
pub async fn create(
    State(state): State<AppState>,
    Json(mut vehicle): Json<VehicleInfo>,
) -> Result<(StatusCode, Json<VehicleInfo>), ApiError> {
    if vehicle.user_profile_id.is_none() {
        return Err(ApiError::BadRequest(
            "userProfileId is required".to_string(),
        ));
    }

    vehicle.id = None;
    let saved = state.vehicles.save(&vehicle)?;
    Ok((StatusCode::CREATED, Json(saved)))
}

/// PUT /api/vehicles/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(mut vehicle): Json<VehicleInfo>,
) -> Result<Json<VehicleInfo>, ApiError> {
    let existing = state
        .vehicles
        .find_by_id(id)?
        .ok_or(ApiError::NotFound(format!("Vehicle {} not found", id)))?;

    vehicle.id = Some(id);
    if vehicle.user_profile_id.is_none() {
        vehicle.user_profile_id = existing.user_profile_id;
    }

    Ok(Json(state.vehicles.save(&vehicle)?))
}

/// DELETE /api/vehicles/:id
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    if state.vehicles.delete(id)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound(format!("Vehicle {} not found", id)))
    }
}
