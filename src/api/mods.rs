//! Modification endpoints - /api/mods
//!
//! Create requires the owning vehicle; the owner profile is derived from
//! that vehicle when not supplied, keeping the two references consistent.
//! Update preserves existing ownership references when omitted.

use crate::api::{ApiError, AppState};
use crate::models::Modification;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};

/// GET /api/mods
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Modification>>, ApiError> {
    Ok(Json(state.mods.list()?))
}

/// GET /api/mods/:id
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Modification>, ApiError> {
    state
        .mods
        .find_by_id(id)?
        .map(Json)
        .ok_or(ApiError::NotFound(format!("Modification {} not found", id)))
}

/// GET /api/mods/user/:user_profile_id
pub async fn by_user(
    State(state): State<AppState>,
    Path(user_profile_id): Path<i64>,
) -> Result<Json<Vec<Modification>>, ApiError> {
    Ok(Json(state.mods.find_by_user(user_profile_id)?))
}

/// GET /api/mods/vehicle/:vehicle_info_id
pub async fn by_vehicle(
    State(state): State<AppState>,
    Path(vehicle_info_id): Path<i64>,
) -> Result<Json<Vec<Modification>>, ApiError> {
    Ok(Json(state.mods.find_by_vehicle(vehicle_info_id)?))
}

/// GET /api/mods/category/:category
pub async fn by_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Result<Json<Vec<Modification>>, ApiError> {
    Ok(Json(state.mods.find_by_category(&category)?))
}

/// GET /api/mods/brand/:brand
pub async fn by_brand(
    State(state): State<AppState>,
    Path(brand): Path<String>,
) -> Result<Json<Vec<Modification>>, ApiError> {
    Ok(Json(state.mods.find_by_brand(&brand)?))
}

/// GET /api/mods/sponsored
pub async fn sponsored(
    State(state): State<AppState>,
) -> Result<Json<Vec<Modification>>, ApiError> {
    Ok(Json(state.mods.find_sponsored()?))
}

/// POST /api/mods
pub async fn create(
    State(state): State<AppState>,
    Json(mut modification): Json<Modification>,
) -> Result<(StatusCode, Json<Modification>), ApiError> {
    let vehicle_id = modification
        .vehicle_info_id
        .ok_or(ApiError::BadRequest("vehicleInfoId is required".to_string()))?;

    let vehicle = state
        .vehicles
        .find_by_id(vehicle_id)?
        .ok_or(ApiError::BadRequest(format!(
            "Vehicle {} not found",
            vehicle_id
        )))?;

    if modification.user_profile_id.is_none() {
        modification.user_profile_id = vehicle.user_profile_id;
    }

    modification.id = None;
    let saved = state.mods.save(&modification)?;
    Ok((StatusCode::CREATED, Json(saved)))
}

/// PUT /api/mods/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(mut modification): Json<Modification>,
) -> Result<Json<Modification>, ApiError> {
    let existing = state
        .mods
        .find_by_id(id)?
        .ok_or(ApiError::NotFound(format!("Modification {} not found", id)))?;

    modification.id = Some(id);
    if modification.vehicle_info_id.is_none() {
        modification.vehicle_info_id = existing.vehicle_info_id;
    }
    if modification.user_profile_id.is_none() {
        modification.user_profile_id = existing.user_profile_id;
    }

    Ok(Json(state.mods.save(&modification)?))
}

/// DELETE /api/mods/:id
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    if state.mods.delete(id)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound(format!("Modification {} not found", id)))
    }
}
