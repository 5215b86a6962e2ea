//! Router assembly: routes, interceptor stack, CORS.
//!
//! The interceptor stack is explicit and ordered: request logging, then
//! the authentication gate, then the access policy, then the handler.
//! Each layer can short-circuit with a response of its own; only the
//! policy actually does so for auth failures.

use crate::api::{mods, profiles, vehicles, AppState};
use crate::auth::{
    api as auth_api,
    middleware::authenticate,
    policy::{enforce_access, AccessPolicy},
    AuthState, GateState,
};
use crate::middleware::request_logging;
use axum::{
    middleware,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

/// Build the full application router with the middleware stack applied.
pub fn create_router(
    state: AppState,
    auth_state: AuthState,
    gate_state: GateState,
    policy: Arc<AccessPolicy>,
) -> Router {
    let auth_router = Router::new()
        .route("/api/auth/login", post(auth_api::login))
        .route("/api/auth/me", get(auth_api::me))
        .with_state(auth_state);

    let entity_router = Router::new()
        .route(
            "/api/user-profiles",
            get(profiles::list).post(profiles::create),
        )
        .route(
            "/api/user-profiles/username/:username",
            get(profiles::get_by_username),
        )
        .route(
            "/api/user-profiles/:id",
            get(profiles::get_by_id)
                .put(profiles::update)
                .delete(profiles::remove),
        )
        .route("/api/vehicles", get(vehicles::list).post(vehicles::create))
        .route("/api/vehicles/user/:user_profile_id", get(vehicles::get_by_user))
        .route(
            "/api/vehicles/:id",
            get(vehicles::get_by_id)
                .put(vehicles::update)
                .delete(vehicles::remove),
        )
        .route("/api/mods", get(mods::list).post(mods::create))
        .route("/api/mods/sponsored", get(mods::sponsored))
        .route("/api/mods/category/:category", get(mods::by_category))
        .route("/api/mods/brand/:brand", get(mods::by_brand))
        .route("/api/mods/user/:user_profile_id", get(mods::by_user))
        .route("/api/mods/vehicle/:vehicle_info_id", get(mods::by_vehicle))
        .route(
            "/api/mods/:id",
            get(mods::get_by_id).put(mods::update).delete(mods::remove),
        )
        .with_state(state);

    let public_router = Router::new()
        .route("/health", get(health_check))
        .route("/docs", get(api_docs));

    // Layer order matters: the last layer added runs first, so the gate
    // sees the request before the policy does.
    Router::new()
        .merge(public_router)
        .merge(auth_router)
        .merge(entity_router)
        .layer(middleware::from_fn_with_state(policy, enforce_access))
        .layer(middleware::from_fn_with_state(gate_state, authenticate))
        .layer(middleware::from_fn(request_logging))
        .layer(CorsLayer::permissive())
}

// ===== Route Handlers =====

/// Health check endpoint
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// API documentation endpoint - a compact route listing
async fn api_docs() -> Json<serde_json::Value> {
    Json(json!({
        "name": "rigbook API",
        "version": env!("CARGO_PKG_VERSION"),
        "auth": "POST /api/auth/login returns a bearer token; send it as 'Authorization: Bearer <token>'",
        "public": [
            "GET /health",
            "GET /docs",
            "POST /api/auth/login",
            "GET /api/user-profiles/:id",
            "GET /api/user-profiles/username/:username",
            "GET /api/vehicles/user/:userProfileId",
            "GET /api/mods/vehicle/:vehicleInfoId",
        ],
        "protected": [
            "GET /api/auth/me",
            "GET|POST /api/vehicles",
            "GET|PUT|DELETE /api/vehicles/:id",
            "GET|POST /api/mods",
            "GET|PUT|DELETE /api/mods/:id",
            "GET /api/mods/user/:userProfileId",
            "GET /api/mods/category/:category",
            "GET /api/mods/brand/:brand",
            "GET /api/mods/sponsored",
        ],
    }))
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}
