//! Authentication API Endpoints
//! Mission: Exchange credentials for tokens

use crate::auth::{
    jwt::JwtCodec,
    middleware::auth_context,
    models::{LoginRequest, LoginResponse, PublicUser},
};
use crate::store::ProfileStore;
use axum::{
    extract::{Request, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use tracing::{info, warn};

/// Tokens issued by login live for 24 hours.
const LOGIN_TTL_HOURS: i64 = 24;

/// Shared auth state: credential store plus token codec, built explicitly
/// at startup and injected here.
#[derive(Clone)]
pub struct AuthState {
    pub profiles: Arc<ProfileStore>,
    pub codec: Arc<JwtCodec>,
}

/// Login endpoint - POST /api/auth/login
///
/// Unknown username, a profile with no credential set, and a wrong
/// password all collapse into the same `InvalidCredentials` response, so
/// callers cannot probe which usernames exist.
pub async fn login(
    State(state): State<AuthState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AuthApiError> {
    let profile = state
        .profiles
        .find_by_username(&payload.username)
        .map_err(|e| {
            warn!("Profile lookup failed during login: {}", e);
            AuthApiError::InternalError
        })?;

    let Some(profile) = profile else {
        warn!("❌ Failed login attempt: {}", payload.username);
        return Err(AuthApiError::InvalidCredentials);
    };

    let Some(hash) = profile.password_hash.as_deref() else {
        warn!("❌ Failed login attempt: {}", payload.username);
        return Err(AuthApiError::InvalidCredentials);
    };

    // A hash the verifier cannot parse counts as a mismatch; the response
    // must stay indistinguishable from an unknown user.
    let valid = bcrypt::verify(&payload.password, hash).unwrap_or(false);
    if !valid {
        warn!("❌ Failed login attempt: {}", payload.username);
        return Err(AuthApiError::InvalidCredentials);
    }

    let token = state
        .codec
        .issue(&profile.username, chrono::Duration::hours(LOGIN_TTL_HOURS))
        .map_err(|e| {
            warn!("Token issuance failed: {}", e);
            AuthApiError::InternalError
        })?;

    info!("✅ Login successful: {}", profile.username);

    Ok(Json(LoginResponse {
        token,
        user: PublicUser::from_profile(&profile),
    }))
}

/// Current identity - GET /api/auth/me
///
/// Echoes the context the gate attached; 401 when there is none.
pub async fn me(req: Request) -> Result<Json<serde_json::Value>, AuthApiError> {
    let ctx = auth_context(&req).ok_or(AuthApiError::Unauthorized)?;

    Ok(Json(json!({
        "username": ctx.subject,
        "roles": ctx.roles,
    })))
}

/// Auth API errors
#[derive(Debug)]
pub enum AuthApiError {
    InvalidCredentials,
    Unauthorized,
    InternalError,
}

impl IntoResponse for AuthApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AuthApiError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "Invalid credentials"),
            AuthApiError::Unauthorized => (StatusCode::UNAUTHORIZED, "Authentication required"),
            AuthApiError::InternalError => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
