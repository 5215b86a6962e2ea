//! Authorization Policy
//! Mission: Decide which paths need an authenticated identity
//!
//! A static, ordered rule table evaluated after the authentication gate.
//! Paths matching a public rule are allowed unconditionally; everything
//! else requires an attached authorization context. Unmatched paths fall
//! through to deny-unless-authenticated. Roles are carried for handlers
//! but not consulted here.

use crate::auth::middleware::auth_context;
use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use tracing::debug;

/// One rule: a path pattern plus whether the path is accessible without an
/// identity. Patterns are exact paths or prefixes ending in `/*`, which
/// match the prefix itself and anything below it.
#[derive(Debug, Clone)]
pub struct PolicyRule {
    pattern: String,
    public: bool,
}

/// Ordered rule table; first match wins.
#[derive(Debug, Clone)]
pub struct AccessPolicy {
    rules: Vec<PolicyRule>,
}

impl AccessPolicy {
    pub fn new(rules: &[(&str, bool)]) -> Self {
        Self {
            rules: rules
                .iter()
                .map(|(pattern, public)| PolicyRule {
                    pattern: pattern.to_string(),
                    public: *public,
                })
                .collect(),
        }
    }

    /// The rigbook rule table: documentation, login, and the designated
    /// public read lookups are open; everything else needs an identity.
    pub fn defaults() -> Self {
        Self::new(&[
            ("/health", true),
            ("/docs/*", true),
            ("/api/auth/*", true),
            ("/api/user-profiles/*", true),
            ("/api/vehicles/user/*", true),
            ("/api/mods/vehicle/*", true),
        ])
    }

    /// Whether `path` is accessible without an identity.
    pub fn is_public(&self, path: &str) -> bool {
        self.rules
            .iter()
            .find(|rule| pattern_matches(&rule.pattern, path))
            .map(|rule| rule.public)
            .unwrap_or(false)
    }

    /// The access decision, kept pure so it is testable apart from the
    /// gate: public paths always pass, other paths pass only with a
    /// context attached.
    pub fn decide(&self, path: &str, has_context: bool) -> Result<(), AccessDenied> {
        if self.is_public(path) || has_context {
            Ok(())
        } else {
            Err(AccessDenied)
        }
    }
}

fn pattern_matches(pattern: &str, path: &str) -> bool {
    match pattern.strip_suffix("/*") {
        Some(prefix) => path == prefix || path.strip_prefix(prefix).is_some_and(|rest| rest.starts_with('/')),
        None => path == pattern,
    }
}

/// Rejection produced by the policy for requests without an identity on a
/// protected path. The only auth failure a caller ever sees outside login.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessDenied;

impl std::fmt::Display for AccessDenied {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Access denied")
    }
}

impl std::error::Error for AccessDenied {}

impl IntoResponse for AccessDenied {
    fn into_response(self) -> Response {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "Access denied" })),
        )
            .into_response()
    }
}

/// Middleware enforcing the policy. Runs after the gate; short-circuits
/// with 401 before the handler when the decision is a denial.
pub async fn enforce_access(
    State(policy): State<Arc<AccessPolicy>>,
    req: Request,
    next: Next,
) -> Result<Response, AccessDenied> {
    let path = req.uri().path();
    let has_context = auth_context(&req).is_some();

    if let Err(denied) = policy.decide(path, has_context) {
        debug!("Denied unauthenticated request to {}", path);
        return Err(denied);
    }

    Ok(next.run(req).await)
}
