//! Authentication Gate
//! Mission: Resolve request identity from bearer tokens, best effort
//!
//! The gate runs once per request, before the access policy. It never
//! rejects: a missing header, a bad token, or an unknown subject all leave
//! the request without an authorization context and let it continue. The
//! policy downstream decides whether that is acceptable.

use crate::auth::{
    jwt::JwtCodec,
    models::{parse_roles, AuthContext},
};
use crate::store::ProfileStore;
use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tracing::debug;

/// State injected into the gate: the token codec plus the credential store
/// used to resolve subjects into identities.
#[derive(Clone)]
pub struct GateState {
    pub codec: Arc<JwtCodec>,
    pub profiles: Arc<ProfileStore>,
}

/// Middleware that attaches an [`AuthContext`] when a valid bearer token
/// resolves to a known identity, and otherwise passes the request through
/// untouched.
pub async fn authenticate(
    State(state): State<GateState>,
    mut req: Request,
    next: Next,
) -> Response {
    if let Some(token) = bearer_token(req.headers()) {
        match state.codec.verify(token) {
            Ok(claims) => match state.profiles.find_by_username(&claims.sub) {
                Ok(Some(profile)) => {
                    let roles = parse_roles(profile.roles.as_deref());
                    req.extensions_mut().insert(AuthContext {
                        subject: claims.sub,
                        roles,
                    });
                }
                Ok(None) => {
                    debug!("Token subject {} not found in store", claims.sub);
                }
                Err(e) => {
                    debug!("Identity lookup failed for {}: {}", claims.sub, e);
                }
            },
            Err(e) => {
                debug!("Rejected bearer token: {}", e);
            }
        }
    }

    next.run(req).await
}

/// Pull the token out of `Authorization: Bearer <token>`, if present and
/// well-formed.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

/// Extract the authorization context attached by the gate, if any.
pub fn auth_context(req: &Request) -> Option<&AuthContext> {
    req.extensions().get::<AuthContext>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request as HttpRequest;

    fn headers_with_auth(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, value.parse().unwrap());
        headers
    }

    #[test]
    fn test_bearer_token_extraction() {
        let headers = headers_with_auth("Bearer abc.def.ghi");
        assert_eq!(bearer_token(&headers), Some("abc.def.ghi"));
    }

    #[test]
    fn test_missing_header_yields_none() {
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }

    #[test]
    fn test_non_bearer_scheme_yields_none() {
        let headers = headers_with_auth("Basic dXNlcjpwYXNz");
        assert_eq!(bearer_token(&headers), None);

        let headers = headers_with_auth("bearer lowercase-scheme");
        assert_eq!(bearer_token(&headers), None);
    }

    #[test]
    fn test_auth_context_extraction() {
        let mut req = HttpRequest::new(Body::empty());
        assert!(auth_context(&req).is_none());

        req.extensions_mut().insert(AuthContext {
            subject: "alice".to_string(),
            roles: vec!["ROLE_USER".to_string()],
        });

        let ctx = auth_context(&req).unwrap();
        assert_eq!(ctx.subject, "alice");
    }
}
