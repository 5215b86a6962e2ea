//! Authentication Models
//! Mission: Per-request authorization context and login wire types

use crate::models::UserProfile;
use serde::{Deserialize, Serialize};

/// Role granted to every identity whose stored role string is empty.
pub const BASE_ROLE: &str = "ROLE_USER";

/// Per-request authorization context, attached by the authentication gate
/// after a token verifies and the subject resolves in the store. Derived,
/// never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    pub subject: String,
    pub roles: Vec<String>,
}

/// Parse a stored role string into a role set.
///
/// Splits on commas, trims whitespace, drops empty segments, and falls
/// back to the base role when nothing remains.
pub fn parse_roles(raw: Option<&str>) -> Vec<String> {
    let roles: Vec<String> = raw
        .unwrap_or("")
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect();

    if roles.is_empty() {
        vec![BASE_ROLE.to_string()]
    } else {
        roles
    }
}

/// Login request body
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login response
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: PublicUser,
}

/// Minimal public projection of a profile. No password hash, ever.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: i64,
    pub username: String,
    pub display_name: Option<String>,
    pub roles: Vec<String>,
}

impl PublicUser {
    pub fn from_profile(profile: &UserProfile) -> Self {
        Self {
            id: profile.id.unwrap_or_default(),
            username: profile.username.clone(),
            display_name: profile.display_name.clone(),
            roles: parse_roles(profile.roles.as_deref()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_roles_splits_and_trims() {
        assert_eq!(
            parse_roles(Some("ROLE_USER, ROLE_ADMIN")),
            vec!["ROLE_USER".to_string(), "ROLE_ADMIN".to_string()]
        );
    }

    #[test]
    fn test_parse_roles_drops_empty_segments() {
        assert_eq!(
            parse_roles(Some("ROLE_USER,,  ,ROLE_ADMIN,")),
            vec!["ROLE_USER".to_string(), "ROLE_ADMIN".to_string()]
        );
    }

    #[test]
    fn test_empty_or_absent_roles_default_to_base_role() {
        assert_eq!(parse_roles(None), vec![BASE_ROLE.to_string()]);
        assert_eq!(parse_roles(Some("")), vec![BASE_ROLE.to_string()]);
        assert_eq!(parse_roles(Some("  ,  ")), vec![BASE_ROLE.to_string()]);
    }

    #[test]
    fn test_public_user_projection() {
        let profile = UserProfile {
            id: Some(7),
            username: "bob".to_string(),
            display_name: Some("Bob".to_string()),
            bio: Some("wrench turner".to_string()),
            profile_image_url: None,
            location: None,
            password_hash: Some("$2b$12$secret".to_string()),
            roles: None,
        };

        let public = PublicUser::from_profile(&profile);
        assert_eq!(public.id, 7);
        assert_eq!(public.username, "bob");
        assert_eq!(public.roles, vec![BASE_ROLE.to_string()]);

        let json = serde_json::to_string(&public).unwrap();
        assert!(!json.contains("secret"));
        assert!(!json.contains("bio"));
    }
}
