//! Domain models for the rigbook catalog.
//!
//! Entities are plain values constructed literally; updates go through
//! explicit store functions rather than builder chains. Field names are
//! serialized in camelCase to match the frontend contract.

use serde::{Deserialize, Serialize};

/// A user account record with credentials and roles.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: Option<i64>,
    pub username: String,
    pub display_name: Option<String>,
    pub bio: Option<String>,
    pub profile_image_url: Option<String>,
    pub location: Option<String>,
    /// bcrypt hash; accepted on input, never serialized in responses.
    /// `None` means no credential is set for this profile.
    #[serde(skip_serializing, default)]
    pub password_hash: Option<String>,
    /// Comma-separated role tags, e.g. "ROLE_USER,ROLE_ADMIN".
    /// Empty or absent reads as the base role.
    pub roles: Option<String>,
}

/// A vehicle record owned by exactly one user profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleInfo {
    pub id: Option<i64>,
    pub vehicle_year: Option<String>,
    pub make: Option<String>,
    pub model: Option<String>,
    pub trim: Option<String>,
    pub color: Option<String>,
    pub nickname: Option<String>,
    pub image_url: Option<String>,
    /// Owning profile. Optional on input so updates can omit it and keep
    /// the existing link; always present on records read from the store.
    pub user_profile_id: Option<i64>,
}

/// A modification fitted to a vehicle.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Modification {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub category: Option<String>,
    pub brand: Option<String>,
    #[serde(default)]
    pub sponsored: bool,
    pub review_url: Option<String>,
    pub cost: Option<f64>,
    pub weight: Option<f64>,
    pub image_url: Option<String>,
    /// Owning profile, derived from the vehicle when not supplied.
    pub user_profile_id: Option<i64>,
    /// Owning vehicle.
    pub vehicle_info_id: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_never_serialized() {
        let profile = UserProfile {
            id: Some(1),
            username: "trailboss".to_string(),
            display_name: Some("Trail Boss".to_string()),
            bio: None,
            profile_image_url: None,
            location: Some("CO, USA".to_string()),
            password_hash: Some("$2b$12$abcdefghijklmnopqrstuv".to_string()),
            roles: Some("ROLE_USER".to_string()),
        };

        let json = serde_json::to_string(&profile).unwrap();
        assert!(!json.contains("passwordHash"));
        assert!(!json.contains("$2b$"));
        assert!(json.contains(r#""displayName":"Trail Boss""#));
    }

    #[test]
    fn test_profile_deserializes_without_hash() {
        let json = r#"{"username":"trailboss","displayName":"Trail Boss"}"#;
        let profile: UserProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.username, "trailboss");
        assert!(profile.password_hash.is_none());
        assert!(profile.id.is_none());
    }

    #[test]
    fn test_modification_sponsored_defaults_false() {
        let json = r#"{"name":"Lift Kit","vehicleInfoId":1}"#;
        let m: Modification = serde_json::from_str(json).unwrap();
        assert!(!m.sponsored);
        assert_eq!(m.vehicle_info_id, Some(1));
    }
}
