//! User Profile Storage
//! Mission: Persist identities; the only store the auth core consumes

use crate::auth::models::BASE_ROLE;
use crate::models::UserProfile;
use anyhow::{Context, Result};
use bcrypt::{hash, DEFAULT_COST};
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::{info, warn};

pub struct ProfileStore {
    db_path: String,
}

impl ProfileStore {
    /// Open the store, creating the schema and the default admin account
    /// when the profile table is empty.
    pub fn new(db_path: &str) -> Result<Self> {
        let store = Self {
            db_path: db_path.to_string(),
        };

        let conn = store.connect()?;
        super::init_schema(&conn)?;
        store.seed_default_admin(&conn)?;

        Ok(store)
    }

    fn connect(&self) -> Result<Connection> {
        Connection::open(&self.db_path).context("Failed to open profile database")
    }

    /// Create a default admin profile for initial setup.
    fn seed_default_admin(&self, conn: &Connection) -> Result<()> {
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM user_profiles", [], |row| row.get(0))
            .context("Failed to count profiles")?;

        if count == 0 {
            let password_hash =
                hash("admin123", DEFAULT_COST).context("Failed to hash password")?;

            conn.execute(
                "INSERT INTO user_profiles (username, display_name, password_hash, roles)
                 VALUES (?1, ?2, ?3, ?4)",
                params![
                    "admin",
                    "Administrator",
                    password_hash,
                    format!("{},ROLE_ADMIN", BASE_ROLE),
                ],
            )
            .context("Failed to insert admin profile")?;

            info!("🔐 Default admin profile created (username: admin, password: admin123)");
            warn!("⚠️  CHANGE THE DEFAULT PASSWORD IN PRODUCTION!");
        }

        Ok(())
    }

    pub fn list(&self) -> Result<Vec<UserProfile>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(
            "SELECT id, username, display_name, bio, profile_image_url, location,
                    password_hash, roles
             FROM user_profiles ORDER BY id",
        )?;

        let profiles = stmt
            .query_map([], row_to_profile)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(profiles)
    }

    pub fn find_by_id(&self, id: i64) -> Result<Option<UserProfile>> {
        let conn = self.connect()?;
        let profile = conn
            .query_row(
                "SELECT id, username, display_name, bio, profile_image_url, location,
                        password_hash, roles
                 FROM user_profiles WHERE id = ?1",
                params![id],
                row_to_profile,
            )
            .optional()?;

        Ok(profile)
    }

    /// Lookup-by-username, the resolution step of the authentication gate
    /// and the login flow.
    pub fn find_by_username(&self, username: &str) -> Result<Option<UserProfile>> {
        let conn = self.connect()?;
        let profile = conn
            .query_row(
                "SELECT id, username, display_name, bio, profile_image_url, location,
                        password_hash, roles
                 FROM user_profiles WHERE username = ?1",
                params![username],
                row_to_profile,
            )
            .optional()?;

        Ok(profile)
    }

    /// Persist a profile: insert when it has no id, update otherwise.
    /// Returns the stored record with its id filled in.
    pub fn save(&self, profile: &UserProfile) -> Result<UserProfile> {
        let conn = self.connect()?;
        let mut saved = profile.clone();

        match profile.id {
            None => {
                conn.execute(
                    "INSERT INTO user_profiles
                        (username, display_name, bio, profile_image_url, location,
                         password_hash, roles)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                    params![
                        profile.username,
                        profile.display_name,
                        profile.bio,
                        profile.profile_image_url,
                        profile.location,
                        profile.password_hash,
                        profile.roles,
                    ],
                )
                .context("Failed to insert profile")?;
                saved.id = Some(conn.last_insert_rowid());
            }
            Some(id) => {
                let rows = conn
                    .execute(
                        "UPDATE user_profiles
                         SET username = ?1, display_name = ?2, bio = ?3,
                             profile_image_url = ?4, location = ?5,
                             password_hash = ?6, roles = ?7
                         WHERE id = ?8",
                        params![
                            profile.username,
                            profile.display_name,
                            profile.bio,
                            profile.profile_image_url,
                            profile.location,
                            profile.password_hash,
                            profile.roles,
                            id,
                        ],
                    )
                    .context("Failed to update profile")?;
                if rows == 0 {
                    anyhow::bail!("Profile {} not found", id);
                }
            }
        }

        Ok(saved)
    }

    /// Delete a profile by id. Returns whether a row was removed.
    pub fn delete(&self, id: i64) -> Result<bool> {
        let conn = self.connect()?;
        let rows = conn.execute("DELETE FROM user_profiles WHERE id = ?1", params![id])?;
        Ok(rows > 0)
    }
}

fn row_to_profile(row: &Row<'_>) -> rusqlite::Result<UserProfile> {
    Ok(UserProfile {
        id: Some(row.get(0)?),
        username: row.get(1)?,
        display_name: row.get(2)?,
        bio: row.get(3)?,
        profile_image_url: row.get(4)?,
        location: row.get(5)?,
        password_hash: row.get(6)?,
        roles: row.get(7)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn create_test_store() -> (ProfileStore, NamedTempFile) {
        let temp_file = NamedTempFile::new().unwrap();
        let db_path = temp_file.path().to_str().unwrap();
        let store = ProfileStore::new(db_path).unwrap();
        (store, temp_file)
    }

    #[test]
    fn test_default_admin_seeded() {
        let (store, _temp) = create_test_store();

        let admin = store.find_by_username("admin").unwrap().unwrap();
        assert_eq!(admin.username, "admin");
        assert!(admin.password_hash.is_some());
        assert_eq!(admin.roles.as_deref(), Some("ROLE_USER,ROLE_ADMIN"));

        // Seeding is once-only: a second store over the same file must not
        // add another admin.
        let again = ProfileStore::new(store.db_path.as_str()).unwrap();
        assert_eq!(again.list().unwrap().len(), 1);
    }

    #[test]
    fn test_seeded_password_verifies() {
        let (store, _temp) = create_test_store();

        let admin = store.find_by_username("admin").unwrap().unwrap();
        let hash = admin.password_hash.unwrap();
        assert!(bcrypt::verify("admin123", &hash).unwrap());
        assert!(!bcrypt::verify("wrong", &hash).unwrap());
    }

    #[test]
    fn test_save_insert_and_update() {
        let (store, _temp) = create_test_store();

        let created = store
            .save(&UserProfile {
                id: None,
                username: "trailboss".to_string(),
                display_name: Some("Trail Boss".to_string()),
                bio: None,
                profile_image_url: None,
                location: Some("CO, USA".to_string()),
                password_hash: None,
                roles: None,
            })
            .unwrap();

        let id = created.id.unwrap();
        assert!(id > 0);

        let mut updated = created.clone();
        updated.display_name = Some("Trail Captain".to_string());
        store.save(&updated).unwrap();

        let fetched = store.find_by_id(id).unwrap().unwrap();
        assert_eq!(fetched.display_name.as_deref(), Some("Trail Captain"));
        assert_eq!(fetched.username, "trailboss");
    }

    #[test]
    fn test_username_uniqueness_enforced() {
        let (store, _temp) = create_test_store();

        let profile = UserProfile {
            id: None,
            username: "dupe".to_string(),
            display_name: None,
            bio: None,
            profile_image_url: None,
            location: None,
            password_hash: None,
            roles: None,
        };

        store.save(&profile).unwrap();
        assert!(store.save(&profile).is_err());
    }

    #[test]
    fn test_find_unknown_returns_none() {
        let (store, _temp) = create_test_store();

        assert!(store.find_by_username("ghost").unwrap().is_none());
        assert!(store.find_by_id(9999).unwrap().is_none());
    }

    #[test]
    fn test_delete() {
        let (store, _temp) = create_test_store();

        let created = store
            .save(&UserProfile {
                id: None,
                username: "shortlived".to_string(),
                display_name: None,
                bio: None,
                profile_image_url: None,
                location: None,
                password_hash: None,
                roles: None,
            })
            .unwrap();

        let id = created.id.unwrap();
        assert!(store.delete(id).unwrap());
        assert!(!store.delete(id).unwrap());
        assert!(store.find_by_id(id).unwrap().is_none());
    }

    #[test]
    fn test_update_missing_profile_fails() {
        let (store, _temp) = create_test_store();

        let ghost = UserProfile {
            id: Some(4242),
            username: "ghost".to_string(),
            display_name: None,
            bio: None,
            profile_image_url: None,
            location: None,
            password_hash: None,
            roles: None,
        };

        assert!(store.save(&ghost).is_err());
    }
}
