//! SQLite-backed persistence for profiles, vehicles, and modifications.
//!
//! Each store holds the database path and opens a connection per call.
//! Schema creation is idempotent and runs when a store is constructed, so
//! stores can be built in any order against the same file.

pub mod mods;
pub mod profiles;
pub mod vehicles;

pub use mods::ModStore;
pub use profiles::ProfileStore;
pub use vehicles::VehicleStore;

use anyhow::Result;
use rusqlite::Connection;

/// Catalog schema. Vehicle ownership is one-to-one (UNIQUE on
/// user_profile_id); modifications carry a single canonical owner
/// reference alongside their vehicle link.
const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS user_profiles (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT NOT NULL UNIQUE,
    display_name TEXT,
    bio TEXT,
    profile_image_url TEXT,
    location TEXT,
    password_hash TEXT,
    roles TEXT
);

CREATE TABLE IF NOT EXISTS vehicles (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    vehicle_year TEXT,
    make TEXT,
    model TEXT,
    trim TEXT,
    color TEXT,
    nickname TEXT,
    image_url TEXT,
    user_profile_id INTEGER NOT NULL UNIQUE,
    FOREIGN KEY (user_profile_id) REFERENCES user_profiles(id)
);

CREATE TABLE IF NOT EXISTS modifications (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT,
    category TEXT,
    brand TEXT,
    sponsored INTEGER NOT NULL DEFAULT 0,
    review_url TEXT,
    cost REAL,
    weight REAL,
    image_url TEXT,
    user_profile_id INTEGER NOT NULL,
    vehicle_info_id INTEGER NOT NULL,
    FOREIGN KEY (user_profile_id) REFERENCES user_profiles(id),
    FOREIGN KEY (vehicle_info_id) REFERENCES vehicles(id)
);

CREATE INDEX IF NOT EXISTS idx_mods_vehicle ON modifications(vehicle_info_id);
CREATE INDEX IF NOT EXISTS idx_mods_user ON modifications(user_profile_id);
"#;

pub(crate) fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}
