//! Vehicle Storage
//! Mission: Persist vehicle records, one per owning profile

use crate::models::VehicleInfo;
use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension, Row};

pub struct VehicleStore {
    db_path: String,
}

impl VehicleStore {
    pub fn new(db_path: &str) -> Result<Self> {
        let store = Self {
            db_path: db_path.to_string(),
        };

        let conn = store.connect()?;
        super::init_schema(&conn)?;

        Ok(store)
    }

    fn connect(&self) -> Result<Connection> {
        Connection::open(&self.db_path).context("Failed to open vehicle database")
    }

    pub fn list(&self) -> Result<Vec<VehicleInfo>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(
            "SELECT id, vehicle_year, make, model, trim, color, nickname, image_url,
                    user_profile_id
             FROM vehicles ORDER BY id",
        )?;

        let vehicles = stmt
            .query_map([], row_to_vehicle)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(vehicles)
    }

    pub fn find_by_id(&self, id: i64) -> Result<Option<VehicleInfo>> {
        let conn = self.connect()?;
        let vehicle = conn
            .query_row(
                "SELECT id, vehicle_year, make, model, trim, color, nickname, image_url,
                        user_profile_id
                 FROM vehicles WHERE id = ?1",
                params![id],
                row_to_vehicle,
            )
            .optional()?;

        Ok(vehicle)
    }

    /// The by-owner lookup. At most one row thanks to the UNIQUE
    /// constraint on user_profile_id.
    pub fn find_by_user_profile(&self, user_profile_id: i64) -> Result<Option<VehicleInfo>> {
        let conn = self.connect()?;
        let vehicle = conn
            .query_row(
                "SELECT id, vehicle_year, make, model, trim, color, nickname, image_url,
                        user_profile_id
                 FROM vehicles WHERE user_profile_id = ?1",
                params![user_profile_id],
                row_to_vehicle,
            )
            .optional()?;

        Ok(vehicle)
    }

    /// Persist a vehicle: insert when it has no id, update otherwise.
    /// The owning profile reference must be resolved by the caller.
    pub fn save(&self, vehicle: &VehicleInfo) -> Result<VehicleInfo> {
        let user_profile_id = vehicle
            .user_profile_id
            .context("Vehicle is missing its owning profile")?;

        let conn = self.connect()?;
        let mut saved = vehicle.clone();

        match vehicle.id {
            None => {
                conn.execute(
                    "INSERT INTO vehicles
                        (vehicle_year, make, model, trim, color, nickname, image_url,
                         user_profile_id)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                    params![
                        vehicle.vehicle_year,
                        vehicle.make,
                        vehicle.model,
                        vehicle.trim,
                        vehicle.color,
                        vehicle.nickname,
                        vehicle.image_url,
                        user_profile_id,
                    ],
                )
                .context("Failed to insert vehicle")?;
                saved.id = Some(conn.last_insert_rowid());
            }
            Some(id) => {
                let rows = conn
                    .execute(
                        "UPDATE vehicles
                         SET vehicle_year = ?1, make = ?2, model = ?3, trim = ?4,
                             color = ?5, nickname = ?6, image_url = ?7,
                             user_profile_id = ?8
                         WHERE id = ?9",
                        params![
                            vehicle.vehicle_year,
                            vehicle.make,
                            vehicle.model,
                            vehicle.trim,
                            vehicle.color,
                            vehicle.nickname,
                            vehicle.image_url,
                            user_profile_id,
                            id,
                        ],
                    )
                    .context("Failed to update vehicle")?;
                if rows == 0 {
                    anyhow::bail!("Vehicle {} not found", id);
                }
            }
        }

        Ok(saved)
    }

    pub fn delete(&self, id: i64) -> Result<bool> {
        let conn = self.connect()?;
        let rows = conn.execute("DELETE FROM vehicles WHERE id = ?1", params![id])?;
        Ok(rows > 0)
    }
}

fn row_to_vehicle(row: &Row<'_>) -> rusqlite::Result<VehicleInfo> {
    Ok(VehicleInfo {
        id: Some(row.get(0)?),
        vehicle_year: row.get(1)?,
        make: row.get(2)?,
        model: row.get(3)?,
        trim: row.get(4)?,
        color: row.get(5)?,
        nickname: row.get(6)?,
        image_url: row.get(7)?,
        user_profile_id: Some(row.get(8)?),
    })
}
