//! Modification Storage
//! Mission: Persist build modifications linked to vehicles and owners

use crate::models::Modification;
use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension, Row};

pub struct ModStore {
    db_path: String,
}

const SELECT_COLUMNS: &str = "SELECT id, name, category, brand, sponsored, review_url, cost,
        weight, image_url, user_profile_id, vehicle_info_id
 FROM modifications";

impl ModStore {
    pub fn new(db_path: &str) -> Result<Self> {
        let store = Self {
            db_path: db_path.to_string(),
        };

        let conn = store.connect()?;
        super::init_schema(&conn)?;

        Ok(store)
    }

    fn connect(&self) -> Result<Connection> {
        Connection::open(&self.db_path).context("Failed to open modification database")
    }

    pub fn list(&self) -> Result<Vec<Modification>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(&format!("{} ORDER BY id", SELECT_COLUMNS))?;

        let mods = stmt
            .query_map([], row_to_mod)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(mods)
    }

    pub fn find_by_id(&self, id: i64) -> Result<Option<Modification>> {
        let conn = self.connect()?;
        let modification = conn
            .query_row(
                &format!("{} WHERE id = ?1", SELECT_COLUMNS),
                params![id],
                row_to_mod,
            )
            .optional()?;

        Ok(modification)
    }

    pub fn find_by_user(&self, user_profile_id: i64) -> Result<Vec<Modification>> {
        self.query_list(
            &format!("{} WHERE user_profile_id = ?1 ORDER BY id", SELECT_COLUMNS),
            params![user_profile_id],
        )
    }

    pub fn find_by_vehicle(&self, vehicle_info_id: i64) -> Result<Vec<Modification>> {
        self.query_list(
            &format!("{} WHERE vehicle_info_id = ?1 ORDER BY id", SELECT_COLUMNS),
            params![vehicle_info_id],
        )
    }

    pub fn find_by_category(&self, category: &str) -> Result<Vec<Modification>> {
        self.query_list(
            &format!("{} WHERE category = ?1 ORDER BY id", SELECT_COLUMNS),
            params![category],
        )
    }

    pub fn find_by_brand(&self, brand: &str) -> Result<Vec<Modification>> {
        self.query_list(
            &format!("{} WHERE brand = ?1 ORDER BY id", SELECT_COLUMNS),
            params![brand],
        )
    }

    pub fn find_sponsored(&self) -> Result<Vec<Modification>> {
        self.query_list(
            &format!("{} WHERE sponsored = 1 ORDER BY id", SELECT_COLUMNS),
            params![],
        )
    }

    fn query_list(
        &self,
        sql: &str,
        params: impl rusqlite::Params,
    ) -> Result<Vec<Modification>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(sql)?;

        let mods = stmt
            .query_map(params, row_to_mod)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(mods)
    }

    /// Persist a modification: insert when it has no id, update otherwise.
    /// Both ownership references must be resolved by the caller.
    pub fn save(&self, modification: &Modification) -> Result<Modification> {
        let vehicle_info_id = modification
            .vehicle_info_id
            .context("Modification is missing its vehicle")?;
        let user_profile_id = modification
            .user_profile_id
            .context("Modification is missing its owning profile")?;

        let conn = self.connect()?;
        let mut saved = modification.clone();

        match modification.id {
            None => {
                conn.execute(
                    "INSERT INTO modifications
                        (name, category, brand, sponsored, review_url, cost, weight,
                         image_url, user_profile_id, vehicle_info_id)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
                    params![
                        modification.name,
                        modification.category,
                        modification.brand,
                        modification.sponsored,
                        modification.review_url,
                        modification.cost,
                        modification.weight,
                        modification.image_url,
                        user_profile_id,
                        vehicle_info_id,
                    ],
                )
                .context("Failed to insert modification")?;
                saved.id = Some(conn.last_insert_rowid());
            }
            Some(id) => {
                let rows = conn
                    .execute(
                        "UPDATE modifications
                         SET name = ?1, category = ?2, brand = ?3, sponsored = ?4,
                             review_url = ?5, cost = ?6, weight = ?7, image_url = ?8,
                             user_profile_id = ?9, vehicle_info_id = ?10
                         WHERE id = ?11",
                        params![
                            modification.name,
                            modification.category,
                            modification.brand,
                            modification.sponsored,
                            modification.review_url,
                            modification.cost,
                            modification.weight,
                            modification.image_url,
                            user_profile_id,
                            vehicle_info_id,
                            id,
                        ],
                    )
                    .context("Failed to update modification")?;
                if rows == 0 {
                    anyhow::bail!("Modification {} not found", id);
                }
            }
        }

        Ok(saved)
    }

    pub fn delete(&self, id: i64) -> Result<bool> {
        let conn = self.connect()?;
        let rows = conn.execute("DELETE FROM modifications WHERE id = ?1", params![id])?;
        Ok(rows > 0)
    }
}

fn row_to_mod(row: &Row<'_>) -> rusqlite::Result<Modification> {
    Ok(Modification {
        id: Some(row.get(0)?),
        name: row.get(1)?,
        category: row.get(2)?,
        brand: row.get(3)?,
        sponsored: row.get(4)?,
        review_url: row.get(5)?,
        cost: row.get(6)?,
        weight: row.get(7)?,
        image_url: row.get(8)?,
        user_profile_id: Some(row.get(9)?),
        vehicle_info_id: Some(row.get(10)?),
    })
}
