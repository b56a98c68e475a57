use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::Deserialize;

use super::models::Planet;

const COLUMNS: &str = "id, name, terrain, rotation_period, diameter";

/// Planet fields before an id is assigned.
#[derive(Debug, Clone, Deserialize)]
pub struct NewPlanet {
    pub name: String,
    pub terrain: String,
    pub rotation_period: i64,
    pub diameter: i64,
}

fn from_row(row: &Row) -> rusqlite::Result<Planet> {
    Ok(Planet {
        id: row.get(0)?,
        name: row.get(1)?,
        terrain: row.get(2)?,
        rotation_period: row.get(3)?,
        diameter: row.get(4)?,
    })
}

pub fn insert(conn: &Connection, new: &NewPlanet) -> rusqlite::Result<Planet> {
    conn.execute(
        "INSERT INTO planets (name, terrain, rotation_period, diameter) VALUES (?1, ?2, ?3, ?4)",
        params![new.name, new.terrain, new.rotation_period, new.diameter],
    )?;
    Ok(Planet {
        id: conn.last_insert_rowid(),
        name: new.name.clone(),
        terrain: new.terrain.clone(),
        rotation_period: new.rotation_period,
        diameter: new.diameter,
    })
}

pub fn all(conn: &Connection) -> rusqlite::Result<Vec<Planet>> {
    let mut stmt = conn.prepare(&format!("SELECT {COLUMNS} FROM planets ORDER BY id"))?;
    let planets = stmt.query_map([], from_row)?.collect::<Result<Vec<_>, _>>()?;
    Ok(planets)
}

pub fn find(conn: &Connection, id: i64) -> rusqlite::Result<Option<Planet>> {
    conn.query_row(
        &format!("SELECT {COLUMNS} FROM planets WHERE id = ?1"),
        params![id],
        from_row,
    )
    .optional()
}

pub fn exists_named(conn: &Connection, name: &str) -> rusqlite::Result<bool> {
    conn.query_row(
        "SELECT COUNT(*) > 0 FROM planets WHERE name = ?1",
        params![name],
        |row| row.get(0),
    )
}

/// Renames a planet in place. Returns the updated row, or `None` if the id is unknown.
pub fn rename(conn: &Connection, id: i64, name: &str) -> rusqlite::Result<Option<Planet>> {
    let changed = conn.execute(
        "UPDATE planets SET name = ?1 WHERE id = ?2",
        params![name, id],
    )?;
    if changed == 0 {
        return Ok(None);
    }
    find(conn, id)
}

/// Returns whether a row was deleted.
pub fn delete(conn: &Connection, id: i64) -> rusqlite::Result<bool> {
    let rows = conn.execute("DELETE FROM planets WHERE id = ?1", params![id])?;
    Ok(rows > 0)
}
