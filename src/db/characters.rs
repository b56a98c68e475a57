use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::Deserialize;

use super::models::Character;

const COLUMNS: &str = "id, name, hair_color, height, mass";

#[derive(Debug, Clone, Deserialize)]
pub struct NewCharacter {
    pub name: String,
    pub hair_color: String,
    pub height: i64,
    pub mass: i64,
}

fn from_row(row: &Row) -> rusqlite::Result<Character> {
    Ok(Character {
        id: row.get(0)?,
        name: row.get(1)?,
        hair_color: row.get(2)?,
        height: row.get(3)?,
        mass: row.get(4)?,
    })
}

pub fn insert(conn: &Connection, new: &NewCharacter) -> rusqlite::Result<Character> {
    conn.execute(
        "INSERT INTO characters (name, hair_color, height, mass) VALUES (?1, ?2, ?3, ?4)",
        params![new.name, new.hair_color, new.height, new.mass],
    )?;
    Ok(Character {
        id: conn.last_insert_rowid(),
        name: new.name.clone(),
        hair_color: new.hair_color.clone(),
        height: new.height,
        mass: new.mass,
    })
}

pub fn all(conn: &Connection) -> rusqlite::Result<Vec<Character>> {
    let mut stmt = conn.prepare(&format!("SELECT {COLUMNS} FROM characters ORDER BY id"))?;
    let people = stmt.query_map([], from_row)?.collect::<Result<Vec<_>, _>>()?;
    Ok(people)
}

pub fn find(conn: &Connection, id: i64) -> rusqlite::Result<Option<Character>> {
    conn.query_row(
        &format!("SELECT {COLUMNS} FROM characters WHERE id = ?1"),
        params![id],
        from_row,
    )
    .optional()
}

pub fn exists_named(conn: &Connection, name: &str) -> rusqlite::Result<bool> {
    conn.query_row(
        "SELECT COUNT(*) > 0 FROM characters WHERE name = ?1",
        params![name],
        |row| row.get(0),
    )
}
