use rusqlite::Connection;
use serde::Deserialize;
use std::path::Path;

use super::characters::{self, NewCharacter};
use super::planets::{self, NewPlanet};
use super::users;

const BUILTIN_CATALOG: &str = include_str!("../../seeds/catalog.toml");

#[derive(Debug, Clone, Deserialize)]
pub struct SeedUser {
    pub email: String,
    pub password: String,
}

/// Rows to load into an empty (or partially filled) database.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Catalog {
    pub planets: Vec<NewPlanet>,
    pub characters: Vec<NewCharacter>,
    pub users: Vec<SeedUser>,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub planets: usize,
    pub characters: usize,
    pub users: usize,
}

impl Catalog {
    pub fn builtin() -> anyhow::Result<Self> {
        Ok(toml::from_str(BUILTIN_CATALOG)?)
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }
}

/// Inserts every catalog row whose unique name/email is not taken yet.
pub fn apply(
    conn: &Connection,
    catalog: &Catalog,
    bcrypt_cost: u32,
) -> anyhow::Result<SeedReport> {
    let mut report = SeedReport::default();

    for planet in &catalog.planets {
        if planets::exists_named(conn, &planet.name)? {
            tracing::debug!("Planet {} already present, skipping", planet.name);
            continue;
        }
        planets::insert(conn, planet)?;
        report.planets += 1;
    }

    for character in &catalog.characters {
        if characters::exists_named(conn, &character.name)? {
            tracing::debug!("Character {} already present, skipping", character.name);
            continue;
        }
        characters::insert(conn, character)?;
        report.characters += 1;
    }

    for user in &catalog.users {
        if users::find_by_email(conn, &user.email)?.is_some() {
            continue;
        }
        let hash = bcrypt::hash(&user.password, bcrypt_cost)?;
        users::insert(conn, &user.email, &hash, true)?;
        report.users += 1;
    }

    tracing::info!(
        planets = report.planets,
        characters = report.characters,
        users = report.users,
        "Seed complete"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::tests::test_pool;

    #[test]
    fn builtin_catalog_parses() {
        let catalog = Catalog::builtin().unwrap();
        assert!(!catalog.planets.is_empty());
        assert!(!catalog.characters.is_empty());
        assert!(catalog.planets.iter().any(|p| p.name == "Tatooine"));
    }

    #[test]
    fn apply_is_idempotent() {
        let pool = test_pool();
        let conn = pool.get().unwrap();
        let catalog = Catalog::builtin().unwrap();

        let first = apply(&conn, &catalog, 4).unwrap();
        assert_eq!(first.planets, catalog.planets.len());
        assert_eq!(first.characters, catalog.characters.len());
        assert_eq!(first.users, catalog.users.len());

        let second = apply(&conn, &catalog, 4).unwrap();
        assert_eq!(second, SeedReport::default());
        assert_eq!(planets::all(&conn).unwrap().len(), catalog.planets.len());
    }

    #[test]
    fn builtin_catalog_creates_default_favorites_owner() {
        let pool = test_pool();
        let conn = pool.get().unwrap();
        apply(&conn, &Catalog::builtin().unwrap(), 4).unwrap();

        let owner_id = crate::config::FavoritesConfig::default().owner_id;
        assert!(users::find(&conn, owner_id).unwrap().is_some());
    }

    #[test]
    fn apply_hashes_seeded_user_passwords() {
        let pool = test_pool();
        let conn = pool.get().unwrap();
        let catalog: Catalog = toml::from_str(
            r#"
[[users]]
email = "owner@holonet.dev"
password = "hunter2"
"#,
        )
        .unwrap();

        let report = apply(&conn, &catalog, 4).unwrap();
        assert_eq!(report.users, 1);

        let user = users::find_by_email(&conn, "owner@holonet.dev")
            .unwrap()
            .unwrap();
        assert_ne!(user.password, "hunter2");
        assert!(bcrypt::verify("hunter2", &user.password).unwrap());
    }

    #[test]
    fn from_file_reads_custom_catalog() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("catalog.toml");
        std::fs::write(
            &path,
            r#"
[[planets]]
name = "Naboo"
terrain = "grassy hills, swamps"
rotation_period = 26
diameter = 12120
"#,
        )
        .unwrap();

        let catalog = Catalog::from_file(&path).unwrap();
        assert_eq!(catalog.planets.len(), 1);
        assert!(catalog.characters.is_empty());
    }
}
