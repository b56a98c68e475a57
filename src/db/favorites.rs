use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::models::{Favorite, FavoriteTarget};

fn from_row(row: &Row) -> rusqlite::Result<Favorite> {
    let character_id: Option<i64> = row.get(2)?;
    let planets_id: Option<i64> = row.get(3)?;
    let target = FavoriteTarget::from_columns(character_id, planets_id).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            3,
            Type::Null,
            "favorite must reference exactly one of character or planet".into(),
        )
    })?;
    Ok(Favorite {
        id: row.get(0)?,
        user_id: row.get(1)?,
        target,
    })
}

/// `(column, value)` used to filter on a target.
fn target_filter(target: FavoriteTarget) -> (&'static str, i64) {
    match target {
        FavoriteTarget::Planet(id) => ("planets_id", id),
        FavoriteTarget::Character(id) => ("character_id", id),
    }
}

pub fn insert(
    conn: &Connection,
    user_id: i64,
    target: FavoriteTarget,
) -> rusqlite::Result<Favorite> {
    let (character_id, planets_id) = target.columns();
    conn.execute(
        "INSERT INTO favorites (user_id, character_id, planets_id) VALUES (?1, ?2, ?3)",
        params![user_id, character_id, planets_id],
    )?;
    Ok(Favorite {
        id: conn.last_insert_rowid(),
        user_id,
        target,
    })
}

pub fn for_user(conn: &Connection, user_id: i64) -> rusqlite::Result<Vec<Favorite>> {
    let mut stmt = conn.prepare(
        "SELECT id, user_id, character_id, planets_id FROM favorites \
         WHERE user_id = ?1 ORDER BY id",
    )?;
    let favorites = stmt
        .query_map(params![user_id], from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(favorites)
}

/// First favorite of `user_id` pointing at `target`, if any.
pub fn find(
    conn: &Connection,
    user_id: i64,
    target: FavoriteTarget,
) -> rusqlite::Result<Option<Favorite>> {
    let (column, value) = target_filter(target);
    conn.query_row(
        &format!(
            "SELECT id, user_id, character_id, planets_id FROM favorites \
             WHERE user_id = ?1 AND {column} = ?2 ORDER BY id LIMIT 1"
        ),
        params![user_id, value],
        from_row,
    )
    .optional()
}

/// Deletes the first favorite of `user_id` pointing at `target`, returning what was removed.
pub fn delete(
    conn: &Connection,
    user_id: i64,
    target: FavoriteTarget,
) -> rusqlite::Result<Option<Favorite>> {
    let Some(favorite) = find(conn, user_id, target)? else {
        return Ok(None);
    };
    conn.execute("DELETE FROM favorites WHERE id = ?1", params![favorite.id])?;
    Ok(Some(favorite))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::characters::tests::yoda;
    use crate::db::planets::tests::tatooine;
    use crate::db::tests::test_pool;
    use crate::db::{characters, is_constraint_violation, planets, users};

    #[test]
    fn for_user_filters_by_owner() {
        let pool = test_pool();
        let conn = pool.get().unwrap();
        let alice = users::insert(&conn, "alice@b.com", "x", true).unwrap();
        let bob = users::insert(&conn, "bob@b.com", "x", true).unwrap();
        let planet = planets::insert(&conn, &tatooine()).unwrap();
        let yoda = characters::insert(&conn, &yoda()).unwrap();

        insert(&conn, alice.id, FavoriteTarget::Planet(planet.id)).unwrap();
        insert(&conn, alice.id, FavoriteTarget::Character(yoda.id)).unwrap();
        insert(&conn, bob.id, FavoriteTarget::Planet(planet.id)).unwrap();

        let alices = for_user(&conn, alice.id).unwrap();
        assert_eq!(alices.len(), 2);
        assert!(alices.iter().all(|f| f.user_id == alice.id));
        assert_eq!(alices[1].target, FavoriteTarget::Character(yoda.id));
        assert!(for_user(&conn, 77).unwrap().is_empty());
    }

    #[test]
    fn same_target_twice_for_one_user_is_rejected() {
        let pool = test_pool();
        let conn = pool.get().unwrap();
        let alice = users::insert(&conn, "alice@b.com", "x", true).unwrap();
        let planet = planets::insert(&conn, &tatooine()).unwrap();

        insert(&conn, alice.id, FavoriteTarget::Planet(planet.id)).unwrap();
        let err = insert(&conn, alice.id, FavoriteTarget::Planet(planet.id)).unwrap_err();
        assert!(is_constraint_violation(&err));
    }

    #[test]
    fn delete_removes_only_the_matching_target() {
        let pool = test_pool();
        let conn = pool.get().unwrap();
        let alice = users::insert(&conn, "alice@b.com", "x", true).unwrap();
        let planet = planets::insert(&conn, &tatooine()).unwrap();
        let yoda = characters::insert(&conn, &yoda()).unwrap();
        insert(&conn, alice.id, FavoriteTarget::Planet(planet.id)).unwrap();
        insert(&conn, alice.id, FavoriteTarget::Character(yoda.id)).unwrap();

        let removed = delete(&conn, alice.id, FavoriteTarget::Planet(planet.id)).unwrap();
        assert_eq!(removed.map(|f| f.target), Some(FavoriteTarget::Planet(planet.id)));
        assert!(delete(&conn, alice.id, FavoriteTarget::Planet(planet.id))
            .unwrap()
            .is_none());
        assert_eq!(for_user(&conn, alice.id).unwrap().len(), 1);
    }

    #[test]
    fn deleting_a_planet_cascades_to_favorites() {
        let pool = test_pool();
        let conn = pool.get().unwrap();
        let alice = users::insert(&conn, "alice@b.com", "x", true).unwrap();
        let planet = planets::insert(&conn, &tatooine()).unwrap();
        insert(&conn, alice.id, FavoriteTarget::Planet(planet.id)).unwrap();

        assert!(planets::delete(&conn, planet.id).unwrap());
        assert!(for_user(&conn, alice.id).unwrap().is_empty());
    }
}
