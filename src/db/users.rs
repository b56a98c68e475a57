use rusqlite::{params, Connection, OptionalExtension, Row};

use super::models::User;

const COLUMNS: &str = "id, email, password, is_active";

fn from_row(row: &Row) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        email: row.get(1)?,
        password: row.get(2)?,
        is_active: row.get(3)?,
    })
}

/// Inserts a user and returns the stored row. `password` must already be hashed.
pub fn insert(
    conn: &Connection,
    email: &str,
    password: &str,
    is_active: bool,
) -> rusqlite::Result<User> {
    conn.execute(
        "INSERT INTO users (email, password, is_active) VALUES (?1, ?2, ?3)",
        params![email, password, is_active],
    )?;
    Ok(User {
        id: conn.last_insert_rowid(),
        email: email.to_string(),
        password: password.to_string(),
        is_active,
    })
}

pub fn all(conn: &Connection) -> rusqlite::Result<Vec<User>> {
    let mut stmt = conn.prepare(&format!("SELECT {COLUMNS} FROM users ORDER BY id"))?;
    let users = stmt.query_map([], from_row)?.collect::<Result<Vec<_>, _>>()?;
    Ok(users)
}

pub fn find(conn: &Connection, id: i64) -> rusqlite::Result<Option<User>> {
    conn.query_row(
        &format!("SELECT {COLUMNS} FROM users WHERE id = ?1"),
        params![id],
        from_row,
    )
    .optional()
}

pub fn find_by_email(conn: &Connection, email: &str) -> rusqlite::Result<Option<User>> {
    conn.query_row(
        &format!("SELECT {COLUMNS} FROM users WHERE email = ?1"),
        params![email],
        from_row,
    )
    .optional()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::is_constraint_violation;
    use crate::db::tests::test_pool;

    #[test]
    fn insert_assigns_fresh_ids() {
        let pool = test_pool();
        let conn = pool.get().unwrap();
        let a = insert(&conn, "a@b.com", "hash-a", true).unwrap();
        let b = insert(&conn, "c@d.com", "hash-b", true).unwrap();
        assert_ne!(a.id, b.id);

        let stored = find(&conn, b.id).unwrap().unwrap();
        assert_eq!(stored.email, "c@d.com");
        assert_eq!(stored.password, "hash-b");
        assert!(stored.is_active);
    }

    #[test]
    fn duplicate_email_is_a_constraint_violation() {
        let pool = test_pool();
        let conn = pool.get().unwrap();
        insert(&conn, "a@b.com", "x", true).unwrap();
        let err = insert(&conn, "a@b.com", "y", true).unwrap_err();
        assert!(is_constraint_violation(&err));
    }

    #[test]
    fn find_missing_returns_none() {
        let pool = test_pool();
        let conn = pool.get().unwrap();
        assert!(find(&conn, 99).unwrap().is_none());
        assert!(find_by_email(&conn, "nobody@b.com").unwrap().is_none());
    }

    #[test]
    fn all_lists_in_id_order() {
        let pool = test_pool();
        let conn = pool.get().unwrap();
        insert(&conn, "first@b.com", "x", true).unwrap();
        insert(&conn, "second@b.com", "x", false).unwrap();
        let emails: Vec<String> = all(&conn).unwrap().into_iter().map(|u| u.email).collect();
        assert_eq!(emails, vec!["first@b.com", "second@b.com"]);
    }
}
