// src/db/users.rs
use chrono::NaiveDateTime;
use rusqlite::{params, Connection, OptionalExtension, Row};
use uuid::Uuid;

use crate::domain::user::{Role, UserAccount};
use crate::errors::ServerError;

fn map_user(row: &Row<'_>) -> rusqlite::Result<UserAccount> {
    let role: String = row.get(2)?;
    let role = role.parse::<Role>().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(2, rusqlite::types::Type::Text, e.into())
    })?;
    Ok(UserAccount {
        id: row.get(0)?,
        username: row.get(1)?,
        role,
        created_at: row.get(3)?,
    })
}

/// Every account, newest first. Password hashes are never selected here.
pub fn list_users(conn: &Connection) -> Result<Vec<UserAccount>, ServerError> {
    let mut stmt = conn
        .prepare(
            "select id, username, role, created_at from users order by created_at desc, rowid desc",
        )
        .map_err(|e| ServerError::DbError(format!("prepare list users failed: {e}")))?;

    let rows = stmt
        .query_map([], map_user)
        .map_err(|e| ServerError::DbError(format!("list users failed: {e}")))?;

    rows.collect::<Result<Vec<_>, _>>()
        .map_err(|e| ServerError::DbError(format!("read user row failed: {e}")))
}

pub fn get_user(conn: &Connection, id: &str) -> Result<Option<UserAccount>, ServerError> {
    conn.query_row(
        "select id, username, role, created_at from users where id = ?",
        params![id],
        map_user,
    )
    .optional()
    .map_err(|e| ServerError::DbError(format!("select user failed: {e}")))
}

/// Account plus its stored password hash, for credential checks only.
pub fn find_by_username_with_hash(
    conn: &Connection,
    username: &str,
) -> Result<Option<(UserAccount, String)>, ServerError> {
    conn.query_row(
        "select id, username, role, created_at, password_hash from users where username = ?",
        params![username],
        |row| Ok((map_user(row)?, row.get::<_, String>(4)?)),
    )
    .optional()
    .map_err(|e| ServerError::DbError(format!("select user by username failed: {e}")))
}

/// True when another account (not `except_id`) already uses `username`.
pub fn username_taken(
    conn: &Connection,
    username: &str,
    except_id: Option<&str>,
) -> Result<bool, ServerError> {
    let count: i64 = conn
        .query_row(
            "select count(*) from users where username = ? and id != coalesce(?, '')",
            params![username, except_id],
            |r| r.get(0),
        )
        .map_err(|e| ServerError::DbError(format!("check username failed: {e}")))?;
    Ok(count > 0)
}

/// `password_hash` must already be derived; plaintext never reaches this layer.
pub fn create_user(
    conn: &Connection,
    username: &str,
    password_hash: &str,
    role: Role,
    now: NaiveDateTime,
) -> Result<UserAccount, ServerError> {
    let id = Uuid::new_v4().to_string();
    conn.execute(
        "insert into users (id, username, password_hash, role, created_at) values (?, ?, ?, ?, ?)",
        params![id, username, password_hash, role.as_str(), now],
    )
    .map_err(|e| ServerError::DbError(format!("insert user failed: {e}")))?;

    get_user(conn, &id)?.ok_or(ServerError::InternalError)
}

/// Updates username and role; the hash is replaced only when a new one is given.
/// Returns `None` when the change would demote the last admin. The admin count
/// is checked inside the same statement so concurrent demotions cannot both pass.
pub fn update_user(
    conn: &Connection,
    id: &str,
    username: &str,
    role: Role,
    password_hash: Option<&str>,
) -> Result<Option<UserAccount>, ServerError> {
    let updated = conn
        .execute(
            "update users set username = ?1, role = ?2, password_hash = coalesce(?3, password_hash)
             where id = ?4
               and (?2 = 'admin'
                    or role != 'admin'
                    or (select count(*) from users where role = 'admin') > 1)",
            params![username, role.as_str(), password_hash, id],
        )
        .map_err(|e| ServerError::DbError(format!("update user failed: {e}")))?;

    let account = get_user(conn, id)?.ok_or(ServerError::NotFound)?;
    Ok((updated > 0).then_some(account))
}

pub fn delete_user(conn: &Connection, id: &str) -> Result<(), ServerError> {
    let deleted = conn
        .execute("delete from users where id = ?", params![id])
        .map_err(|e| ServerError::DbError(format!("delete user failed: {e}")))?;
    if deleted == 0 {
        return Err(ServerError::NotFound);
    }
    Ok(())
}
