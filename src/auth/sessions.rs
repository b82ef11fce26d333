// src/auth/sessions.rs
use rusqlite::{params, Connection, OptionalExtension};
use tracing::debug;

use crate::auth::token::{generate_session_token, hash_token};
use crate::domain::user::{CurrentUser, Role};
use crate::errors::ServerError;

pub const SESSION_COOKIE: &str = "session";

/// Store a new session for `user_id` and return the raw token for the cookie.
pub fn create_session(
    conn: &Connection,
    user_id: &str,
    now: i64,
    ttl_secs: i64,
) -> Result<String, ServerError> {
    let raw_token = generate_session_token();
    let hash = hash_token(&raw_token);

    conn.execute(
        r#"
        insert into sessions (user_id, token_hash, created_at, expires_at)
        values (?, ?, ?, ?)
        "#,
        params![user_id, hash.as_slice(), now, now + ttl_secs],
    )
    .map_err(|e| ServerError::DbError(format!("create session failed: {e}")))?;

    debug!(user_id, "session created");
    Ok(raw_token)
}

/// Resolve a cookie token to the signed-in user, if the session is live.
pub fn load_user_from_session(
    conn: &Connection,
    raw_token: &str,
    now: i64,
) -> Result<Option<CurrentUser>, ServerError> {
    let hash = hash_token(raw_token);

    let row: Option<(String, String, String)> = conn
        .query_row(
            r#"
            select u.id, u.username, u.role
            from sessions s
            join users u on u.id = s.user_id
            where s.token_hash = ?
              and s.expires_at > ?
              and s.revoked_at is null
            "#,
            params![hash.as_slice(), now],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
        )
        .optional()
        .map_err(|e| ServerError::DbError(format!("session lookup failed: {e}")))?;

    let Some((id, username, role)) = row else {
        return Ok(None);
    };
    let role = role
        .parse::<Role>()
        .map_err(|e| ServerError::DbError(format!("stored role invalid: {e}")))?;
    Ok(Some(CurrentUser { id, username, role }))
}

pub fn revoke_session(conn: &Connection, raw_token: &str, now: i64) -> Result<(), ServerError> {
    let hash = hash_token(raw_token);
    conn.execute(
        "update sessions set revoked_at = ? where token_hash = ? and revoked_at is null",
        params![now, hash.as_slice()],
    )
    .map_err(|e| ServerError::DbError(format!("revoke session failed: {e}")))?;
    Ok(())
}
