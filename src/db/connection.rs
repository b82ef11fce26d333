use rusqlite::Connection;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use tracing::{debug, info};

use crate::errors::ServerError;

// Thread-local connection slots, one per database path.
thread_local! {
    static DB_CONNS: RefCell<HashMap<String, Connection>> = RefCell::new(HashMap::new());
}

#[derive(Clone, Debug)]
pub struct Database {
    path: String,
}

impl Database {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Provides this thread's connection to the closure, opening it on first use.
    pub fn with_conn<F, T>(&self, f: F) -> Result<T, ServerError>
    where
        F: FnOnce(&mut Connection) -> Result<T, ServerError>,
    {
        DB_CONNS
            .try_with(|cell| {
                let mut slots = cell.borrow_mut();
                if !slots.contains_key(&self.path) {
                    let conn = open(&self.path)?;
                    slots.insert(self.path.clone(), conn);
                }
                let conn = slots
                    .get_mut(&self.path)
                    .ok_or(ServerError::InternalError)?;
                f(conn)
            })
            .map_err(|_| ServerError::InternalError)?
    }
}

fn open(path: &str) -> Result<Connection, ServerError> {
    let conn = Connection::open(path)
        .map_err(|e| ServerError::DbError(format!("Open DB failed: {e}")))?;
    conn.execute_batch("PRAGMA foreign_keys = ON;")
        .map_err(|e| ServerError::DbError(format!("Enable foreign keys failed: {e}")))?;
    debug!(path, "opened sqlite connection");
    Ok(conn)
}

/// Initialize database from a SQL schema file
pub fn init_db(db: &Database, schema_path: &str) -> Result<(), ServerError> {
    let schema_sql = fs::read_to_string(schema_path)
        .map_err(|e| ServerError::DbError(format!("Failed to read schema file: {e}")))?;
    init_db_from_str(db, &schema_sql)?;
    info!(schema_path, db = db.path(), "database initialized");
    Ok(())
}

/// Apply schema SQL directly. The schema is idempotent, so this is safe on
/// every start.
pub fn init_db_from_str(db: &Database, schema_sql: &str) -> Result<(), ServerError> {
    db.with_conn(|conn| {
        conn.execute_batch(schema_sql)
            .map_err(|e| ServerError::DbError(format!("Failed to apply schema: {e}")))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connections_are_reused_per_path() {
        let dir = std::env::temp_dir();
        let path = dir.join(format!("conn_test_{}.sqlite", uuid::Uuid::new_v4()));
        let db = Database::new(path.to_string_lossy().to_string());

        db.with_conn(|conn| {
            conn.execute_batch("create temp table marker (x integer);")?;
            Ok(())
        })
        .unwrap();

        // A temp table only exists on the connection that created it.
        let seen: i64 = db
            .with_conn(|conn| {
                Ok(conn.query_row(
                    "select count(*) from temp.sqlite_master where name = 'marker'",
                    [],
                    |r| r.get(0),
                )?)
            })
            .unwrap();
        assert_eq!(seen, 1);

        let _ = std::fs::remove_file(path);
    }
}
