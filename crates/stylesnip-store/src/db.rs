//! Database connection management

#![allow(clippy::result_large_err)]

use crate::errors::{from_rusqlite, io_error, Result};
use crate::migrations::apply_migrations;
use rusqlite::Connection;
use std::path::Path;
use std::time::Duration;

/// How long a writer waits for another writer's lock before failing
pub const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Open a SQLite database at the given path
pub fn open<P: AsRef<Path>>(path: P) -> Result<Connection> {
    Connection::open(path).map_err(from_rusqlite)
}

/// Open an in-memory SQLite database (for testing)
pub fn open_in_memory() -> Result<Connection> {
    Connection::open_in_memory().map_err(from_rusqlite)
}

/// Configure a connection for concurrent readers and serialized writers
pub fn configure(conn: &Connection) -> Result<()> {
    // journal_mode reports the resulting mode as a row ("memory" for
    // in-memory databases), so it has to go through the checked variant.
    conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get::<_, String>(0))
        .map_err(from_rusqlite)?;

    conn.busy_timeout(BUSY_TIMEOUT).map_err(from_rusqlite)?;

    Ok(())
}

/// Open, configure and migrate the registry database, creating parent
/// directories as needed
pub fn open_registry<P: AsRef<Path>>(path: P) -> Result<Connection> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| io_error("create_db_dir", e))?;
    }

    let mut conn = open(path)?;
    configure(&conn)?;
    apply_migrations(&mut conn)?;
    Ok(conn)
}
