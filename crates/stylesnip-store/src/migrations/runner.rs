#![allow(clippy::result_large_err)]

use crate::errors::{checksum_mismatch, from_rusqlite, migration_error, Result};
use crate::migrations::embedded::{Migration, MIGRATIONS};
use rusqlite::{params, Connection};
use std::collections::BTreeMap;

const CREATE_LEDGER: &str = "CREATE TABLE IF NOT EXISTS registry_migrations (
    migration_id TEXT PRIMARY KEY,
    checksum TEXT NOT NULL,
    applied_at TEXT NOT NULL
)";

/// Bring the schema up to date
///
/// Already-applied migrations are verified against their recorded checksum
/// before anything new runs. Each pending migration commits on its own.
///
/// # Errors
///
/// `ConstraintViolation` if an applied migration was edited since;
/// `Persistence` if a migration's SQL fails.
pub fn apply_migrations(conn: &mut Connection) -> Result<()> {
    conn.execute(CREATE_LEDGER, []).map_err(from_rusqlite)?;
    let applied = applied_checksums(conn)?;

    for migration in MIGRATIONS {
        match applied.get(migration.id) {
            Some(recorded) => {
                let current = migration.checksum();
                if *recorded != current {
                    return Err(checksum_mismatch(migration.id, recorded, &current));
                }
            }
            None => run_one(conn, migration)?,
        }
    }
    Ok(())
}

fn applied_checksums(conn: &Connection) -> Result<BTreeMap<String, String>> {
    let mut stmt = conn
        .prepare("SELECT migration_id, checksum FROM registry_migrations")
        .map_err(from_rusqlite)?;
    let rows = stmt
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))
        .map_err(from_rusqlite)?
        .collect::<std::result::Result<BTreeMap<String, String>, _>>()
        .map_err(from_rusqlite)?;
    Ok(rows)
}

fn run_one(conn: &mut Connection, migration: &Migration) -> Result<()> {
    let tx = conn.transaction().map_err(from_rusqlite)?;
    tx.execute_batch(migration.sql)
        .map_err(|e| migration_error(migration.id, &e.to_string()))?;
    tx.execute(
        "INSERT INTO registry_migrations (migration_id, checksum, applied_at) VALUES (?1, ?2, ?3)",
        params![
            migration.id,
            migration.checksum(),
            chrono::Utc::now().to_rfc3339()
        ],
    )
    .map_err(from_rusqlite)?;
    tx.commit().map_err(from_rusqlite)?;

    tracing::info!(migration_id = migration.id, "schema migration applied");
    Ok(())
}
