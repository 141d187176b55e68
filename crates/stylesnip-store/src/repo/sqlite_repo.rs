//! SQLite repository for snippet records
//!
//! Every function takes a `&Connection`; pass `&tx` to run it inside a
//! transaction (a `Transaction` derefs to its connection).

#![allow(clippy::result_large_err)]

use crate::errors::{from_rusqlite, Result};
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};
use stylesnip_core::model::{SnippetId, SnippetRecord};

/// Source filter value that no record can carry
///
/// Used in place of an empty `IN ()` list so that "no permitted source"
/// selects nothing instead of dropping the filter.
pub const NO_SOURCE_SENTINEL: &str = "\u{0}stylesnip:no-source";

const SELECT_COLUMNS: &str = "SELECT id, path, source, sortorder, enabled FROM snippets";

/// SQLite repository for the `snippets` table
pub struct SnippetRepo;

impl SnippetRepo {
    fn row_to_record(row: &Row<'_>) -> rusqlite::Result<SnippetRecord> {
        let id: i64 = row.get(0)?;
        let enabled: i64 = row.get(4)?;
        Ok(SnippetRecord {
            id: SnippetId(id),
            path: row.get(1)?,
            source: row.get(2)?,
            sortorder: row.get(3)?,
            enabled: enabled != 0,
        })
    }

    fn query_records<P: rusqlite::Params>(
        conn: &Connection,
        sql: &str,
        params: P,
    ) -> Result<Vec<SnippetRecord>> {
        let mut stmt = conn.prepare(sql).map_err(from_rusqlite)?;
        let records = stmt
            .query_map(params, Self::row_to_record)
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;
        Ok(records)
    }

    /// Get a record by id
    pub fn get(conn: &Connection, id: SnippetId) -> Result<Option<SnippetRecord>> {
        conn.query_row(
            &format!("{} WHERE id = ?1", SELECT_COLUMNS),
            [id.get()],
            Self::row_to_record,
        )
        .optional()
        .map_err(from_rusqlite)
    }

    /// Get the record at a sortorder position, across all sources
    pub fn get_by_sortorder(conn: &Connection, sortorder: i64) -> Result<Option<SnippetRecord>> {
        conn.query_row(
            &format!("{} WHERE sortorder = ?1", SELECT_COLUMNS),
            [sortorder],
            Self::row_to_record,
        )
        .optional()
        .map_err(from_rusqlite)
    }

    /// All records in composition order
    pub fn list_all(conn: &Connection) -> Result<Vec<SnippetRecord>> {
        Self::query_records(
            conn,
            &format!("{} ORDER BY sortorder ASC", SELECT_COLUMNS),
            [],
        )
    }

    /// Records of one source, highest sortorder first
    pub fn list_by_source_desc(conn: &Connection, source: &str) -> Result<Vec<SnippetRecord>> {
        Self::query_records(
            conn,
            &format!(
                "{} WHERE source = ?1 ORDER BY sortorder DESC",
                SELECT_COLUMNS
            ),
            [source],
        )
    }

    /// Enabled records whose source is in `sources`, in composition order
    ///
    /// An empty `sources` slice matches nothing.
    pub fn list_enabled_in_sources(
        conn: &Connection,
        sources: &[String],
    ) -> Result<Vec<SnippetRecord>> {
        let filter: Vec<&str> = if sources.is_empty() {
            vec![NO_SOURCE_SENTINEL]
        } else {
            sources.iter().map(String::as_str).collect()
        };

        let placeholders = (1..=filter.len())
            .map(|i| format!("?{}", i))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "{} WHERE enabled = 1 AND source IN ({}) ORDER BY sortorder ASC",
            SELECT_COLUMNS, placeholders
        );

        Self::query_records(conn, &sql, params_from_iter(filter.iter()))
    }

    /// Highest sortorder in the whole table, 0 when empty
    pub fn max_sortorder(conn: &Connection) -> Result<i64> {
        conn.query_row(
            "SELECT COALESCE(MAX(sortorder), 0) FROM snippets",
            [],
            |row| row.get(0),
        )
        .map_err(from_rusqlite)
    }

    /// Insert a new, disabled record
    pub fn insert(
        conn: &Connection,
        path: &str,
        source: &str,
        sortorder: i64,
    ) -> Result<SnippetRecord> {
        conn.execute(
            "INSERT INTO snippets (path, source, sortorder, enabled) VALUES (?1, ?2, ?3, 0)",
            params![path, source, sortorder],
        )
        .map_err(from_rusqlite)?;

        Ok(SnippetRecord::new(
            SnippetId(conn.last_insert_rowid()),
            path,
            source,
            sortorder,
            false,
        ))
    }

    /// Exchange the sortorders of two records
    ///
    /// `a` is parked on a negative position first so the unique index on
    /// sortorder holds after every statement. Callers run this inside a
    /// transaction with both records freshly loaded.
    pub fn swap_sortorders(conn: &Connection, a: &SnippetRecord, b: &SnippetRecord) -> Result<()> {
        let parked = -a.sortorder - 1;
        Self::set_sortorder(conn, a.id, parked)?;
        Self::set_sortorder(conn, b.id, a.sortorder)?;
        Self::set_sortorder(conn, a.id, b.sortorder)?;
        Ok(())
    }

    /// Set the sortorder of one record; returns whether a row was updated
    pub fn set_sortorder(conn: &Connection, id: SnippetId, sortorder: i64) -> Result<bool> {
        let changed = conn
            .execute(
                "UPDATE snippets SET sortorder = ?1 WHERE id = ?2",
                params![sortorder, id.get()],
            )
            .map_err(from_rusqlite)?;
        Ok(changed > 0)
    }

    /// Set the enabled flag of one record; returns whether a row was updated
    pub fn set_enabled(conn: &Connection, id: SnippetId, enabled: bool) -> Result<bool> {
        let changed = conn
            .execute(
                "UPDATE snippets SET enabled = ?1 WHERE id = ?2",
                params![if enabled { 1 } else { 0 }, id.get()],
            )
            .map_err(from_rusqlite)?;
        Ok(changed > 0)
    }

    pub fn count_all(conn: &Connection) -> Result<i64> {
        conn.query_row("SELECT COUNT(*) FROM snippets", [], |row| row.get(0))
            .map_err(from_rusqlite)
    }

    pub fn count_by_source(conn: &Connection, source: &str) -> Result<i64> {
        conn.query_row(
            "SELECT COUNT(*) FROM snippets WHERE source = ?1",
            [source],
            |row| row.get(0),
        )
        .map_err(from_rusqlite)
    }

    /// Delete the record of one snippet; returns the number of rows removed
    pub fn delete_by_source_path(conn: &Connection, source: &str, path: &str) -> Result<usize> {
        conn.execute(
            "DELETE FROM snippets WHERE source = ?1 AND path = ?2",
            params![source, path],
        )
        .map_err(from_rusqlite)
    }

    /// Delete every record of a source; returns the number of rows removed
    pub fn delete_by_source(conn: &Connection, source: &str) -> Result<usize> {
        conn.execute("DELETE FROM snippets WHERE source = ?1", [source])
            .map_err(from_rusqlite)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::migrations::apply_migrations;
    use stylesnip_core::ExErrorKind;

    fn setup_test_db() -> Connection {
        let mut conn = Connection::open_in_memory().unwrap();
        apply_migrations(&mut conn).unwrap();
        conn
    }

    #[test]
    fn test_insert_assigns_increasing_ids() {
        let conn = setup_test_db();
        let a = SnippetRepo::insert(&conn, "a.scss", "builtin", 1).unwrap();
        let b = SnippetRepo::insert(&conn, "b.scss", "builtin", 2).unwrap();
        assert!(b.id > a.id);
        assert!(!a.enabled);
        assert_eq!(SnippetRepo::get(&conn, a.id).unwrap(), Some(a));
    }

    #[test]
    fn test_duplicate_sortorder_is_rejected() {
        let conn = setup_test_db();
        SnippetRepo::insert(&conn, "a.scss", "builtin", 1).unwrap();
        let err = SnippetRepo::insert(&conn, "b.scss", "builtin", 1).unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::ConstraintViolation);
    }

    #[test]
    fn test_duplicate_source_path_is_rejected() {
        let conn = setup_test_db();
        SnippetRepo::insert(&conn, "a.scss", "builtin", 1).unwrap();
        assert!(SnippetRepo::insert(&conn, "a.scss", "builtin", 2).is_err());
        // Same path under another source is a different snippet.
        assert!(SnippetRepo::insert(&conn, "a.scss", "other", 2).is_ok());
    }

    #[test]
    fn test_ids_are_not_reused_after_delete() {
        let conn = setup_test_db();
        let a = SnippetRepo::insert(&conn, "a.scss", "builtin", 1).unwrap();
        SnippetRepo::delete_by_source_path(&conn, "builtin", "a.scss").unwrap();
        let again = SnippetRepo::insert(&conn, "a.scss", "builtin", 1).unwrap();
        assert!(again.id > a.id);
    }

    #[test]
    fn test_max_sortorder_empty_is_zero() {
        let conn = setup_test_db();
        assert_eq!(SnippetRepo::max_sortorder(&conn).unwrap(), 0);
    }

    #[test]
    fn test_empty_source_filter_matches_nothing() {
        let conn = setup_test_db();
        let a = SnippetRepo::insert(&conn, "a.scss", "builtin", 1).unwrap();
        SnippetRepo::set_enabled(&conn, a.id, true).unwrap();

        assert!(SnippetRepo::list_enabled_in_sources(&conn, &[])
            .unwrap()
            .is_empty());
        assert_eq!(
            SnippetRepo::list_enabled_in_sources(&conn, &["builtin".to_string()])
                .unwrap()
                .len(),
            1
        );
    }

    #[test]
    fn test_swap_sortorders() {
        let conn = setup_test_db();
        let a = SnippetRepo::insert(&conn, "a.scss", "builtin", 1).unwrap();
        let b = SnippetRepo::insert(&conn, "b.scss", "builtin", 2).unwrap();

        SnippetRepo::swap_sortorders(&conn, &a, &b).unwrap();

        assert_eq!(SnippetRepo::get(&conn, a.id).unwrap().unwrap().sortorder, 2);
        assert_eq!(SnippetRepo::get(&conn, b.id).unwrap().unwrap().sortorder, 1);
    }

    #[test]
    fn test_set_enabled_unknown_id_reports_no_change() {
        let conn = setup_test_db();
        assert!(!SnippetRepo::set_enabled(&conn, SnippetId(99), true).unwrap());
    }
}
