// Integration tests for schema migrations on a file-backed database

use stylesnip_store::db;
use stylesnip_store::SnippetRepo;
use tempfile::TempDir;

#[test]
fn test_open_registry_creates_parent_dirs_and_schema() {
    // Given: A path whose parent directory does not exist yet
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("nested").join("registry.db");

    // When: We open the registry
    let conn = db::open_registry(&db_path).unwrap();

    // Then: The file exists and the snippets table is usable
    assert!(db_path.exists());
    assert_eq!(SnippetRepo::count_all(&conn).unwrap(), 0);
}

#[test]
fn test_reopen_keeps_records() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("registry.db");

    {
        let conn = db::open_registry(&db_path).unwrap();
        SnippetRepo::insert(&conn, "a.scss", "builtin", 1).unwrap();
    }

    let conn = db::open_registry(&db_path).unwrap();
    assert_eq!(SnippetRepo::count_by_source(&conn, "builtin").unwrap(), 1);
}

#[test]
fn test_file_database_uses_wal() {
    let dir = TempDir::new().unwrap();
    let conn = db::open_registry(dir.path().join("registry.db")).unwrap();

    let mode: String = conn
        .query_row("PRAGMA journal_mode", [], |row| row.get(0))
        .unwrap();
    assert_eq!(mode.to_lowercase(), "wal");
}
