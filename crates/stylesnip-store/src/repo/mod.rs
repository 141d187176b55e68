//! Repository layer for persisting snippet records to SQLite

pub mod sqlite_repo;

pub use sqlite_repo::{SnippetRepo, NO_SOURCE_SENTINEL};
