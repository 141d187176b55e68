//! Stylesnip Store - SQLite persistence for snippet records
//!
//! Provides:
//! - Connection setup (WAL, busy timeout)
//! - Embedded, checksummed schema migrations
//! - `SnippetRepo`, the only code that reads or writes the `snippets` table

pub mod db;
pub mod errors;
pub mod migrations;
pub mod repo;

// Re-export key types
pub use errors::Result;
pub use repo::{SnippetRepo, NO_SOURCE_SENTINEL};
