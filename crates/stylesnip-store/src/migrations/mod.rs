//! Schema migrations
//!
//! SQL files under `migrations/` are embedded at compile time and applied
//! in order. Each applied step is recorded with its checksum in
//! `registry_migrations`, so reopening a database only runs what is new.

mod checksums;
mod embedded;
mod runner;

pub use embedded::{Migration, MIGRATIONS};
pub use runner::apply_migrations;
