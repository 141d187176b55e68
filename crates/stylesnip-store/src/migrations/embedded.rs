//! SQL migrations compiled into the binary

use crate::migrations::checksums::compute_checksum;

/// One schema step, identified by its file stem
#[derive(Debug, Clone, Copy)]
pub struct Migration {
    pub id: &'static str,
    pub sql: &'static str,
}

impl Migration {
    pub fn checksum(&self) -> String {
        compute_checksum(self.sql)
    }
}

/// Every migration, oldest first
pub const MIGRATIONS: &[Migration] = &[Migration {
    id: "001_snippets_schema",
    sql: include_str!("../../migrations/001_snippets_schema.sql"),
}];
