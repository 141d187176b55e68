//! Constructors for the errors the store raises
//!
//! Everything leaves this crate as an `ExError`; rusqlite and io errors are
//! classified here and nowhere else.

use stylesnip_core::errors::{ExError, ExErrorKind};

pub type Result<T> = std::result::Result<T, ExError>;

/// A migration script could not be applied
pub fn migration_error(migration_id: &str, reason: &str) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("migration")
        .with_message(format!("migration {}: {}", migration_id, reason))
}

/// An applied migration no longer matches the embedded script
pub fn checksum_mismatch(migration_id: &str, recorded: &str, embedded: &str) -> ExError {
    ExError::new(ExErrorKind::ConstraintViolation)
        .with_op("verify_migrations")
        .with_message(format!(
            "migration {} was applied with checksum {} but the bundled script hashes to {}",
            migration_id, recorded, embedded
        ))
}

/// No record carries `snippet_id`
pub fn snippet_not_found(op: &str, snippet_id: i64) -> ExError {
    ExError::new(ExErrorKind::NotFound)
        .with_op(op.to_string())
        .with_snippet_id(snippet_id)
        .with_message("Snippet record not found")
}

/// Classify a rusqlite error
///
/// `SQLITE_BUSY` and `SQLITE_LOCKED` map to `Concurrency`; they are retryable.
pub fn from_rusqlite(err: rusqlite::Error) -> ExError {
    let kind = match err.sqlite_error_code() {
        Some(rusqlite::ErrorCode::DatabaseBusy) | Some(rusqlite::ErrorCode::DatabaseLocked) => {
            ExErrorKind::Concurrency
        }
        Some(rusqlite::ErrorCode::ConstraintViolation) => ExErrorKind::ConstraintViolation,
        _ => ExErrorKind::Persistence,
    };
    ExError::new(kind)
        .with_op("sqlite")
        .with_message(err.to_string())
}

pub fn io_error(operation: &str, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op(operation.to_string())
        .with_message(err.to_string())
}
