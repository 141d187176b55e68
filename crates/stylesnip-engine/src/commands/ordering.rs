//! Admin mutations: reordering, enabling and source removal
//!
//! Every mutation runs in one IMMEDIATE transaction and, once committed,
//! asks the cache invalidator to drop compiled output. A move that finds no
//! neighbour commits nothing and leaves the cache alone.

#![allow(clippy::result_large_err)]

use rusqlite::{Connection, TransactionBehavior};
use stylesnip_core::collaborators::CacheInvalidator;
use stylesnip_core::model::{SnippetId, SnippetRecord};
use stylesnip_core::{log_op_end, log_op_error, log_op_start};
use stylesnip_store::errors::{from_rusqlite, snippet_not_found, Result};
use stylesnip_store::SnippetRepo;

/// Result of a move request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Sortorders were exchanged with the neighbouring record
    Swapped { with: SnippetId },
    /// Already first (or last); nothing changed
    Unchanged,
}

impl MoveOutcome {
    pub fn is_swapped(&self) -> bool {
        matches!(self, MoveOutcome::Swapped { .. })
    }
}

/// Swap a record with the one directly before it in the global order
///
/// # Errors
///
/// `NotFound` if no record has `id`; `Persistence` or `Concurrency` if the
/// store fails, in which case nothing is committed.
pub fn move_up(
    conn: &mut Connection,
    id: SnippetId,
    invalidator: &dyn CacheInvalidator,
) -> Result<MoveOutcome> {
    step("move_up", conn, id, -1, invalidator)
}

/// Swap a record with the one directly after it in the global order
///
/// # Errors
///
/// Same as [`move_up`].
pub fn move_down(
    conn: &mut Connection,
    id: SnippetId,
    invalidator: &dyn CacheInvalidator,
) -> Result<MoveOutcome> {
    step("move_down", conn, id, 1, invalidator)
}

fn step(
    op: &'static str,
    conn: &mut Connection,
    id: SnippetId,
    offset: i64,
    invalidator: &dyn CacheInvalidator,
) -> Result<MoveOutcome> {
    log_op_start!(op, snippet_id = id.get());
    let start = std::time::Instant::now();

    let outcome = step_impl(op, conn, id, offset).map_err(|e| {
        log_op_error!(
            op,
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64,
            snippet_id = id.get()
        );
        e
    })?;

    if outcome.is_swapped() {
        invalidator.invalidate_compiled_output();
    }

    log_op_end!(
        op,
        duration_ms = start.elapsed().as_millis() as u64,
        snippet_id = id.get(),
        swapped = outcome.is_swapped()
    );

    Ok(outcome)
}

fn step_impl(op: &str, conn: &mut Connection, id: SnippetId, offset: i64) -> Result<MoveOutcome> {
    let tx = conn
        .transaction_with_behavior(TransactionBehavior::Immediate)
        .map_err(from_rusqlite)?;

    let record = SnippetRepo::get(&tx, id)?.ok_or_else(|| snippet_not_found(op, id.get()))?;
    let neighbour = match SnippetRepo::get_by_sortorder(&tx, record.sortorder + offset)? {
        Some(neighbour) => neighbour,
        // Dropping `tx` rolls back and releases the write lock.
        None => return Ok(MoveOutcome::Unchanged),
    };

    SnippetRepo::swap_sortorders(&tx, &record, &neighbour)?;
    tx.commit().map_err(from_rusqlite)?;

    Ok(MoveOutcome::Swapped { with: neighbour.id })
}

/// Switch a record on or off for composition
///
/// Setting the flag it already has still counts as a change and
/// invalidates the cache.
///
/// # Errors
///
/// `NotFound` if no record has `id`; `Persistence` if the store fails.
pub fn set_enabled(
    conn: &mut Connection,
    id: SnippetId,
    enabled: bool,
    invalidator: &dyn CacheInvalidator,
) -> Result<SnippetRecord> {
    log_op_start!("set_enabled", snippet_id = id.get(), enabled = enabled);
    let start = std::time::Instant::now();

    let record = set_enabled_impl(conn, id, enabled).map_err(|e| {
        log_op_error!(
            "set_enabled",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64,
            snippet_id = id.get()
        );
        e
    })?;

    invalidator.invalidate_compiled_output();

    log_op_end!(
        "set_enabled",
        duration_ms = start.elapsed().as_millis() as u64,
        snippet_id = id.get(),
        enabled = enabled
    );

    Ok(record)
}

fn set_enabled_impl(conn: &mut Connection, id: SnippetId, enabled: bool) -> Result<SnippetRecord> {
    let tx = conn
        .transaction_with_behavior(TransactionBehavior::Immediate)
        .map_err(from_rusqlite)?;

    let mut record =
        SnippetRepo::get(&tx, id)?.ok_or_else(|| snippet_not_found("set_enabled", id.get()))?;
    SnippetRepo::set_enabled(&tx, id, enabled)?;
    tx.commit().map_err(from_rusqlite)?;

    record.enabled = enabled;
    Ok(record)
}

/// Delete every record of a source
///
/// For use when a source is uninstalled; reconciliation never deletes.
/// The remaining sortorders are left as they are, gaps included.
///
/// # Errors
///
/// `Persistence` if the store fails.
pub fn remove_source(
    conn: &mut Connection,
    source: &str,
    invalidator: &dyn CacheInvalidator,
) -> Result<usize> {
    log_op_start!("remove_source", source = source);
    let start = std::time::Instant::now();

    let removed = remove_source_impl(conn, source).map_err(|e| {
        log_op_error!(
            "remove_source",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64,
            source = source
        );
        e
    })?;

    invalidator.invalidate_compiled_output();

    log_op_end!(
        "remove_source",
        duration_ms = start.elapsed().as_millis() as u64,
        source = source,
        removed = removed
    );

    Ok(removed)
}

fn remove_source_impl(conn: &mut Connection, source: &str) -> Result<usize> {
    let tx = conn
        .transaction_with_behavior(TransactionBehavior::Immediate)
        .map_err(from_rusqlite)?;
    let removed = SnippetRepo::delete_by_source(&tx, source)?;
    tx.commit().map_err(from_rusqlite)?;
    Ok(removed)
}
