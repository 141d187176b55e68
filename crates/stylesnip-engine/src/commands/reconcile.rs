//! Discovery reconciliation
//!
//! Brings the persisted records of a source in line with the snippets the
//! source currently offers. Reconciliation only ever adds records: a snippet
//! that disappears keeps its record (and its position) until the source is
//! removed explicitly.

#![allow(clippy::result_large_err)]

use rusqlite::{Connection, TransactionBehavior};
use std::collections::BTreeSet;
use stylesnip_core::model::SnippetRecord;
use stylesnip_core::source::SourceRegistry;
use stylesnip_core::{log_op_end, log_op_error, log_op_start};
use stylesnip_store::errors::{from_rusqlite, Result};
use stylesnip_store::SnippetRepo;

/// Outcome of reconciling one source
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    pub source: String,
    /// Records created by this run, in the order they were appended
    pub inserted: Vec<SnippetRecord>,
    /// Paths that have a record but are no longer offered by the source
    pub orphaned: Vec<String>,
}

impl ReconcileReport {
    pub fn is_unchanged(&self) -> bool {
        self.inserted.is_empty()
    }
}

/// Register every snippet of `source` that has no record yet
///
/// Newcomers are appended disabled, after the highest sortorder in the whole
/// table, in the order the source lists them. Running it twice in a row
/// inserts nothing the second time.
///
/// # Errors
///
/// Returns a `Persistence` or `Concurrency` error if the store fails; the
/// batch is rolled back and no newcomer is kept.
pub fn reconcile(
    conn: &mut Connection,
    sources: &SourceRegistry,
    source: &str,
) -> Result<ReconcileReport> {
    log_op_start!("reconcile", source = source);
    let start = std::time::Instant::now();

    let report = reconcile_impl(conn, sources, source).map_err(|e| {
        log_op_error!(
            "reconcile",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64,
            source = source
        );
        e
    })?;

    log_op_end!(
        "reconcile",
        duration_ms = start.elapsed().as_millis() as u64,
        source = source,
        inserted = report.inserted.len(),
        orphaned = report.orphaned.len()
    );

    Ok(report)
}

fn reconcile_impl(
    conn: &mut Connection,
    sources: &SourceRegistry,
    source: &str,
) -> Result<ReconcileReport> {
    if !sources.contains(source) {
        tracing::warn!(source, "reconciling a source with no registered resolver");
    }
    let present = sources.discover(source);

    let tx = conn
        .transaction_with_behavior(TransactionBehavior::Immediate)
        .map_err(from_rusqlite)?;

    let persisted = SnippetRepo::list_by_source_desc(&tx, source)?;
    let known: BTreeSet<&str> = persisted.iter().map(|r| r.path.as_str()).collect();
    let mut next = SnippetRepo::max_sortorder(&tx)?;

    let mut inserted = Vec::new();
    for path in present.iter().filter(|p| !known.contains(p.as_str())) {
        next += 1;
        let record = SnippetRepo::insert(&tx, path, source, next)?;
        tracing::debug!(source, path = %path, sortorder = next, "snippet registered");
        inserted.push(record);
    }

    tx.commit().map_err(from_rusqlite)?;

    let offered: BTreeSet<&str> = present.iter().map(String::as_str).collect();
    let mut orphaned: Vec<String> = persisted
        .iter()
        .filter(|r| !offered.contains(r.path.as_str()))
        .map(|r| r.path.clone())
        .collect();
    orphaned.sort();

    Ok(ReconcileReport {
        source: source.to_string(),
        inserted,
        orphaned,
    })
}

/// Reconcile every registered source, in source id order
///
/// Each source commits separately; an error stops the run and leaves the
/// sources reconciled so far committed.
///
/// # Errors
///
/// Returns the first store error encountered.
pub fn reconcile_all(
    conn: &mut Connection,
    sources: &SourceRegistry,
) -> Result<Vec<ReconcileReport>> {
    sources
        .source_ids()
        .iter()
        .map(|source| reconcile(conn, sources, source))
        .collect()
}
