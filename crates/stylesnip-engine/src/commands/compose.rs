//! Composition and overview
//!
//! Composition yields the raw text of every enabled snippet whose source is
//! currently permitted, in sortorder. The overview joins every persisted
//! record with its live metadata for the admin table.

#![allow(clippy::result_large_err)]

use rusqlite::Connection;
use stylesnip_core::collaborators::FeatureToggles;
use stylesnip_core::model::ComposedSnippet;
use stylesnip_core::source::SourceRegistry;
use stylesnip_core::{log_op_end, log_op_error, log_op_start};
use stylesnip_store::errors::Result;
use stylesnip_store::SnippetRepo;

/// Concatenated content of all enabled snippets of permitted sources
///
/// Snippets that no longer resolve, or whose header lacks a title, are
/// skipped. Contents are joined without a separator; the result is empty
/// when nothing qualifies.
///
/// # Errors
///
/// Returns a `Persistence` error if the records cannot be read.
pub fn compose_enabled(
    conn: &Connection,
    sources: &SourceRegistry,
    toggles: &dyn FeatureToggles,
) -> Result<String> {
    log_op_start!("compose_enabled");
    let start = std::time::Instant::now();

    let permitted: Vec<String> = toggles.enabled_sources().into_iter().collect();
    let records = SnippetRepo::list_enabled_in_sources(conn, &permitted).map_err(|e| {
        log_op_error!(
            "compose_enabled",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64
        );
        e
    })?;

    let mut composed = String::new();
    let mut included = 0usize;
    let mut skipped = 0usize;
    for record in &records {
        if sources
            .get_snippet_meta(&record.path, &record.source)
            .is_none()
        {
            tracing::debug!(
                snippet_id = record.id.get(),
                source = %record.source,
                path = %record.path,
                "skipping snippet without valid metadata"
            );
            skipped += 1;
            continue;
        }
        composed.push_str(&sources.get_snippet_content(&record.path, &record.source));
        included += 1;
    }

    log_op_end!(
        "compose_enabled",
        duration_ms = start.elapsed().as_millis() as u64,
        composed = included,
        skipped = skipped
    );

    Ok(composed)
}

/// Every persisted record with valid metadata, in sortorder
///
/// Movement flags reflect the record's position among all persisted
/// records, so the first record never offers "up" and the last never
/// offers "down" even when neighbours are hidden from the listing.
///
/// # Errors
///
/// Returns a `Persistence` error if the records cannot be read.
pub fn list_snippets(conn: &Connection, sources: &SourceRegistry) -> Result<Vec<ComposedSnippet>> {
    log_op_start!("list_snippets");
    let start = std::time::Instant::now();

    let records = SnippetRepo::list_all(conn).map_err(|e| {
        log_op_error!(
            "list_snippets",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64
        );
        e
    })?;

    let last = records.len().saturating_sub(1);
    let rows: Vec<ComposedSnippet> = records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| {
            let meta = sources.get_snippet_meta(&record.path, &record.source)?;
            Some(ComposedSnippet {
                can_move_up: index > 0,
                can_move_down: index < last,
                record,
                meta,
            })
        })
        .collect();

    log_op_end!(
        "list_snippets",
        duration_ms = start.elapsed().as_millis() as u64,
        composed = rows.len()
    );

    Ok(rows)
}
