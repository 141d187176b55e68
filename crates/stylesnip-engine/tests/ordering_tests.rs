//! Reordering and admin actions against a file-backed store.

use proptest::prelude::*;
use rusqlite::Connection;
use std::collections::BTreeSet;
use stylesnip_core::collaborators::CountingCacheInvalidator;
use stylesnip_core::logging_facility::test_capture::init_test_capture;
use stylesnip_core::source::{CodeTableSource, SourceRegistry};
use stylesnip_core::{ExErrorKind, SnippetId};
use stylesnip_core_types::schema::{EVENT_END_ERROR, FIELD_ERR_CODE, FIELD_SNIPPET_ID};
use stylesnip_engine::{
    apply_admin_action, move_down, move_up, reconcile, ActionOutcome, MoveOutcome,
};
use stylesnip_store::SnippetRepo;
use tempfile::TempDir;

fn setup(count: usize) -> (TempDir, Connection, Vec<SnippetId>) {
    let temp_dir = TempDir::new().unwrap();
    let mut conn = stylesnip_store::db::open_registry(&temp_dir.path().join("registry.db")).unwrap();

    let mut source = CodeTableSource::new("code");
    for i in 0..count {
        source.insert(format!("s{:02}", i), format!("/* Snippet Title: S{} */", i));
    }
    let sources = SourceRegistry::default().with_source(source);
    let report = reconcile(&mut conn, &sources, "code").unwrap();
    let ids = report.inserted.iter().map(|r| r.id).collect();
    (temp_dir, conn, ids)
}

fn sortorders(conn: &Connection) -> Vec<(SnippetId, i64)> {
    SnippetRepo::list_all(conn)
        .unwrap()
        .into_iter()
        .map(|r| (r.id, r.sortorder))
        .collect()
}

#[test]
fn test_move_up_on_first_is_noop() {
    // Given: Three records
    let (_tmp, mut conn, ids) = setup(3);
    let before = sortorders(&conn);
    let invalidator = CountingCacheInvalidator::new();

    // When: Moving the first record up
    let outcome = move_up(&mut conn, ids[0], &invalidator).unwrap();

    // Then: Nothing changes and the cache is left alone
    assert_eq!(outcome, MoveOutcome::Unchanged);
    assert_eq!(sortorders(&conn), before);
    assert_eq!(invalidator.count(), 0);
}

#[test]
fn test_move_swaps_exactly_two_records() {
    // Given: Four records
    let (_tmp, mut conn, ids) = setup(4);
    let before = sortorders(&conn);
    let invalidator = CountingCacheInvalidator::new();

    // When: Moving the third record up
    let outcome = move_up(&mut conn, ids[2], &invalidator).unwrap();

    // Then: It traded places with the second and nothing else moved
    assert_eq!(outcome, MoveOutcome::Swapped { with: ids[1] });
    let after = sortorders(&conn);
    let changed: Vec<_> = before
        .iter()
        .filter(|(id, order)| !after.contains(&(*id, *order)))
        .map(|(id, _)| *id)
        .collect();
    assert_eq!(changed, vec![ids[1], ids[2]]);
    assert_eq!(SnippetRepo::get(&conn, ids[2]).unwrap().unwrap().sortorder, 2);
    assert_eq!(SnippetRepo::get(&conn, ids[1]).unwrap().unwrap().sortorder, 3);
    assert_eq!(invalidator.count(), 1);
}

#[test]
fn test_move_down_then_up_restores_order() {
    let (_tmp, mut conn, ids) = setup(3);
    let before = sortorders(&conn);
    let invalidator = CountingCacheInvalidator::new();

    move_down(&mut conn, ids[0], &invalidator).unwrap();
    move_up(&mut conn, ids[0], &invalidator).unwrap();

    assert_eq!(sortorders(&conn), before);
    assert_eq!(invalidator.count(), 2);
}

#[test]
fn test_move_unknown_id_is_not_found() {
    let (_tmp, mut conn, _) = setup(2);

    let err = move_down(&mut conn, SnippetId(999), &CountingCacheInvalidator::new()).unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::NotFound);
    assert_eq!(err.snippet_id(), Some(999));
}

#[test]
fn test_failed_move_logs_error_event() {
    // Given: A capture layer and a store without record 4242
    let capture = init_test_capture();
    let (_tmp, mut conn, _) = setup(1);

    // When: Moving the unknown record
    move_up(&mut conn, SnippetId(4242), &CountingCacheInvalidator::new()).unwrap_err();

    // Then: An end_error event carries the id and the error code
    let failures: Vec<_> = capture
        .events_for_op("move_up")
        .into_iter()
        .filter(|e| e.event.as_deref() == Some(EVENT_END_ERROR))
        .filter(|e| e.fields.get(FIELD_SNIPPET_ID).map(String::as_str) == Some("4242"))
        .collect();
    assert_eq!(failures.len(), 1);
    assert_eq!(
        failures[0].fields.get(FIELD_ERR_CODE).map(String::as_str),
        Some("ERR_NOT_FOUND")
    );
}

#[test]
fn test_admin_actions_dispatch() {
    // Given: Two records
    let (_tmp, mut conn, ids) = setup(2);
    let invalidator = CountingCacheInvalidator::new();

    // When/Then: enable toggles the flag
    match apply_admin_action("enable", ids[1], &mut conn, &invalidator).unwrap() {
        ActionOutcome::Toggled(record) => assert!(record.enabled),
        other => panic!("unexpected outcome {:?}", other),
    }

    // When/Then: the move alias reorders
    let outcome = apply_admin_action("move-up", ids[1], &mut conn, &invalidator).unwrap();
    assert_eq!(outcome, ActionOutcome::Moved(MoveOutcome::Swapped { with: ids[0] }));

    // When/Then: disable clears the flag again
    apply_admin_action("disable", ids[1], &mut conn, &invalidator).unwrap();
    assert!(!SnippetRepo::get(&conn, ids[1]).unwrap().unwrap().enabled);

    assert_eq!(invalidator.count(), 3);
}

#[test]
fn test_unknown_verb_is_ignored() {
    // Given: Two records
    let (_tmp, mut conn, ids) = setup(2);
    let before = sortorders(&conn);
    let invalidator = CountingCacheInvalidator::new();

    // When: An unrecognised verb arrives
    let outcome = apply_admin_action("delete", ids[0], &mut conn, &invalidator).unwrap();

    // Then: Nothing happens
    assert_eq!(outcome, ActionOutcome::Ignored);
    assert_eq!(sortorders(&conn), before);
    assert_eq!(invalidator.count(), 0);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_moves_keep_sortorders_a_permutation(
        moves in prop::collection::vec((0usize..5, any::<bool>()), 0..20)
    ) {
        let (_tmp, mut conn, ids) = setup(5);
        let invalidator = CountingCacheInvalidator::new();
        let mut swaps = 0;

        for (index, up) in moves {
            let outcome = if up {
                move_up(&mut conn, ids[index], &invalidator).unwrap()
            } else {
                move_down(&mut conn, ids[index], &invalidator).unwrap()
            };
            if outcome.is_swapped() {
                swaps += 1;
            }
        }

        let orders: BTreeSet<i64> = sortorders(&conn).into_iter().map(|(_, o)| o).collect();
        prop_assert_eq!(orders, (1..=5).collect::<BTreeSet<i64>>());
        prop_assert_eq!(invalidator.count(), swaps);
    }
}
