#![allow(clippy::unwrap_used, clippy::expect_used)]

use stylesnip_core::errors::{ExErrorKind, SnippetError};
use stylesnip_core::logging_facility::test_capture::{init_test_capture, CapturedEvent};
use stylesnip_core::{log_op_end, log_op_error, log_op_start};
use stylesnip_core_types::schema::{
    EVENT_END, EVENT_END_ERROR, EVENT_START, FIELD_COMPONENT, FIELD_ERR_CODE, FIELD_ERR_KIND,
};

// Each test logs under its own op name; the capture buffer is process-wide.
fn only(events: Vec<CapturedEvent>, event: &str) -> CapturedEvent {
    let mut matching: Vec<_> = events
        .into_iter()
        .filter(|e| e.event.as_deref() == Some(event))
        .collect();
    assert_eq!(matching.len(), 1, "expected one `{}` event", event);
    matching.remove(0)
}

#[test]
fn test_start_event_carries_extra_fields() {
    let capture = init_test_capture();

    log_op_start!("start_sample_op", source = "builtin");

    capture.assert_event_exists("start_sample_op", EVENT_START);
    let start = only(capture.events_for_op("start_sample_op"), EVENT_START);
    assert_eq!(start.fields.get("source").map(String::as_str), Some("builtin"));
    assert!(start.fields.contains_key(FIELD_COMPONENT));
}

#[test]
fn test_end_event_records_duration() {
    let capture = init_test_capture();

    log_op_end!("end_sample_op", duration_ms = 42, composed = 2);

    let end = only(capture.events_for_op("end_sample_op"), EVENT_END);
    assert_eq!(end.fields.get("duration_ms").map(String::as_str), Some("42"));
    assert_eq!(end.fields.get("composed").map(String::as_str), Some("2"));
}

#[test]
fn test_error_event_classifies_the_error() {
    // Given: A domain error for a missing record
    let capture = init_test_capture();
    let err = SnippetError::SnippetNotFound { snippet_id: 9 };

    // When: It is logged as the failure of an operation
    log_op_error!("error_sample_op", err, duration_ms = 10);

    // Then: The event holds both the kind and the stable code
    let failure = only(capture.events_for_op("error_sample_op"), EVENT_END_ERROR);
    assert_eq!(
        failure.fields.get(FIELD_ERR_KIND),
        Some(&format!("{:?}", ExErrorKind::NotFound))
    );
    assert_eq!(
        failure.fields.get(FIELD_ERR_CODE).map(String::as_str),
        Some("ERR_NOT_FOUND")
    );
    assert_eq!(failure.level, tracing::Level::ERROR);
}
