//! Field keys and event names of the structured log
//!
//! The `log_op_*` macros and the test capture layer both read these, so a
//! renamed key shows up as a test failure rather than a silent drift.

// Envelope present on every operation event
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";

// Registry identifiers
pub const FIELD_SNIPPET_ID: &str = "snippet_id";
pub const FIELD_SOURCE: &str = "source";

// Operation results
pub const FIELD_INSERTED: &str = "inserted";
pub const FIELD_ORPHANED: &str = "orphaned";
pub const FIELD_COMPOSED: &str = "composed";
pub const FIELD_SKIPPED: &str = "skipped";
pub const FIELD_SWAPPED: &str = "swapped";
pub const FIELD_REMOVED: &str = "removed";

// Failure classification on `end_error` events
pub const FIELD_ERR_KIND: &str = "err_kind";
pub const FIELD_ERR_CODE: &str = "err_code";

pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
