//! Operation logging macros
//!
//! Every registry operation brackets its work with these so that start, end
//! and failure events share one field layout: `component`, `op`, `event`,
//! then whatever the caller adds.

/// Shared event shape; not for direct use
#[doc(hidden)]
#[macro_export]
macro_rules! __log_op_event {
    ($level:ident, $op:expr, $event:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            component = module_path!(),
            op = $op,
            event = $event,
            $($($field)*)?
        )
    };
}

/// Log the start of an operation
///
/// # Example
///
/// ```
/// # use stylesnip_core::log_op_start;
/// log_op_start!("reconcile");
/// log_op_start!("reconcile", source = "builtin");
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr $(, $($field:tt)*)?) => {
        $crate::__log_op_event!(
            info,
            $op,
            stylesnip_core_types::schema::EVENT_START
            $(, $($field)*)?
        )
    };
}

/// Log the successful end of an operation
///
/// `duration_ms` is mandatory and comes first.
///
/// # Example
///
/// ```
/// # use stylesnip_core::log_op_end;
/// log_op_end!("compose_enabled", duration_ms = 3);
/// log_op_end!("compose_enabled", duration_ms = 3, composed = 2);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {
        $crate::__log_op_event!(
            info,
            $op,
            stylesnip_core_types::schema::EVENT_END,
            duration_ms = $duration
            $(, $($field)*)?
        )
    };
}

/// Log an operation failure
///
/// Accepts anything convertible into `ExError` and adds its kind and code.
///
/// # Example
///
/// ```
/// # use stylesnip_core::{log_op_error, errors::SnippetError};
/// let err = SnippetError::SnippetNotFound { snippet_id: 4 };
/// log_op_error!("move_up", err, duration_ms = 1);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        $crate::__log_op_event!(
            error,
            $op,
            stylesnip_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?ex_err.kind(),
            err_code = ex_err.code()
            $(, $($field)*)?
        )
    }};
}
