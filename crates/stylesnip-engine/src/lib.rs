//! Stylesnip Engine - registry operations
//!
//! Coordinates snippet sources (stylesnip-core) with the record store
//! (stylesnip-store): discovery, composition and admin reordering.

pub mod commands;

pub use commands::actions::{apply_admin_action, ActionOutcome, AdminAction};
pub use commands::compose::{compose_enabled, list_snippets};
pub use commands::ordering::{move_down, move_up, remove_source, set_enabled, MoveOutcome};
pub use commands::reconcile::{reconcile, reconcile_all, ReconcileReport};
