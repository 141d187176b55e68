//! Command orchestration layer.
//!
//! Every command takes the connection, sources and collaborators it needs
//! as arguments; nothing is read from process-wide state.

pub mod actions;
pub mod compose;
pub mod ordering;
pub mod reconcile;
