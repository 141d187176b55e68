//! Admin action dispatch
//!
//! Maps the verbs of the admin overview (`enable`, `disable`, `up`, `down`)
//! onto registry mutations. Request freshness is checked by the session
//! layer before anything reaches this module.

#![allow(clippy::result_large_err)]

use crate::commands::ordering::{move_down, move_up, set_enabled, MoveOutcome};
use rusqlite::Connection;
use std::str::FromStr;
use stylesnip_core::collaborators::CacheInvalidator;
use stylesnip_core::model::{SnippetId, SnippetRecord};
use stylesnip_store::errors::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminAction {
    Enable,
    Disable,
    MoveUp,
    MoveDown,
}

impl AdminAction {
    /// Parse a verb; `None` for anything unrecognised
    pub fn parse(verb: &str) -> Option<Self> {
        match verb.trim().to_ascii_lowercase().as_str() {
            "enable" => Some(AdminAction::Enable),
            "disable" => Some(AdminAction::Disable),
            "up" | "move-up" => Some(AdminAction::MoveUp),
            "down" | "move-down" => Some(AdminAction::MoveDown),
            _ => None,
        }
    }

    pub fn verb(&self) -> &'static str {
        match self {
            AdminAction::Enable => "enable",
            AdminAction::Disable => "disable",
            AdminAction::MoveUp => "up",
            AdminAction::MoveDown => "down",
        }
    }
}

impl FromStr for AdminAction {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("unknown admin action '{}'", s))
    }
}

/// What an admin action did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    Toggled(SnippetRecord),
    Moved(MoveOutcome),
    /// The verb was not recognised; nothing was touched
    Ignored,
}

/// Run one admin verb against a record
///
/// Unknown verbs are ignored rather than rejected.
///
/// # Errors
///
/// Propagates the errors of the underlying mutation (`NotFound` for an
/// unknown id, store failures).
pub fn apply_admin_action(
    verb: &str,
    id: SnippetId,
    conn: &mut Connection,
    invalidator: &dyn CacheInvalidator,
) -> Result<ActionOutcome> {
    let Some(action) = AdminAction::parse(verb) else {
        tracing::debug!(verb, snippet_id = id.get(), "ignoring unknown admin action");
        return Ok(ActionOutcome::Ignored);
    };

    match action {
        AdminAction::Enable => set_enabled(conn, id, true, invalidator).map(ActionOutcome::Toggled),
        AdminAction::Disable => {
            set_enabled(conn, id, false, invalidator).map(ActionOutcome::Toggled)
        }
        AdminAction::MoveUp => move_up(conn, id, invalidator).map(ActionOutcome::Moved),
        AdminAction::MoveDown => move_down(conn, id, invalidator).map(ActionOutcome::Moved),
    }
}
