//! Admin actions: enable, disable, up, down
//!
//! Usage: stylesnip <enable|disable|up|down> <ID>

use super::{load_config, open_store, GlobalArgs};
use clap::Args;
use stylesnip_core::SnippetId;
use stylesnip_engine::{apply_admin_action, ActionOutcome, MoveOutcome};

#[derive(Debug, Args)]
pub struct ActionArgs {
    /// Record id, as shown by `stylesnip list`
    pub id: i64,
}

pub fn execute(
    globals: &GlobalArgs,
    verb: &str,
    args: ActionArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(globals)?;
    let invalidator = config.cache_invalidator();
    let mut conn = open_store(&config)?;

    let id = SnippetId(args.id);
    match apply_admin_action(verb, id, &mut conn, invalidator.as_ref())? {
        ActionOutcome::Toggled(record) => println!(
            "{} {}/{}",
            if record.enabled { "Enabled" } else { "Disabled" },
            record.source,
            record.path
        ),
        ActionOutcome::Moved(MoveOutcome::Swapped { with }) => {
            println!("Moved {} {} (swapped with {})", id, verb, with)
        }
        ActionOutcome::Moved(MoveOutcome::Unchanged) => {
            println!("Snippet {} cannot move {}; order unchanged", id, verb)
        }
        ActionOutcome::Ignored => println!("Ignored unknown action '{}'", verb),
    }
    Ok(())
}
