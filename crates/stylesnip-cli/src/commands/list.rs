//! List command
//!
//! Usage: stylesnip list [--json]

use super::{load_config, open_store, GlobalArgs};
use clap::Args;
use stylesnip_engine::list_snippets;

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Print the rows as a JSON array
    #[arg(long)]
    pub json: bool,
}

pub fn execute(globals: &GlobalArgs, args: ListArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(globals)?;
    let sources = config.build_sources();
    let conn = open_store(&config)?;

    let rows = list_snippets(&conn, &sources)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    if rows.is_empty() {
        println!("No snippets registered. Run `stylesnip reconcile` first.");
        return Ok(());
    }

    for row in &rows {
        let state = if row.record.enabled { "on " } else { "off" };
        let arrows = format!(
            "{}{}",
            if row.can_move_up { '^' } else { ' ' },
            if row.can_move_down { 'v' } else { ' ' }
        );
        let location = format!("{}/{}", row.record.source, row.record.path);
        println!(
            "{:>4}  {}  {}  {:<24}  {}",
            row.record.id,
            state,
            arrows,
            location,
            row.title()
        );
    }
    Ok(())
}
