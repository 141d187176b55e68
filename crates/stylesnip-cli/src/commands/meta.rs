//! Meta command
//!
//! Usage: stylesnip meta <PATH> [--source <ID>] [--json]

use super::{load_config, GlobalArgs};
use clap::Args;
use stylesnip_core::BUILTIN_SOURCE;

#[derive(Debug, Args)]
pub struct MetaArgs {
    /// Snippet path within its source, e.g. `visual-depth.scss`
    pub path: String,

    #[arg(long, default_value = BUILTIN_SOURCE)]
    pub source: String,

    #[arg(long)]
    pub json: bool,
}

pub fn execute(globals: &GlobalArgs, args: MetaArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(globals)?;
    let sources = config.build_sources();

    let meta = sources.require_snippet_meta(&args.path, &args.source)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&meta)?);
        return Ok(());
    }

    println!("Title:       {}", meta.title);
    println!("Goal:        {}", meta.goal);
    println!("Scope:       {}", meta.scope);
    println!("Description: {}", meta.description);
    if !meta.creator.is_empty() {
        println!("Creator:     {}", meta.creator);
    }
    if !meta.usage_note.is_empty() {
        println!("Usage note:  {}", meta.usage_note);
    }
    if let Some(url) = &meta.preview_url {
        println!("Preview:     {}", url);
    }
    Ok(())
}
