//! Compose command
//!
//! Usage: stylesnip compose [--output <FILE>]

use super::{load_config, open_store, GlobalArgs};
use clap::Args;
use std::io::Write;
use std::path::PathBuf;
use stylesnip_engine::compose_enabled;

#[derive(Debug, Args)]
pub struct ComposeArgs {
    /// Write to this file instead of stdout
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

pub fn execute(globals: &GlobalArgs, args: ComposeArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(globals)?;
    let sources = config.build_sources();
    let toggles = config.feature_toggles();
    let conn = open_store(&config)?;

    let composed = compose_enabled(&conn, &sources, &toggles)?;

    match args.output {
        Some(path) => std::fs::write(&path, composed)?,
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(composed.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}
