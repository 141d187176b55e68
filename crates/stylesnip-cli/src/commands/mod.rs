//! Subcommands and the setup they share

use clap::Args;
use rusqlite::Connection;
use std::path::PathBuf;
use stylesnip_core::RegistryConfig;

pub mod action;
pub mod compose;
pub mod list;
pub mod meta;
pub mod reconcile;

/// Options accepted by every subcommand
#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Configuration file (default: $STYLESNIP_CONFIG, then ./stylesnip.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Installation root, overriding the configuration and $STYLESNIP_ROOT
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Registry database file, overriding the configuration
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,
}

/// Resolve configuration and apply command-line overrides
pub fn load_config(globals: &GlobalArgs) -> Result<RegistryConfig, Box<dyn std::error::Error>> {
    let mut config = RegistryConfig::resolve(globals.config.as_deref())?;
    if let Some(root) = &globals.root {
        config.installation_root = root.clone();
    }
    if let Some(db) = &globals.db {
        config.database_path = db.clone();
    }
    Ok(config)
}

/// Open (and migrate) the registry database named by `config`
pub fn open_store(config: &RegistryConfig) -> Result<Connection, Box<dyn std::error::Error>> {
    Ok(stylesnip_store::db::open_registry(&config.database_path)?)
}
