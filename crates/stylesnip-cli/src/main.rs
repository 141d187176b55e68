//! Stylesnip CLI
//!
//! Command-line interface for the snippet registry

use clap::{Parser, Subcommand, ValueEnum};
use stylesnip_core::logging_facility::{init, Profile};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "stylesnip")]
#[command(about = "Stylesnip - SCSS snippet registry", long_about = None)]
struct Cli {
    #[command(flatten)]
    globals: commands::GlobalArgs,

    /// Emit operation logs on stderr
    #[arg(long, global = true, value_enum)]
    log: Option<LogFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormat {
    Human,
    Json,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Register snippets that have no record yet
    Reconcile(commands::reconcile::ReconcileArgs),
    /// Show every registered snippet in composition order
    List(commands::list::ListArgs),
    /// Print the composed stylesheet source of all enabled snippets
    Compose(commands::compose::ComposeArgs),
    /// Enable a snippet
    Enable(commands::action::ActionArgs),
    /// Disable a snippet
    Disable(commands::action::ActionArgs),
    /// Move a snippet one position earlier
    Up(commands::action::ActionArgs),
    /// Move a snippet one position later
    Down(commands::action::ActionArgs),
    /// Print the header metadata of one snippet
    Meta(commands::meta::MetaArgs),
}

fn main() {
    let cli = Cli::parse();

    match cli.log {
        Some(LogFormat::Human) => init(Profile::Development),
        Some(LogFormat::Json) => init(Profile::Production),
        None => {}
    }

    let globals = cli.globals;
    let result = match cli.command {
        Commands::Reconcile(args) => commands::reconcile::execute(&globals, args),
        Commands::List(args) => commands::list::execute(&globals, args),
        Commands::Compose(args) => commands::compose::execute(&globals, args),
        Commands::Enable(args) => commands::action::execute(&globals, "enable", args),
        Commands::Disable(args) => commands::action::execute(&globals, "disable", args),
        Commands::Up(args) => commands::action::execute(&globals, "up", args),
        Commands::Down(args) => commands::action::execute(&globals, "down", args),
        Commands::Meta(args) => commands::meta::execute(&globals, args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
