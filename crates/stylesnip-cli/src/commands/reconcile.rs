//! Reconcile command
//!
//! Usage: stylesnip reconcile [--source <ID>]

use super::{load_config, open_store, GlobalArgs};
use clap::Args;
use stylesnip_engine::{reconcile, reconcile_all, ReconcileReport};

#[derive(Debug, Args)]
pub struct ReconcileArgs {
    /// Source to reconcile (default: every configured source)
    #[arg(long)]
    pub source: Option<String>,
}

pub fn execute(globals: &GlobalArgs, args: ReconcileArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(globals)?;
    let sources = config.build_sources();
    let mut conn = open_store(&config)?;

    let reports = match &args.source {
        Some(source) => vec![reconcile(&mut conn, &sources, source)?],
        None => reconcile_all(&mut conn, &sources)?,
    };

    for report in &reports {
        print_report(report);
    }
    Ok(())
}

fn print_report(report: &ReconcileReport) {
    println!(
        "{}: {} added, {} missing",
        report.source,
        report.inserted.len(),
        report.orphaned.len()
    );
    for record in &report.inserted {
        println!("  + {} (id {}, position {})", record.path, record.id, record.sortorder);
    }
    for path in &report.orphaned {
        println!("  ? {} (file missing, record kept)", path);
    }
}
