use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::Args;
use hg_graph::session::{self, Operation};
use hg_graph::{canonical_hash, HypergraphStore, StoreConfig};
use tracing::info;

use super::{write_output, write_snapshot};

#[derive(Args, Debug)]
pub struct ReplayArgs {
    /// YAML list of operations to apply in order.
    #[arg(long)]
    pub script: PathBuf,
    /// Optional YAML store configuration.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Snapshot output path (`.bin` for the binary encoding).
    #[arg(long)]
    pub out: PathBuf,
    /// Optional JSON report with the outcome of every step.
    #[arg(long)]
    pub report: Option<PathBuf>,
    /// Exit with an error when any operation is rejected.
    #[arg(long)]
    pub deny_rejections: bool,
}

pub fn run(args: &ReplayArgs) -> Result<(), Box<dyn Error>> {
    let config = match &args.config {
        Some(path) => serde_yaml::from_str::<StoreConfig>(&fs::read_to_string(path)?)?,
        None => StoreConfig::default(),
    };
    let operations: Vec<Operation> = serde_yaml::from_str(&fs::read_to_string(&args.script)?)?;
    info!(operations = operations.len(), script = %args.script.display(), "loaded script");

    let mut store = HypergraphStore::new(config);
    let report = session::replay(&mut store, &operations);

    write_snapshot(&args.out, &store)?;
    if let Some(path) = &args.report {
        write_output(path, serde_json::to_string_pretty(&report)?)?;
    }
    println!(
        "applied={} rejected={} nodes={} edges={} hash={}",
        report.applied,
        report.rejected,
        store.node_count(),
        store.edge_count(),
        canonical_hash(&store)
    );

    if args.deny_rejections && report.rejected > 0 {
        return Err(format!("{} operation(s) rejected", report.rejected).into());
    }
    Ok(())
}
