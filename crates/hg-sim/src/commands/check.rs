use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use hg_graph::canonical_hash;

use super::load_snapshot;

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Snapshot to validate.
    #[arg(long = "in")]
    pub input: PathBuf,
    /// Fail unless the snapshot hashes to this value.
    #[arg(long)]
    pub expect_hash: Option<String>,
}

pub fn run(args: &CheckArgs) -> Result<(), Box<dyn Error>> {
    // loading already rejects snapshots that fail the invariant check
    let store = load_snapshot(&args.input)?;
    let hash = canonical_hash(&store);
    if let Some(expected) = &args.expect_hash {
        if !expected.eq_ignore_ascii_case(&hash) {
            return Err(format!("hash mismatch: expected {expected}, found {hash}").into());
        }
    }
    println!(
        "ok nodes={} edges={} next_id={} hash={}",
        store.node_count(),
        store.edge_count(),
        store.next_id(),
        hash
    );
    Ok(())
}
