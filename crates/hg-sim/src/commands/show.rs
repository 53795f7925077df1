use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use hg_core::ItemId;
use hg_graph::Item;

use super::load_snapshot;

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Snapshot to print.
    #[arg(long = "in")]
    pub input: PathBuf,
    /// Print a single node or edge instead of the whole store.
    #[arg(long)]
    pub item: Option<u64>,
}

pub fn run(args: &ShowArgs) -> Result<(), Box<dyn Error>> {
    let store = load_snapshot(&args.input)?;
    let Some(raw) = args.item else {
        print!("{store}");
        return Ok(());
    };
    match store.item(ItemId::from_raw(raw)) {
        Some(Item::Node(node)) => {
            println!("node {} {}", node.id(), node.metadata());
            println!("  starts: {:?}", raw_ids(node.starts_edges()));
            println!("  ends: {:?}", raw_ids(node.ends_edges()));
        }
        Some(Item::Edge(edge)) => {
            println!("edge {} {}", edge.id(), edge.metadata());
            println!("  starts: {:?}", raw_ids(edge.start_nodes()));
            println!("  ends: {:?}", raw_ids(edge.end_nodes()));
        }
        None => return Err(format!("no node or edge with id {raw}").into()),
    }
    Ok(())
}

fn raw_ids<T: Copy + Into<ItemId>>(ids: &[T]) -> Vec<u64> {
    ids.iter().map(|id| Into::<ItemId>::into(*id).as_raw()).collect()
}
