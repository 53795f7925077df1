use hg_core::Metadata;
use sha2::{Digest, Sha256};

use crate::flags::{SelfLoopPolicy, StoreConfig};
use crate::store::HypergraphStore;

/// Computes the canonical hash of the full store state.
///
/// Covers configuration, counter position, every node and edge, their metadata
/// and the order of every attachment list. Two stores hash equal exactly when
/// they would behave identically under any further operation.
pub fn canonical_hash(store: &HypergraphStore) -> String {
    let mut hasher = Sha256::new();
    encode_config(store.config(), &mut hasher);
    hasher.update(store.next_id().to_le_bytes());

    hasher.update((store.node_count() as u64).to_le_bytes());
    for node in store.iter_nodes() {
        hasher.update(node.id().as_raw().to_le_bytes());
        encode_metadata(node.metadata(), &mut hasher);
        update_ids(node.starts_edges().iter().map(|id| id.as_raw()), &mut hasher);
        update_ids(node.ends_edges().iter().map(|id| id.as_raw()), &mut hasher);
    }

    hasher.update((store.edge_count() as u64).to_le_bytes());
    for edge in store.iter_edges() {
        hasher.update(edge.id().as_raw().to_le_bytes());
        encode_metadata(edge.metadata(), &mut hasher);
        update_ids(edge.start_nodes().iter().map(|id| id.as_raw()), &mut hasher);
        update_ids(edge.end_nodes().iter().map(|id| id.as_raw()), &mut hasher);
    }

    format!("{:x}", hasher.finalize())
}

fn encode_config(config: &StoreConfig, hasher: &mut Sha256) {
    match config.self_loops {
        SelfLoopPolicy::Allow => hasher.update(b"self-loops:allow"),
        SelfLoopPolicy::Reject => hasher.update(b"self-loops:reject"),
    }
    update_str(&config.node_name_prefix, hasher);
    update_str(&config.edge_name_prefix, hasher);
    hasher.update(config.schema_version.major.to_le_bytes());
    hasher.update(config.schema_version.minor.to_le_bytes());
    hasher.update(config.schema_version.patch.to_le_bytes());
}

fn encode_metadata(metadata: &Metadata, hasher: &mut Sha256) {
    hasher.update((metadata.len() as u64).to_le_bytes());
    for (key, value) in metadata.iter() {
        update_str(key, hasher);
        update_str(value, hasher);
    }
}

fn update_str(value: &str, hasher: &mut Sha256) {
    hasher.update((value.len() as u64).to_le_bytes());
    hasher.update(value.as_bytes());
}

fn update_ids(values: impl ExactSizeIterator<Item = u64>, hasher: &mut Sha256) {
    hasher.update((values.len() as u64).to_le_bytes());
    for value in values {
        hasher.update(value.to_le_bytes());
    }
}
