use hg_core::{EdgeId, End, NodeId};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::session::{apply_operation, Operation};
use crate::store::HypergraphStore;

/// Generates a random editing session of `steps` operations.
///
/// Operations are proposed against a scratch store so most of them are valid
/// at the point they run; a share deliberately names stale or unknown
/// identifiers and edge to edge connections to exercise rejection paths.
pub fn gen_random_session<R: Rng + ?Sized>(steps: usize, rng: &mut R) -> Vec<Operation> {
    let mut scratch = HypergraphStore::default();
    let mut operations = Vec::with_capacity(steps);
    for _ in 0..steps {
        let operation = propose(&scratch, rng);
        let _ = apply_operation(&mut scratch, &operation);
        operations.push(operation);
    }
    operations
}

/// Builds a store of `n_nodes` nodes with `n_edges` random node to node edges,
/// a fraction of which are grown into hyperedges.
pub fn gen_random_store<R: Rng + ?Sized>(
    n_nodes: usize,
    n_edges: usize,
    rng: &mut R,
) -> HypergraphStore {
    let mut store = HypergraphStore::default();
    let nodes: Vec<NodeId> = (0..n_nodes).map(|_| store.create_node(None)).collect();
    if nodes.is_empty() {
        return store;
    }
    for _ in 0..n_edges {
        let (Some(&start), Some(&end)) = (nodes.choose(rng), nodes.choose(rng)) else {
            break;
        };
        let Ok(edge) = store.create_edge(start, end, None) else {
            continue;
        };
        if rng.gen_bool(0.2) {
            let end_side = if rng.gen_bool(0.5) { End::Start } else { End::End };
            if let Some(&extra) = nodes.choose(rng) {
                let _ = store.extend_edge(edge, end_side, extra, None);
            }
        }
    }
    store
}

fn propose<R: Rng + ?Sized>(store: &HypergraphStore, rng: &mut R) -> Operation {
    let nodes: Vec<u64> = store.node_ids().map(|id| id.as_raw()).collect();
    let edges: Vec<u64> = store.edge_ids().map(|id| id.as_raw()).collect();
    let roll = rng.gen_range(0..100);

    if nodes.len() < 2 || roll < 25 {
        return Operation::CreateNode {
            name: None,
            metadata: Default::default(),
        };
    }
    if roll < 50 || edges.is_empty() {
        return Operation::CreateEdge {
            start: pick_item(&nodes, &edges, store.next_id(), rng),
            end: pick_item(&nodes, &edges, store.next_id(), rng),
            name: None,
            metadata: Default::default(),
        };
    }
    let edge = edges.choose(rng).copied().unwrap_or_default();
    let end = if rng.gen_bool(0.5) { End::Start } else { End::End };
    match roll {
        50..=59 => Operation::ExtendEdge {
            edge,
            end,
            node: nodes.choose(rng).copied().unwrap_or_default(),
        },
        60..=71 => {
            let attached: Vec<u64> = store
                .edge(EdgeId::from_raw(edge))
                .map(|record| record.nodes_at(end).iter().map(|id| id.as_raw()).collect())
                .unwrap_or_default();
            Operation::UpdateEdge {
                edge,
                old: attached
                    .choose(rng)
                    .copied()
                    .unwrap_or_else(|| rng.gen_range(0..store.next_id() + 2)),
                end,
                new: nodes.choose(rng).copied().unwrap_or_default(),
            }
        }
        72..=81 => Operation::DeleteEdge {
            edge: stale_or(edge, store.next_id(), rng),
        },
        82..=93 => Operation::DeleteNode {
            node: stale_or(
                nodes.choose(rng).copied().unwrap_or_default(),
                store.next_id(),
                rng,
            ),
        },
        _ => Operation::Rename {
            item: pick_item(&nodes, &edges, store.next_id(), rng),
            name: format!("r{}", rng.gen_range(0..1000)),
        },
    }
}

/// Mostly a node, sometimes an edge, occasionally an identifier that was never issued.
fn pick_item<R: Rng + ?Sized>(nodes: &[u64], edges: &[u64], next: u64, rng: &mut R) -> u64 {
    let roll = rng.gen_range(0..100);
    if roll < 75 || edges.is_empty() {
        nodes.choose(rng).copied().unwrap_or(next)
    } else if roll < 95 {
        edges.choose(rng).copied().unwrap_or(next)
    } else {
        next + rng.gen_range(0..3)
    }
}

fn stale_or<R: Rng + ?Sized>(id: u64, next: u64, rng: &mut R) -> u64 {
    if rng.gen_bool(0.1) {
        rng.gen_range(0..next + 1)
    } else {
        id
    }
}
