use std::collections::BTreeMap;
use std::fmt;

use hg_core::{EdgeId, End, NodeId};
use serde::Serialize;

use crate::store::HypergraphStore;

/// A structural inconsistency found by [`check_invariants`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum InvariantViolation {
    /// An edge is attached to a node that is not stored.
    MissingNode {
        /// Edge holding the attachment.
        edge: EdgeId,
        /// Attached node identifier.
        node: NodeId,
        /// End the attachment belongs to.
        end: End,
    },
    /// A node lists an edge that is not stored.
    MissingEdge {
        /// Node holding the reverse pointer.
        node: NodeId,
        /// Listed edge identifier.
        edge: EdgeId,
        /// End the reverse pointer belongs to.
        end: End,
    },
    /// Edge attachments and node reverse pointers disagree.
    Asymmetric {
        /// Edge side of the link.
        edge: EdgeId,
        /// Node side of the link.
        node: NodeId,
        /// End being compared.
        end: End,
        /// Times the node appears in the edge's attachments.
        forward: usize,
        /// Times the edge appears in the node's reverse list.
        reverse: usize,
    },
    /// An edge has no attachment on one end.
    EmptyEnd {
        /// Offending edge.
        edge: EdgeId,
        /// End without attachments.
        end: End,
    },
    /// A node and an edge share one identifier.
    IdCollision {
        /// Shared raw identifier.
        id: u64,
    },
    /// An identifier was issued beyond the counter position.
    IdAheadOfCounter {
        /// Offending raw identifier.
        id: u64,
        /// Counter position.
        next: u64,
    },
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvariantViolation::MissingNode { edge, node, end } => {
                write!(f, "edge {edge} has unknown {end} node {node}")
            }
            InvariantViolation::MissingEdge { node, edge, end } => {
                write!(f, "node {node} lists unknown {end} edge {edge}")
            }
            InvariantViolation::Asymmetric {
                edge,
                node,
                end,
                forward,
                reverse,
            } => write!(
                f,
                "{end} link between edge {edge} and node {node} is asymmetric ({forward} vs {reverse})"
            ),
            InvariantViolation::EmptyEnd { edge, end } => {
                write!(f, "edge {edge} has no {end} attachment")
            }
            InvariantViolation::IdCollision { id } => {
                write!(f, "identifier {id} names both a node and an edge")
            }
            InvariantViolation::IdAheadOfCounter { id, next } => {
                write!(f, "identifier {id} is not below counter position {next}")
            }
        }
    }
}

/// Checks reverse-pointer symmetry and identifier hygiene.
///
/// Returns every violation found; an empty list means the store is consistent.
pub fn check_invariants(store: &HypergraphStore) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    let next = store.next_id();

    for node in store.node_ids() {
        if node.as_raw() >= next {
            violations.push(InvariantViolation::IdAheadOfCounter {
                id: node.as_raw(),
                next,
            });
        }
        if store.edge(EdgeId::from_raw(node.as_raw())).is_ok() {
            violations.push(InvariantViolation::IdCollision { id: node.as_raw() });
        }
    }

    // (edge, node, end) -> (forward count, reverse count)
    let mut links: BTreeMap<(EdgeId, NodeId, End), (usize, usize)> = BTreeMap::new();
    for edge in store.iter_edges() {
        if edge.id().as_raw() >= next {
            violations.push(InvariantViolation::IdAheadOfCounter {
                id: edge.id().as_raw(),
                next,
            });
        }
        for end in [End::Start, End::End] {
            if edge.nodes_at(end).is_empty() {
                violations.push(InvariantViolation::EmptyEnd {
                    edge: edge.id(),
                    end,
                });
            }
            for node in edge.nodes_at(end) {
                if store.node(*node).is_err() {
                    violations.push(InvariantViolation::MissingNode {
                        edge: edge.id(),
                        node: *node,
                        end,
                    });
                }
                links.entry((edge.id(), *node, end)).or_default().0 += 1;
            }
        }
    }
    for node in store.iter_nodes() {
        for end in [End::Start, End::End] {
            for edge in node.edges_at(end) {
                if store.edge(*edge).is_err() {
                    violations.push(InvariantViolation::MissingEdge {
                        node: node.id(),
                        edge: *edge,
                        end,
                    });
                    continue;
                }
                links.entry((*edge, node.id(), end)).or_default().1 += 1;
            }
        }
    }
    for ((edge, node, end), (forward, reverse)) in links {
        if forward != reverse && store.node(node).is_ok() {
            violations.push(InvariantViolation::Asymmetric {
                edge,
                node,
                end,
                forward,
                reverse,
            });
        }
    }
    violations
}
