//! Scripted store operations and their replay.

use hg_core::errors::GraphError;
use hg_core::{EdgeId, End, ItemId, Metadata, NodeId};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::store::HypergraphStore;

/// One scripted store operation, addressed by raw identifiers.
///
/// Scripts are plain YAML or JSON lists of these, tagged by `op`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "kebab-case")]
pub enum Operation {
    /// Create a node.
    CreateNode {
        /// Optional display name.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        /// Extra metadata entries.
        #[serde(default, skip_serializing_if = "Metadata::is_empty")]
        metadata: Metadata,
    },
    /// Connect two items (nodes, or a node and an edge to grow).
    CreateEdge {
        /// Start item.
        start: u64,
        /// End item.
        end: u64,
        /// Optional display name.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        /// Extra metadata entries.
        #[serde(default, skip_serializing_if = "Metadata::is_empty")]
        metadata: Metadata,
    },
    /// Attach another node to one end of an edge.
    ExtendEdge {
        /// Edge to grow.
        edge: u64,
        /// End receiving the node.
        end: End,
        /// Node to attach.
        node: u64,
    },
    /// Delete a node and cascade to edges it alone terminates.
    DeleteNode {
        /// Node to delete.
        node: u64,
    },
    /// Delete an edge.
    DeleteEdge {
        /// Edge to delete.
        edge: u64,
    },
    /// Move one end of an edge to another node.
    UpdateEdge {
        /// Edge to relink.
        edge: u64,
        /// Currently attached node.
        old: u64,
        /// End being moved.
        end: End,
        /// Node to attach instead.
        new: u64,
    },
    /// Rename a node or an edge.
    Rename {
        /// Item to rename.
        item: u64,
        /// New display name.
        name: String,
    },
}

impl Operation {
    /// Short kebab-case label used in reports and logs.
    pub fn label(&self) -> &'static str {
        match self {
            Operation::CreateNode { .. } => "create-node",
            Operation::CreateEdge { .. } => "create-edge",
            Operation::ExtendEdge { .. } => "extend-edge",
            Operation::DeleteNode { .. } => "delete-node",
            Operation::DeleteEdge { .. } => "delete-edge",
            Operation::UpdateEdge { .. } => "update-edge",
            Operation::Rename { .. } => "rename",
        }
    }
}

/// Applies one operation, returning the item it created or grew, if any.
pub fn apply_operation(
    store: &mut HypergraphStore,
    operation: &Operation,
) -> Result<Option<ItemId>, GraphError> {
    match operation {
        Operation::CreateNode { name, metadata } => {
            let id = store.create_node(merged_metadata(name, metadata));
            Ok(Some(id.into()))
        }
        Operation::CreateEdge {
            start,
            end,
            name,
            metadata,
        } => {
            let id = store.create_edge(
                ItemId::from_raw(*start),
                ItemId::from_raw(*end),
                merged_metadata(name, metadata),
            )?;
            Ok(Some(id.into()))
        }
        Operation::ExtendEdge { edge, end, node } => {
            let id = store.extend_edge(
                EdgeId::from_raw(*edge),
                *end,
                NodeId::from_raw(*node),
                None,
            )?;
            Ok(Some(id.into()))
        }
        Operation::DeleteNode { node } => {
            store.delete_node(NodeId::from_raw(*node))?;
            Ok(None)
        }
        Operation::DeleteEdge { edge } => {
            store.delete_edge(EdgeId::from_raw(*edge))?;
            Ok(None)
        }
        Operation::UpdateEdge {
            edge,
            old,
            end,
            new,
        } => {
            store.update_edge(
                EdgeId::from_raw(*edge),
                NodeId::from_raw(*old),
                *end,
                NodeId::from_raw(*new),
            )?;
            Ok(Some(ItemId::from_raw(*edge)))
        }
        Operation::Rename { item, name } => {
            store.set_name(ItemId::from_raw(*item), name.clone())?;
            Ok(Some(ItemId::from_raw(*item)))
        }
    }
}

fn merged_metadata(name: &Option<String>, metadata: &Metadata) -> Option<Metadata> {
    if name.is_none() && metadata.is_empty() {
        return None;
    }
    let mut merged = metadata.clone();
    if let Some(name) = name {
        merged.set_name(name.clone());
    }
    Some(merged)
}

/// Outcome of one step of [`replay`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepReport {
    /// Position of the operation in the script.
    pub index: usize,
    /// Operation label.
    pub operation: &'static str,
    /// Item created, grown or modified by the step.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<u64>,
    /// Rejection returned by the store, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<GraphError>,
}

/// Summary of a replayed script.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReplayReport {
    /// Number of operations the store accepted.
    pub applied: usize,
    /// Number of operations the store rejected.
    pub rejected: usize,
    /// Per-operation outcomes in script order.
    pub steps: Vec<StepReport>,
}

/// Applies every operation in order.
///
/// Rejected operations leave the store unchanged and do not stop the replay.
pub fn replay(store: &mut HypergraphStore, operations: &[Operation]) -> ReplayReport {
    let mut report = ReplayReport::default();
    for (index, operation) in operations.iter().enumerate() {
        let step = match apply_operation(store, operation) {
            Ok(item) => {
                report.applied += 1;
                StepReport {
                    index,
                    operation: operation.label(),
                    item: item.map(|id| id.as_raw()),
                    error: None,
                }
            }
            Err(err) => {
                report.rejected += 1;
                StepReport {
                    index,
                    operation: operation.label(),
                    item: None,
                    error: Some(err),
                }
            }
        };
        report.steps.push(step);
    }
    info!(
        applied = report.applied,
        rejected = report.rejected,
        nodes = store.node_count(),
        edges = store.edge_count(),
        "replayed script"
    );
    report
}
