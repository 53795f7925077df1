use hg_core::errors::{ErrorInfo, GraphError};
use hg_core::{EdgeId, Metadata, NodeId, SchemaVersion};
use serde::{Deserialize, Serialize};

use crate::flags::StoreConfig;
use crate::ids::IdAllocator;
use crate::invariants::check_invariants;
use crate::store::{Edge, HypergraphStore, Node};

/// Newest snapshot schema this build reads and writes.
pub const SNAPSHOT_SCHEMA: SchemaVersion = SchemaVersion::new(1, 0, 0);

/// Serializes the store to a compact binary snapshot using `bincode`.
pub fn store_to_bytes(store: &HypergraphStore) -> Result<Vec<u8>, GraphError> {
    let serializable = SerializableStore::from_store(store);
    bincode::serialize(&serializable)
        .map_err(|err| GraphError::Serde(ErrorInfo::new("serialize-bytes", err.to_string())))
}

/// Restores a store from its binary snapshot.
pub fn store_from_bytes(bytes: &[u8]) -> Result<HypergraphStore, GraphError> {
    let serializable: SerializableStore = bincode::deserialize(bytes)
        .map_err(|err| GraphError::Serde(ErrorInfo::new("deserialize-bytes", err.to_string())))?;
    serializable.into_store()
}

/// Serializes the store to a JSON snapshot.
pub fn store_to_json(store: &HypergraphStore) -> Result<String, GraphError> {
    let serializable = SerializableStore::from_store(store);
    serde_json::to_string_pretty(&serializable)
        .map_err(|err| GraphError::Serde(ErrorInfo::new("serialize-json", err.to_string())))
}

/// Restores a store from a JSON snapshot.
pub fn store_from_json(json: &str) -> Result<HypergraphStore, GraphError> {
    let serializable: SerializableStore = serde_json::from_str(json)
        .map_err(|err| GraphError::Serde(ErrorInfo::new("deserialize-json", err.to_string())))?;
    serializable.into_store()
}

#[derive(Debug, Serialize, Deserialize)]
struct SerializableStore {
    config: StoreConfig,
    next_id: u64,
    nodes: Vec<SerializableNode>,
    edges: Vec<SerializableEdge>,
}

#[derive(Debug, Serialize, Deserialize)]
struct SerializableNode {
    id: u64,
    metadata: Metadata,
    starts_edges: Vec<u64>,
    ends_edges: Vec<u64>,
}

#[derive(Debug, Serialize, Deserialize)]
struct SerializableEdge {
    id: u64,
    metadata: Metadata,
    start_nodes: Vec<u64>,
    end_nodes: Vec<u64>,
}

impl SerializableStore {
    fn from_store(store: &HypergraphStore) -> Self {
        let nodes = store
            .iter_nodes()
            .map(|node| SerializableNode {
                id: node.id().as_raw(),
                metadata: node.metadata().clone(),
                starts_edges: node.starts_edges().iter().map(|id| id.as_raw()).collect(),
                ends_edges: node.ends_edges().iter().map(|id| id.as_raw()).collect(),
            })
            .collect();
        let edges = store
            .iter_edges()
            .map(|edge| SerializableEdge {
                id: edge.id().as_raw(),
                metadata: edge.metadata().clone(),
                start_nodes: edge.start_nodes().iter().map(|id| id.as_raw()).collect(),
                end_nodes: edge.end_nodes().iter().map(|id| id.as_raw()).collect(),
            })
            .collect();
        Self {
            config: store.config().clone(),
            next_id: store.next_id(),
            nodes,
            edges,
        }
    }

    fn into_store(self) -> Result<HypergraphStore, GraphError> {
        let written = self.config.schema_version;
        if !SNAPSHOT_SCHEMA.reads(&written) {
            return Err(GraphError::Serde(ErrorInfo::new(
                "unsupported-schema",
                "snapshot schema is newer than this build understands",
            ))
            .with_context("snapshot", written)
            .with_context("supported", SNAPSHOT_SCHEMA));
        }
        if self.next_id == u64::MAX {
            return Err(GraphError::Serde(ErrorInfo::new(
                "invalid-snapshot",
                "identifier counter is exhausted",
            ))
            .with_context("next_id", self.next_id));
        }
        let node_count = self.nodes.len();
        let edge_count = self.edges.len();
        let nodes: Vec<Node> = self
            .nodes
            .into_iter()
            .map(|node| {
                Node::from_parts(
                    NodeId::from_raw(node.id),
                    node.metadata,
                    node.starts_edges.into_iter().map(EdgeId::from_raw).collect(),
                    node.ends_edges.into_iter().map(EdgeId::from_raw).collect(),
                )
            })
            .collect();
        let edges: Vec<Edge> = self
            .edges
            .into_iter()
            .map(|edge| {
                Edge::from_parts(
                    EdgeId::from_raw(edge.id),
                    edge.metadata,
                    edge.start_nodes.into_iter().map(NodeId::from_raw).collect(),
                    edge.end_nodes.into_iter().map(NodeId::from_raw).collect(),
                )
            })
            .collect();
        let store = HypergraphStore::from_parts(
            self.config,
            IdAllocator::resume_from(self.next_id),
            nodes,
            edges,
        );
        if store.node_count() != node_count || store.edge_count() != edge_count {
            return Err(GraphError::Serde(ErrorInfo::new(
                "duplicate-id",
                "snapshot lists an identifier more than once",
            )));
        }
        let violations = check_invariants(&store);
        if let Some(first) = violations.first() {
            return Err(GraphError::Serde(
                ErrorInfo::new("invalid-snapshot", first.to_string())
                    .with_context("violations", violations.len().to_string()),
            ));
        }
        Ok(store)
    }
}
