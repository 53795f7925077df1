use std::collections::{BTreeMap, BTreeSet};

use hg_core::errors::{ErrorInfo, GraphError};
use hg_core::{EdgeId, End, Hypergraph, ItemId, ItemKind, Metadata, NodeId};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Self-contained copy of part of a store, keyed by the identifiers it was
/// copied from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fragment {
    /// Copied nodes in identifier order.
    pub nodes: Vec<FragmentNode>,
    /// Copied edges in identifier order.
    pub edges: Vec<FragmentEdge>,
}

/// A node captured by [`copy_fragment`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FragmentNode {
    /// Identifier in the source store.
    pub id: NodeId,
    /// Metadata at copy time.
    pub metadata: Metadata,
}

/// An edge captured by [`copy_fragment`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FragmentEdge {
    /// Identifier in the source store.
    pub id: EdgeId,
    /// Metadata at copy time.
    pub metadata: Metadata,
    /// Start attachments, in source order.
    pub starts: Vec<NodeId>,
    /// End attachments, in source order.
    pub ends: Vec<NodeId>,
}

impl Fragment {
    /// Returns whether nothing was copied.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }
}

/// Identifier translation produced by [`paste_fragment`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PasteMap {
    /// Source node identifier to pasted node identifier.
    pub nodes: BTreeMap<NodeId, NodeId>,
    /// Source edge identifier to pasted edge identifier.
    pub edges: BTreeMap<EdgeId, EdgeId>,
}

/// Copies the selected items out of `graph`.
///
/// A selected edge drags every node it is attached to into the fragment, so the
/// fragment can always be pasted on its own.
pub fn copy_fragment<G>(graph: &G, selection: &[ItemId]) -> Result<Fragment, GraphError>
where
    G: Hypergraph + ?Sized,
{
    let mut nodes = BTreeSet::new();
    let mut edges = BTreeSet::new();
    for item in selection {
        match graph.resolve(*item) {
            Some(ItemKind::Node(node)) => {
                nodes.insert(node);
            }
            Some(ItemKind::Edge(edge)) => {
                edges.insert(edge);
            }
            None => {
                return Err(GraphError::NotFound(ErrorInfo::new(
                    "unknown-item",
                    "selection names neither a node nor an edge",
                ))
                .with_context("item", item))
            }
        }
    }

    let mut fragment_edges = Vec::with_capacity(edges.len());
    for edge in edges {
        let endpoints = graph.endpoints(edge)?;
        nodes.extend(endpoints.starts.iter().copied());
        nodes.extend(endpoints.ends.iter().copied());
        fragment_edges.push(FragmentEdge {
            id: edge,
            metadata: graph.metadata(edge.into())?.clone(),
            starts: endpoints.starts.into_vec(),
            ends: endpoints.ends.into_vec(),
        });
    }
    let fragment_nodes = nodes
        .into_iter()
        .map(|node| {
            Ok(FragmentNode {
                id: node,
                metadata: graph.metadata(node.into())?.clone(),
            })
        })
        .collect::<Result<Vec<_>, GraphError>>()?;

    Ok(Fragment {
        nodes: fragment_nodes,
        edges: fragment_edges,
    })
}

/// Re-creates a fragment inside `graph` under fresh identifiers.
///
/// Only the public creation operations are used, so the target store applies
/// its own naming and self-loop policy. The fragment is checked before anything
/// is created; a fragment whose edges reference nodes it does not carry is
/// rejected with `DanglingReference`, and one holding a self-loop is rejected
/// with `InvalidConnection` when the target does not allow self-loops. Either
/// way the target is left untouched.
pub fn paste_fragment<G>(graph: &mut G, fragment: &Fragment) -> Result<PasteMap, GraphError>
where
    G: Hypergraph + ?Sized,
{
    let carried: BTreeSet<NodeId> = fragment.nodes.iter().map(|node| node.id).collect();
    for edge in &fragment.edges {
        if edge.starts.is_empty() || edge.ends.is_empty() {
            return Err(GraphError::InvalidArgument(ErrorInfo::new(
                "empty-end",
                "fragment edge needs at least one start and one end",
            ))
            .with_context("edge", edge.id));
        }
        if let Some(missing) = edge
            .starts
            .iter()
            .chain(edge.ends.iter())
            .find(|node| !carried.contains(node))
        {
            return Err(GraphError::DanglingReference(ErrorInfo::new(
                "fragment-dangling",
                "fragment edge references a node the fragment does not carry",
            ))
            .with_context("edge", edge.id)
            .with_context("node", missing));
        }
        if !graph.allows_self_loops() {
            if let Some(looped) = edge.starts.iter().find(|node| edge.ends.contains(*node)) {
                return Err(GraphError::InvalidConnection(ErrorInfo::new(
                    "self-loop",
                    "fragment edge starts and ends on the same node",
                ))
                .with_context("edge", edge.id)
                .with_context("node", looped)
                .with_hint("set `self_loops: allow` in the target store config to paste it"));
            }
        }
    }

    let mut map = PasteMap::default();
    for node in &fragment.nodes {
        let pasted = graph.create_node(Some(node.metadata.clone()));
        map.nodes.insert(node.id, pasted);
    }
    for edge in &fragment.edges {
        let start = map.nodes[&edge.starts[0]];
        let end = map.nodes[&edge.ends[0]];
        let pasted = graph.create_edge(start.into(), end.into(), Some(edge.metadata.clone()))?;
        for node in &edge.starts[1..] {
            graph.extend_edge(pasted, End::Start, map.nodes[node], None)?;
        }
        for node in &edge.ends[1..] {
            graph.extend_edge(pasted, End::End, map.nodes[node], None)?;
        }
        map.edges.insert(edge.id, pasted);
    }
    debug!(
        nodes = map.nodes.len(),
        edges = map.edges.len(),
        "pasted fragment"
    );
    Ok(map)
}
