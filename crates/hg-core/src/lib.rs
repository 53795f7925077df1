#![deny(missing_docs)]
#![doc = "Identifiers, structured errors and the store contract shared by the HG crates."]

use std::fmt;
use std::iter::ExactSizeIterator;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub mod errors;
pub mod metadata;
pub mod schema;

pub use errors::{ErrorInfo, GraphError};
pub use metadata::{Metadata, NAME_KEY};
pub use schema::SchemaVersion;

/// Raw identifier drawn from the counter shared by nodes and edges.
///
/// A value may name either kind of item; stores resolve it with
/// [`Hypergraph::resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(u64);

impl ItemId {
    /// Creates a new identifier from its raw integer representation.
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw integer representation of the identifier.
    pub fn as_raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier for a node within a [`Hypergraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(u64);

impl NodeId {
    /// Creates a new identifier from its raw integer representation.
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw integer representation of the identifier.
    pub fn as_raw(&self) -> u64 {
        self.0
    }
}

/// Identifier for an edge within a [`Hypergraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EdgeId(u64);

impl EdgeId {
    /// Creates a new identifier from its raw integer representation.
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw integer representation of the identifier.
    pub fn as_raw(&self) -> u64 {
        self.0
    }
}

impl From<NodeId> for ItemId {
    fn from(id: NodeId) -> Self {
        ItemId(id.0)
    }
}

impl From<EdgeId> for ItemId {
    fn from(id: EdgeId) -> Self {
        ItemId(id.0)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What a raw [`ItemId`] resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    /// The identifier names a stored node.
    Node(NodeId),
    /// The identifier names a stored edge.
    Edge(EdgeId),
}

/// Which end of an edge an attachment belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum End {
    /// The edge leaves this attachment.
    Start,
    /// The edge arrives at this attachment.
    End,
}

impl End {
    /// Returns the other end.
    pub fn opposite(self) -> End {
        match self {
            End::Start => End::End,
            End::End => End::Start,
        }
    }

    /// Lower-case name used in scripts and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            End::Start => "start",
            End::End => "end",
        }
    }
}

impl fmt::Display for End {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for End {
    type Err = GraphError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "start" => Ok(End::Start),
            "end" => Ok(End::End),
            other => Err(GraphError::InvalidArgument(
                ErrorInfo::new("invalid-end", "edge end must be 'start' or 'end'")
                    .with_context("end", other),
            )),
        }
    }
}

impl Serialize for End {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl TryFrom<String> for End {
    type Error = GraphError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Attachments of an edge, returned by [`Hypergraph::endpoints`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeEndpoints {
    /// Nodes the edge starts from, in attachment order.
    pub starts: Box<[NodeId]>,
    /// Nodes the edge ends on, in attachment order.
    pub ends: Box<[NodeId]>,
}

impl EdgeEndpoints {
    /// Returns the attachments on one end.
    pub fn at(&self, end: End) -> &[NodeId] {
        match end {
            End::Start => &self.starts,
            End::End => &self.ends,
        }
    }
}

/// Edges touching a node, returned by [`Hypergraph::incidence`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeIncidence {
    /// Edges this node starts, in attachment order.
    pub starts: Box<[EdgeId]>,
    /// Edges this node ends, in attachment order.
    pub ends: Box<[EdgeId]>,
}

impl NodeIncidence {
    /// Returns the edges touching the node on one end.
    pub fn at(&self, end: End) -> &[EdgeId] {
        match end {
            End::Start => &self.starts,
            End::End => &self.ends,
        }
    }
}

/// Describes the structural contract of an editor hypergraph store.
///
/// Every mutator is atomic: it either applies completely or returns an error
/// and leaves the store untouched.
pub trait Hypergraph: Send + Sync {
    /// Returns an iterator over all node identifiers in ascending order.
    fn nodes(&self) -> Box<dyn ExactSizeIterator<Item = NodeId> + '_>;

    /// Returns an iterator over all edge identifiers in ascending order.
    fn edges(&self) -> Box<dyn ExactSizeIterator<Item = EdgeId> + '_>;

    /// Resolves a raw identifier to the kind of item it names.
    fn resolve(&self, item: ItemId) -> Option<ItemKind>;

    /// Returns the attachments of the specified edge.
    fn endpoints(&self, edge: EdgeId) -> Result<EdgeEndpoints, GraphError>;

    /// Returns the edges touching the specified node.
    fn incidence(&self, node: NodeId) -> Result<NodeIncidence, GraphError>;

    /// Returns the metadata of a node or an edge.
    fn metadata(&self, item: ItemId) -> Result<&Metadata, GraphError>;

    /// Returns mutable metadata of a node or an edge.
    fn metadata_mut(&mut self, item: ItemId) -> Result<&mut Metadata, GraphError>;

    /// Adds a node, merging the supplied metadata.
    fn create_node(&mut self, metadata: Option<Metadata>) -> NodeId;

    /// Connects two items; an edge on either side grows that edge instead.
    fn create_edge(
        &mut self,
        start: ItemId,
        end: ItemId,
        metadata: Option<Metadata>,
    ) -> Result<EdgeId, GraphError>;

    /// Attaches an additional node to one end of an existing edge.
    fn extend_edge(
        &mut self,
        edge: EdgeId,
        end: End,
        node: NodeId,
        metadata: Option<Metadata>,
    ) -> Result<EdgeId, GraphError>;

    /// Removes a node, deleting edges that lose their last start or end.
    fn delete_node(&mut self, node: NodeId) -> Result<(), GraphError>;

    /// Removes an edge and every reverse pointer to it.
    fn delete_edge(&mut self, edge: EdgeId) -> Result<(), GraphError>;

    /// Moves one end of an edge from `old` to `new`.
    fn update_edge(
        &mut self,
        edge: EdgeId,
        old: NodeId,
        end: End,
        new: NodeId,
    ) -> Result<(), GraphError>;

    /// Returns whether a node may appear on both ends of one edge.
    fn allows_self_loops(&self) -> bool {
        true
    }
}
