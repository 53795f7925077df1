use std::collections::BTreeMap;
use std::fmt;

use hg_core::errors::{ErrorInfo, GraphError};
use hg_core::{
    EdgeEndpoints, EdgeId, End, Hypergraph, ItemId, ItemKind, Metadata, NodeId, NodeIncidence,
};
use tracing::{debug, warn};

use crate::flags::StoreConfig;
use crate::ids::{remove_first, IdAllocator};

/// A graph vertex together with the edges attached to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    id: NodeId,
    metadata: Metadata,
    starts_edges: Vec<EdgeId>,
    ends_edges: Vec<EdgeId>,
}

impl Node {
    pub(crate) fn from_parts(
        id: NodeId,
        metadata: Metadata,
        starts_edges: Vec<EdgeId>,
        ends_edges: Vec<EdgeId>,
    ) -> Self {
        Self {
            id,
            metadata,
            starts_edges,
            ends_edges,
        }
    }

    /// Identifier of the node.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Metadata owned by the node.
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Display name of the node.
    pub fn name(&self) -> Option<&str> {
        self.metadata.name()
    }

    /// Edges for which this node is a start attachment.
    pub fn starts_edges(&self) -> &[EdgeId] {
        &self.starts_edges
    }

    /// Edges for which this node is an end attachment.
    pub fn ends_edges(&self) -> &[EdgeId] {
        &self.ends_edges
    }

    /// Edges attached to this node on the given end.
    pub fn edges_at(&self, end: End) -> &[EdgeId] {
        match end {
            End::Start => &self.starts_edges,
            End::End => &self.ends_edges,
        }
    }

    fn edges_at_mut(&mut self, end: End) -> &mut Vec<EdgeId> {
        match end {
            End::Start => &mut self.starts_edges,
            End::End => &mut self.ends_edges,
        }
    }
}

/// A directed connection, possibly grown into a hyperedge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    id: EdgeId,
    metadata: Metadata,
    start_nodes: Vec<NodeId>,
    end_nodes: Vec<NodeId>,
}

impl Edge {
    pub(crate) fn from_parts(
        id: EdgeId,
        metadata: Metadata,
        start_nodes: Vec<NodeId>,
        end_nodes: Vec<NodeId>,
    ) -> Self {
        Self {
            id,
            metadata,
            start_nodes,
            end_nodes,
        }
    }

    /// Identifier of the edge.
    pub fn id(&self) -> EdgeId {
        self.id
    }

    /// Metadata owned by the edge.
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Display name of the edge.
    pub fn name(&self) -> Option<&str> {
        self.metadata.name()
    }

    /// Start attachments in the order they were made.
    pub fn start_nodes(&self) -> &[NodeId] {
        &self.start_nodes
    }

    /// End attachments in the order they were made.
    pub fn end_nodes(&self) -> &[NodeId] {
        &self.end_nodes
    }

    /// Attachments on the given end.
    pub fn nodes_at(&self, end: End) -> &[NodeId] {
        match end {
            End::Start => &self.start_nodes,
            End::End => &self.end_nodes,
        }
    }

    /// Returns whether the edge has more than one start or more than one end.
    pub fn is_hyperedge(&self) -> bool {
        self.start_nodes.len() > 1 || self.end_nodes.len() > 1
    }

    fn nodes_at_mut(&mut self, end: End) -> &mut Vec<NodeId> {
        match end {
            End::Start => &mut self.start_nodes,
            End::End => &mut self.end_nodes,
        }
    }
}

/// Borrowed view of whatever a raw identifier names.
#[derive(Debug, Clone, Copy)]
pub enum Item<'a> {
    /// A stored node.
    Node(&'a Node),
    /// A stored edge.
    Edge(&'a Edge),
}

impl<'a> Item<'a> {
    /// Raw identifier of the item.
    pub fn id(&self) -> ItemId {
        match *self {
            Item::Node(node) => node.id.into(),
            Item::Edge(edge) => edge.id.into(),
        }
    }

    /// Metadata of the item.
    pub fn metadata(&self) -> &'a Metadata {
        match *self {
            Item::Node(node) => &node.metadata,
            Item::Edge(edge) => &edge.metadata,
        }
    }
}

/// Editor hypergraph store owning every node and edge.
///
/// Nodes and edges draw identifiers from one counter, so a raw [`ItemId`] names
/// at most one item and an edge identifier can stand in for an endpoint when
/// growing hyperedges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HypergraphStore {
    config: StoreConfig,
    ids: IdAllocator,
    nodes: BTreeMap<NodeId, Node>,
    edges: BTreeMap<EdgeId, Edge>,
}

impl HypergraphStore {
    /// Creates an empty store with the provided configuration.
    pub fn new(config: StoreConfig) -> Self {
        Self::with_allocator(config, IdAllocator::new())
    }

    /// Creates an empty store that issues identifiers from `ids`.
    pub fn with_allocator(config: StoreConfig, ids: IdAllocator) -> Self {
        Self {
            config,
            ids,
            nodes: BTreeMap::new(),
            edges: BTreeMap::new(),
        }
    }

    pub(crate) fn from_parts(
        config: StoreConfig,
        ids: IdAllocator,
        nodes: Vec<Node>,
        edges: Vec<Edge>,
    ) -> Self {
        Self {
            config,
            ids,
            nodes: nodes.into_iter().map(|node| (node.id, node)).collect(),
            edges: edges.into_iter().map(|edge| (edge.id, edge)).collect(),
        }
    }

    /// Returns the configuration used by this store.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Returns the identifier the next created item will receive.
    pub fn next_id(&self) -> u64 {
        self.ids.peek()
    }

    /// Number of stored nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of stored edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns whether the store holds no items.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    /// Looks up a node.
    pub fn node(&self, id: NodeId) -> Result<&Node, GraphError> {
        self.nodes.get(&id).ok_or_else(|| unknown_node(id))
    }

    /// Looks up an edge.
    pub fn edge(&self, id: EdgeId) -> Result<&Edge, GraphError> {
        self.edges.get(&id).ok_or_else(|| unknown_edge(id))
    }

    /// Looks up whichever item a raw identifier names.
    pub fn item(&self, id: ItemId) -> Option<Item<'_>> {
        match self.resolve(id)? {
            ItemKind::Node(node) => self.nodes.get(&node).map(Item::Node),
            ItemKind::Edge(edge) => self.edges.get(&edge).map(Item::Edge),
        }
    }

    /// Resolves a raw identifier to a node or an edge.
    pub fn resolve(&self, id: ItemId) -> Option<ItemKind> {
        let node = NodeId::from_raw(id.as_raw());
        if self.nodes.contains_key(&node) {
            return Some(ItemKind::Node(node));
        }
        let edge = EdgeId::from_raw(id.as_raw());
        if self.edges.contains_key(&edge) {
            return Some(ItemKind::Edge(edge));
        }
        None
    }

    /// Returns whether a raw identifier names a stored item.
    pub fn contains(&self, id: impl Into<ItemId>) -> bool {
        self.resolve(id.into()).is_some()
    }

    /// Iterates over node identifiers in ascending order.
    pub fn node_ids(&self) -> impl ExactSizeIterator<Item = NodeId> + '_ {
        self.nodes.keys().copied()
    }

    /// Iterates over edge identifiers in ascending order.
    pub fn edge_ids(&self) -> impl ExactSizeIterator<Item = EdgeId> + '_ {
        self.edges.keys().copied()
    }

    /// Iterates over nodes in identifier order.
    pub fn iter_nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Iterates over edges in identifier order.
    pub fn iter_edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.values()
    }

    /// Returns every edge touching a node: started edges first, then ended edges.
    pub fn edges_at_node(&self, id: NodeId) -> Result<Vec<EdgeId>, GraphError> {
        let node = self.node(id)?;
        let mut edges = node.starts_edges.clone();
        edges.extend(node.ends_edges.iter().copied());
        Ok(edges)
    }

    /// Returns the display name of a node or an edge.
    pub fn item_name(&self, id: impl Into<ItemId>) -> Option<&str> {
        self.item(id.into()).and_then(|item| item.metadata().name())
    }

    /// Mutable access to a node's metadata.
    pub fn node_metadata_mut(&mut self, id: NodeId) -> Result<&mut Metadata, GraphError> {
        self.nodes
            .get_mut(&id)
            .map(|node| &mut node.metadata)
            .ok_or_else(|| unknown_node(id))
    }

    /// Mutable access to an edge's metadata.
    pub fn edge_metadata_mut(&mut self, id: EdgeId) -> Result<&mut Metadata, GraphError> {
        self.edges
            .get_mut(&id)
            .map(|edge| &mut edge.metadata)
            .ok_or_else(|| unknown_edge(id))
    }

    /// Renames a node or an edge.
    pub fn set_name(
        &mut self,
        id: impl Into<ItemId>,
        name: impl Into<String>,
    ) -> Result<(), GraphError> {
        let id = id.into();
        self.item_metadata_mut(id)?.set_name(name);
        Ok(())
    }

    fn item_metadata_mut(&mut self, id: ItemId) -> Result<&mut Metadata, GraphError> {
        match self.resolve(id) {
            Some(ItemKind::Node(node)) => self.node_metadata_mut(node),
            Some(ItemKind::Edge(edge)) => self.edge_metadata_mut(edge),
            None => Err(unknown_item(id)),
        }
    }

    /// Creates a node with a fresh identifier.
    ///
    /// The node is named `<prefix><id>` unless the supplied metadata carries a name.
    pub fn create_node(&mut self, metadata: Option<Metadata>) -> NodeId {
        let id = self.ids.next_node();
        let mut merged = Metadata::named(format!("{}{}", self.config.node_name_prefix, id));
        if let Some(extra) = metadata {
            merged.merge(&extra);
        }
        self.nodes
            .insert(id, Node::from_parts(id, merged, Vec::new(), Vec::new()));
        debug!(node = %id, "created node");
        id
    }

    /// Connects `start` to `end`.
    ///
    /// Two nodes produce a new edge. When exactly one side names an edge, that
    /// edge gains the node on the other side as an extra attachment and its
    /// identifier is returned; no new edge is created. Edge to edge
    /// connections fail with `InvalidConnection`, unresolvable identifiers
    /// with `DanglingReference`.
    pub fn create_edge(
        &mut self,
        start: impl Into<ItemId>,
        end: impl Into<ItemId>,
        metadata: Option<Metadata>,
    ) -> Result<EdgeId, GraphError> {
        let (start, end) = (start.into(), end.into());
        let result = match (self.resolve(start), self.resolve(end)) {
            (Some(ItemKind::Node(from)), Some(ItemKind::Node(to))) => {
                self.connect(from, to, metadata)
            }
            (Some(ItemKind::Edge(edge)), Some(ItemKind::Node(node))) => {
                self.attach(edge, End::End, node, metadata)
            }
            (Some(ItemKind::Node(node)), Some(ItemKind::Edge(edge))) => {
                self.attach(edge, End::Start, node, metadata)
            }
            (Some(ItemKind::Edge(_)), Some(ItemKind::Edge(_))) => Err(GraphError::InvalidConnection(
                ErrorInfo::new(
                    "edge-to-edge",
                    "edge to edge connections require merging edges",
                ),
            )
            .with_context("start", start)
            .with_context("end", end)),
            (resolved_start, resolved_end) => {
                let unresolved = match (resolved_start, resolved_end) {
                    (None, None) => "start,end",
                    (None, _) => "start",
                    _ => "end",
                };
                Err(GraphError::DanglingReference(ErrorInfo::new(
                    "dangling-reference",
                    "edge endpoints do not resolve to stored items",
                ))
                .with_context("start", start)
                .with_context("end", end)
                .with_context("unresolved", unresolved))
            }
        };
        result.map_err(|err| rejected("create_edge", err))
    }

    /// Attaches `node` as an additional attachment on one end of `edge`.
    pub fn extend_edge(
        &mut self,
        edge: EdgeId,
        end: End,
        node: NodeId,
        metadata: Option<Metadata>,
    ) -> Result<EdgeId, GraphError> {
        self.attach(edge, end, node, metadata)
            .map_err(|err| rejected("extend_edge", err))
    }

    /// Deletes a node.
    ///
    /// Edges for which the node is the only start (or only end) are deleted
    /// with it; hyperedges with other attachments on that end only lose the
    /// node.
    pub fn delete_node(&mut self, id: NodeId) -> Result<(), GraphError> {
        let starts = match self.nodes.get(&id) {
            Some(node) => node.starts_edges.clone(),
            None => return Err(rejected("delete_node", unknown_node(id))),
        };
        let mut cascaded = Vec::new();
        for edge in starts {
            if self.release(edge, End::Start, id) {
                cascaded.push(edge);
            }
        }
        // Snapshot taken after the start pass: cascades may have pruned it.
        let ends = self
            .nodes
            .get(&id)
            .map(|node| node.ends_edges.clone())
            .unwrap_or_default();
        for edge in ends {
            if self.release(edge, End::End, id) {
                cascaded.push(edge);
            }
        }
        self.nodes.remove(&id);
        debug!(node = %id, cascaded = ?cascaded, "deleted node");
        Ok(())
    }

    /// Deletes an edge and removes it from every attached node.
    ///
    /// Other edges are never touched.
    pub fn delete_edge(&mut self, id: EdgeId) -> Result<(), GraphError> {
        if self.remove_edge_record(id).is_none() {
            return Err(rejected("delete_edge", unknown_edge(id)));
        }
        debug!(edge = %id, "deleted edge");
        Ok(())
    }

    /// Moves one end of `edge` from node `old` to node `new`.
    ///
    /// The edge keeps its identifier, metadata and every other attachment; the
    /// new attachment is appended after the remaining ones.
    pub fn update_edge(
        &mut self,
        edge: EdgeId,
        old: NodeId,
        end: End,
        new: NodeId,
    ) -> Result<(), GraphError> {
        self.check_relink(edge, old, end, new)
            .map_err(|err| rejected("update_edge", err))?;
        if let Some(record) = self.edges.get_mut(&edge) {
            let attachments = record.nodes_at_mut(end);
            remove_first(attachments, &old);
            attachments.push(new);
        }
        if let Some(record) = self.nodes.get_mut(&old) {
            remove_first(record.edges_at_mut(end), &edge);
        }
        if let Some(record) = self.nodes.get_mut(&new) {
            record.edges_at_mut(end).push(edge);
        }
        debug!(edge = %edge, end = %end, old = %old, new = %new, "relinked edge");
        Ok(())
    }

    /// Removes every item and rewinds the identifier counter.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
        self.ids = IdAllocator::new();
        debug!("cleared store");
    }

    fn connect(
        &mut self,
        from: NodeId,
        to: NodeId,
        metadata: Option<Metadata>,
    ) -> Result<EdgeId, GraphError> {
        if from == to && !self.config.self_loops.allows() {
            return Err(self_loop(from));
        }
        let id = self.ids.next_edge();
        let mut merged = Metadata::named(format!("{}{}", self.config.edge_name_prefix, id));
        if let Some(extra) = metadata {
            merged.merge(&extra);
        }
        if let Some(node) = self.nodes.get_mut(&from) {
            node.starts_edges.push(id);
        }
        if let Some(node) = self.nodes.get_mut(&to) {
            node.ends_edges.push(id);
        }
        self.edges
            .insert(id, Edge::from_parts(id, merged, vec![from], vec![to]));
        debug!(edge = %id, start = %from, end = %to, "created edge");
        Ok(id)
    }

    fn attach(
        &mut self,
        edge: EdgeId,
        end: End,
        node: NodeId,
        metadata: Option<Metadata>,
    ) -> Result<EdgeId, GraphError> {
        let record = self.edge(edge)?;
        self.node(node)?;
        if !self.config.self_loops.allows() && record.nodes_at(end.opposite()).contains(&node) {
            return Err(self_loop(node).with_context("edge", edge));
        }
        if let Some(record) = self.edges.get_mut(&edge) {
            record.nodes_at_mut(end).push(node);
            if let Some(extra) = metadata {
                record.metadata.merge(&extra);
            }
        }
        if let Some(record) = self.nodes.get_mut(&node) {
            record.edges_at_mut(end).push(edge);
        }
        debug!(edge = %edge, end = %end, node = %node, "extended edge");
        Ok(edge)
    }

    /// Drops `node` from one end of `edge`, deleting the edge when the node is
    /// its only attachment there. Returns whether the edge was deleted.
    fn release(&mut self, edge: EdgeId, end: End, node: NodeId) -> bool {
        let Some(record) = self.edges.get_mut(&edge) else {
            return false;
        };
        if record.nodes_at(end).len() == 1 {
            self.remove_edge_record(edge);
            true
        } else {
            remove_first(record.nodes_at_mut(end), &node);
            false
        }
    }

    fn remove_edge_record(&mut self, id: EdgeId) -> Option<Edge> {
        let edge = self.edges.remove(&id)?;
        for node in &edge.start_nodes {
            if let Some(record) = self.nodes.get_mut(node) {
                remove_first(&mut record.starts_edges, &id);
            }
        }
        for node in &edge.end_nodes {
            if let Some(record) = self.nodes.get_mut(node) {
                remove_first(&mut record.ends_edges, &id);
            }
        }
        Some(edge)
    }

    fn check_relink(
        &self,
        edge: EdgeId,
        old: NodeId,
        end: End,
        new: NodeId,
    ) -> Result<(), GraphError> {
        let record = self.edge(edge)?;
        self.node(old)?;
        self.node(new)?;
        if !record.nodes_at(end).contains(&old) {
            return Err(GraphError::NotFound(ErrorInfo::new(
                "not-attached",
                "node is not attached to this end of the edge",
            ))
            .with_context("edge", edge)
            .with_context("node", old)
            .with_context("end", end));
        }
        if !self.config.self_loops.allows() && record.nodes_at(end.opposite()).contains(&new) {
            return Err(self_loop(new).with_context("edge", edge));
        }
        Ok(())
    }
}

impl Default for HypergraphStore {
    fn default() -> Self {
        Self::new(StoreConfig::default())
    }
}

impl Hypergraph for HypergraphStore {
    fn nodes(&self) -> Box<dyn ExactSizeIterator<Item = NodeId> + '_> {
        Box::new(self.node_ids())
    }

    fn edges(&self) -> Box<dyn ExactSizeIterator<Item = EdgeId> + '_> {
        Box::new(self.edge_ids())
    }

    fn resolve(&self, item: ItemId) -> Option<ItemKind> {
        HypergraphStore::resolve(self, item)
    }

    fn endpoints(&self, edge: EdgeId) -> Result<EdgeEndpoints, GraphError> {
        let record = self.edge(edge)?;
        Ok(EdgeEndpoints {
            starts: record.start_nodes.clone().into_boxed_slice(),
            ends: record.end_nodes.clone().into_boxed_slice(),
        })
    }

    fn incidence(&self, node: NodeId) -> Result<NodeIncidence, GraphError> {
        let record = self.node(node)?;
        Ok(NodeIncidence {
            starts: record.starts_edges.clone().into_boxed_slice(),
            ends: record.ends_edges.clone().into_boxed_slice(),
        })
    }

    fn metadata(&self, item: ItemId) -> Result<&Metadata, GraphError> {
        self.item(item)
            .map(|item| item.metadata())
            .ok_or_else(|| unknown_item(item))
    }

    fn metadata_mut(&mut self, item: ItemId) -> Result<&mut Metadata, GraphError> {
        self.item_metadata_mut(item)
    }

    fn create_node(&mut self, metadata: Option<Metadata>) -> NodeId {
        HypergraphStore::create_node(self, metadata)
    }

    fn create_edge(
        &mut self,
        start: ItemId,
        end: ItemId,
        metadata: Option<Metadata>,
    ) -> Result<EdgeId, GraphError> {
        HypergraphStore::create_edge(self, start, end, metadata)
    }

    fn extend_edge(
        &mut self,
        edge: EdgeId,
        end: End,
        node: NodeId,
        metadata: Option<Metadata>,
    ) -> Result<EdgeId, GraphError> {
        HypergraphStore::extend_edge(self, edge, end, node, metadata)
    }

    fn delete_node(&mut self, node: NodeId) -> Result<(), GraphError> {
        HypergraphStore::delete_node(self, node)
    }

    fn delete_edge(&mut self, edge: EdgeId) -> Result<(), GraphError> {
        HypergraphStore::delete_edge(self, edge)
    }

    fn update_edge(
        &mut self,
        edge: EdgeId,
        old: NodeId,
        end: End,
        new: NodeId,
    ) -> Result<(), GraphError> {
        HypergraphStore::update_edge(self, edge, old, end, new)
    }

    fn allows_self_loops(&self) -> bool {
        self.config.self_loops.allows()
    }
}

impl fmt::Display for HypergraphStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "nodes:")?;
        for node in self.nodes.values() {
            writeln!(
                f,
                "  {} {} starts=[{}] ends=[{}]",
                node.id,
                node.metadata,
                join_ids(&node.starts_edges),
                join_ids(&node.ends_edges)
            )?;
        }
        writeln!(f, "edges:")?;
        for edge in self.edges.values() {
            writeln!(
                f,
                "  {} {} starts=[{}] ends=[{}]",
                edge.id,
                edge.metadata,
                join_ids(&edge.start_nodes),
                join_ids(&edge.end_nodes)
            )?;
        }
        Ok(())
    }
}

fn join_ids<T: fmt::Display>(ids: &[T]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn rejected(operation: &'static str, err: GraphError) -> GraphError {
    warn!(operation, code = err.code(), error = %err, "store operation rejected");
    err
}

fn unknown_node(id: NodeId) -> GraphError {
    GraphError::NotFound(ErrorInfo::new("unknown-node", "node does not exist"))
        .with_context("node", id)
}

fn unknown_edge(id: EdgeId) -> GraphError {
    GraphError::NotFound(ErrorInfo::new("unknown-edge", "edge does not exist"))
        .with_context("edge", id)
}

fn unknown_item(id: ItemId) -> GraphError {
    GraphError::NotFound(ErrorInfo::new(
        "unknown-item",
        "identifier names neither a node nor an edge",
    ))
    .with_context("item", id)
}

fn self_loop(node: NodeId) -> GraphError {
    GraphError::InvalidConnection(ErrorInfo::new(
        "self-loop",
        "edge would start and end on the same node",
    ))
    .with_context("node", node)
    .with_hint("set `self_loops: allow` in the store config to permit self-loops")
}
