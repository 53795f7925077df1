use hg_core::errors::{ErrorInfo, GraphError};
use hg_core::{
    EdgeEndpoints, EdgeId, End, Hypergraph, ItemId, ItemKind, Metadata, NodeId, NodeIncidence,
};

#[derive(Default)]
struct DummyGraph {
    metadata: Metadata,
}

impl Hypergraph for DummyGraph {
    fn nodes(&self) -> Box<dyn ExactSizeIterator<Item = NodeId> + '_> {
        Box::new(vec![NodeId::from_raw(0), NodeId::from_raw(1)].into_iter())
    }

    fn edges(&self) -> Box<dyn ExactSizeIterator<Item = EdgeId> + '_> {
        Box::new(vec![EdgeId::from_raw(2)].into_iter())
    }

    fn resolve(&self, item: ItemId) -> Option<ItemKind> {
        match item.as_raw() {
            0 | 1 => Some(ItemKind::Node(NodeId::from_raw(item.as_raw()))),
            2 => Some(ItemKind::Edge(EdgeId::from_raw(2))),
            _ => None,
        }
    }

    fn endpoints(&self, _edge: EdgeId) -> Result<EdgeEndpoints, GraphError> {
        Ok(EdgeEndpoints {
            starts: vec![NodeId::from_raw(0)].into_boxed_slice(),
            ends: vec![NodeId::from_raw(1)].into_boxed_slice(),
        })
    }

    fn incidence(&self, _node: NodeId) -> Result<NodeIncidence, GraphError> {
        Ok(NodeIncidence {
            starts: vec![EdgeId::from_raw(2)].into_boxed_slice(),
            ends: Vec::new().into_boxed_slice(),
        })
    }

    fn metadata(&self, _item: ItemId) -> Result<&Metadata, GraphError> {
        Ok(&self.metadata)
    }

    fn metadata_mut(&mut self, _item: ItemId) -> Result<&mut Metadata, GraphError> {
        Ok(&mut self.metadata)
    }

    fn create_node(&mut self, _metadata: Option<Metadata>) -> NodeId {
        NodeId::from_raw(3)
    }

    fn create_edge(
        &mut self,
        _start: ItemId,
        _end: ItemId,
        _metadata: Option<Metadata>,
    ) -> Result<EdgeId, GraphError> {
        Ok(EdgeId::from_raw(4))
    }

    fn extend_edge(
        &mut self,
        edge: EdgeId,
        _end: End,
        _node: NodeId,
        _metadata: Option<Metadata>,
    ) -> Result<EdgeId, GraphError> {
        Ok(edge)
    }

    fn delete_node(&mut self, _node: NodeId) -> Result<(), GraphError> {
        Ok(())
    }

    fn delete_edge(&mut self, edge: EdgeId) -> Result<(), GraphError> {
        Err(GraphError::NotFound(
            ErrorInfo::new("unknown-edge", "edge does not exist").with_context("edge", "x"),
        )
        .with_context("edge", edge))
    }

    fn update_edge(
        &mut self,
        _edge: EdgeId,
        _old: NodeId,
        _end: End,
        _new: NodeId,
    ) -> Result<(), GraphError> {
        Ok(())
    }
}

fn accepts_trait_object(graph: &mut dyn Hypergraph) -> usize {
    let node = graph.create_node(Some(Metadata::named("extra")));
    let _ = graph.create_edge(node.into(), ItemId::from_raw(1), None);
    graph.nodes().len() + graph.edges().len()
}

#[test]
fn trait_is_object_safe() {
    let mut graph: Box<dyn Hypergraph> = Box::new(DummyGraph::default());
    assert_eq!(accepts_trait_object(&mut *graph), 3);
    assert_eq!(
        graph.resolve(ItemId::from_raw(2)),
        Some(ItemKind::Edge(EdgeId::from_raw(2)))
    );
    assert_eq!(graph.resolve(ItemId::from_raw(9)), None);
}

#[test]
fn later_context_overwrites_earlier_entries() {
    let mut graph = DummyGraph::default();
    let err = graph.delete_edge(EdgeId::from_raw(5)).unwrap_err();
    assert_eq!(err.info().context.get("edge"), Some(&"5".to_string()));
}
