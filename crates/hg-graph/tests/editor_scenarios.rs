use hg_core::{EdgeId, End, NodeId};
use hg_graph::{check_invariants, HypergraphStore};

fn n(raw: u64) -> NodeId {
    NodeId::from_raw(raw)
}

fn e(raw: u64) -> EdgeId {
    EdgeId::from_raw(raw)
}

#[test]
fn deleting_grown_edge_prunes_reverse_lists() {
    let mut store = HypergraphStore::default();
    let nodes: Vec<_> = (0..5).map(|_| store.create_node(None)).collect();
    assert_eq!(nodes, (0..5).map(n).collect::<Vec<_>>());

    assert_eq!(store.create_edge(n(0), n(1), None).unwrap(), e(5));
    assert_eq!(store.create_edge(n(1), n(2), None).unwrap(), e(6));
    assert_eq!(store.create_edge(n(2), n(3), None).unwrap(), e(7));

    // edge 5 gains node 2 as a second end, edge 6 gains node 0 as a second start
    assert_eq!(store.create_edge(e(5), n(2), None).unwrap(), e(5));
    assert_eq!(store.create_edge(n(0), e(6), None).unwrap(), e(6));
    assert_eq!(store.edge_count(), 3);
    assert_eq!(store.edge(e(5)).unwrap().end_nodes(), &[n(1), n(2)]);
    assert_eq!(store.edge(e(6)).unwrap().start_nodes(), &[n(1), n(0)]);
    assert!(store.edge(e(5)).unwrap().is_hyperedge());

    store.delete_edge(e(5)).unwrap();

    assert_eq!(store.node_ids().collect::<Vec<_>>(), (0..5).map(n).collect::<Vec<_>>());
    assert_eq!(store.edge_ids().collect::<Vec<_>>(), vec![e(6), e(7)]);
    assert_eq!(store.node(n(0)).unwrap().starts_edges(), &[e(6)]);
    assert_eq!(store.node(n(1)).unwrap().starts_edges(), &[e(6)]);
    assert!(store.node(n(1)).unwrap().ends_edges().is_empty());
    assert_eq!(store.node(n(2)).unwrap().ends_edges(), &[e(6)]);
    assert_eq!(store.node(n(2)).unwrap().starts_edges(), &[e(7)]);
    assert_eq!(store.node(n(3)).unwrap().ends_edges(), &[e(7)]);
    assert!(store.edges_at_node(n(4)).unwrap().is_empty());
    assert!(check_invariants(&store).is_empty());
}

#[test]
fn relinking_start_onto_end_node_makes_self_loop() {
    let mut store = HypergraphStore::default();
    store.create_node(None);
    store.create_node(None);
    assert_eq!(store.create_edge(n(0), n(1), None).unwrap(), e(2));

    store.update_edge(e(2), n(0), End::Start, n(1)).unwrap();

    let edge = store.edge(e(2)).unwrap();
    assert_eq!(edge.start_nodes(), &[n(1)]);
    assert_eq!(edge.end_nodes(), &[n(1)]);
    assert!(store.node(n(0)).unwrap().starts_edges().is_empty());
    assert_eq!(store.node(n(1)).unwrap().starts_edges(), &[e(2)]);
    assert_eq!(store.node(n(1)).unwrap().ends_edges(), &[e(2)]);
    assert_eq!(store.edges_at_node(n(1)).unwrap(), vec![e(2), e(2)]);
    assert!(check_invariants(&store).is_empty());
}

#[test]
fn deleting_shared_start_removes_fan_out() {
    let mut store = HypergraphStore::default();
    let nodes: Vec<_> = (0..6).map(|_| store.create_node(None)).collect();
    let edges: Vec<_> = nodes[1..]
        .iter()
        .map(|target| store.create_edge(nodes[0], *target, None).unwrap())
        .collect();
    assert_eq!(edges.len(), 5);
    assert_eq!(store.node(nodes[0]).unwrap().starts_edges(), edges.as_slice());

    store.delete_node(nodes[0]).unwrap();

    assert_eq!(store.edge_count(), 0);
    assert_eq!(store.node_count(), 5);
    for node in &nodes[1..] {
        assert!(store.edges_at_node(*node).unwrap().is_empty());
    }
    assert!(check_invariants(&store).is_empty());
}
