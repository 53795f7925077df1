use hg_core::errors::GraphError;
use hg_core::{EdgeId, End, ItemId, NodeId};
use hg_graph::{canonical_hash, HypergraphStore, StoreConfig};

fn two_edges() -> (HypergraphStore, NodeId, NodeId, EdgeId, EdgeId) {
    let mut store = HypergraphStore::default();
    let a = store.create_node(None);
    let b = store.create_node(None);
    let first = store.create_edge(a, b, None).unwrap();
    let second = store.create_edge(b, a, None).unwrap();
    (store, a, b, first, second)
}

#[test]
fn edge_to_edge_is_rejected_without_mutation() {
    let (mut store, _, _, first, second) = two_edges();
    let before = canonical_hash(&store);

    let err = store.create_edge(first, second, None).unwrap_err();
    assert!(matches!(
        &err,
        GraphError::InvalidConnection(info) if info.code == "edge-to-edge"
    ));
    assert_eq!(err.info().context.get("start").map(String::as_str), Some("2"));
    assert!(matches!(
        store.create_edge(first, first, None),
        Err(GraphError::InvalidConnection(_))
    ));
    assert_eq!(canonical_hash(&store), before);
    assert_eq!(store.next_id(), 4);
}

#[test]
fn unresolved_endpoints_are_dangling() {
    let (mut store, a, _, _, _) = two_edges();
    let before = canonical_hash(&store);

    let err = store
        .create_edge(ItemId::from_raw(90), ItemId::from_raw(91), None)
        .unwrap_err();
    assert!(matches!(
        &err,
        GraphError::DanglingReference(info) if info.code == "dangling-reference"
    ));
    assert_eq!(
        err.info().context.get("unresolved").map(String::as_str),
        Some("start,end")
    );

    let err = store.create_edge(a, ItemId::from_raw(91), None).unwrap_err();
    assert_eq!(err.code(), "dangling-reference");
    assert_eq!(
        err.info().context.get("unresolved").map(String::as_str),
        Some("end")
    );
    assert_eq!(canonical_hash(&store), before);
}

#[test]
fn deleted_identifiers_do_not_resolve() {
    let (mut store, a, b, first, _) = two_edges();
    store.delete_edge(first).unwrap();
    let before = canonical_hash(&store);

    assert!(matches!(
        store.create_edge(first, b, None),
        Err(GraphError::DanglingReference(_))
    ));
    assert!(matches!(
        store.extend_edge(first, End::End, a, None),
        Err(GraphError::NotFound(info)) if info.code == "unknown-edge"
    ));
    assert_eq!(canonical_hash(&store), before);
}

#[test]
fn update_edge_rejects_unknown_and_unattached() {
    let (mut store, a, b, first, _) = two_edges();
    let c = store.create_node(None);
    let before = canonical_hash(&store);

    assert!(matches!(
        store.update_edge(EdgeId::from_raw(77), a, End::Start, c),
        Err(GraphError::NotFound(info)) if info.code == "unknown-edge"
    ));
    assert!(matches!(
        store.update_edge(first, NodeId::from_raw(77), End::Start, c),
        Err(GraphError::NotFound(info)) if info.code == "unknown-node"
    ));
    assert!(matches!(
        store.update_edge(first, a, End::Start, NodeId::from_raw(first.as_raw())),
        Err(GraphError::NotFound(info)) if info.code == "unknown-node"
    ));
    // b is the end of `first`, not a start
    assert!(matches!(
        store.update_edge(first, b, End::Start, c),
        Err(GraphError::NotFound(info)) if info.code == "not-attached"
    ));
    assert_eq!(canonical_hash(&store), before);
}

#[test]
fn end_names_parse_or_fail_with_invalid_argument() {
    assert_eq!("start".parse::<End>().unwrap(), End::Start);
    assert_eq!("end".parse::<End>().unwrap(), End::End);
    assert!(matches!(
        "middle".parse::<End>(),
        Err(GraphError::InvalidArgument(info)) if info.code == "invalid-end"
    ));
}

#[test]
fn strict_config_rejects_every_self_loop_path() {
    let mut store = HypergraphStore::new(StoreConfig::strict());
    let a = store.create_node(None);
    let b = store.create_node(None);
    let c = store.create_node(None);
    let edge = store.create_edge(a, b, None).unwrap();
    let before = canonical_hash(&store);

    let err = store.create_edge(a, a, None).unwrap_err();
    assert!(matches!(&err, GraphError::InvalidConnection(info) if info.code == "self-loop"));
    assert!(err.info().hint.is_some());

    assert!(matches!(
        store.update_edge(edge, a, End::Start, b),
        Err(GraphError::InvalidConnection(info)) if info.code == "self-loop"
    ));
    assert!(matches!(
        store.create_edge(edge, a, None),
        Err(GraphError::InvalidConnection(info)) if info.code == "self-loop"
    ));
    assert!(matches!(
        store.extend_edge(edge, End::Start, b, None),
        Err(GraphError::InvalidConnection(info)) if info.code == "self-loop"
    ));
    assert_eq!(canonical_hash(&store), before);

    store.update_edge(edge, a, End::Start, c).unwrap();
    assert_eq!(store.edge(edge).unwrap().start_nodes(), &[c]);
}
