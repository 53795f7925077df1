use hg_core::End;
use hg_graph::session::{apply_operation, replay, Operation};
use hg_graph::{check_invariants, HypergraphStore};

#[test]
fn replay_reports_each_step() {
    let script = r#"[
        {"op": "create-node", "name": "a"},
        {"op": "create-node"},
        {"op": "create-edge", "start": 0, "end": 1},
        {"op": "create-edge", "start": 2, "end": 2},
        {"op": "extend-edge", "edge": 2, "end": "start", "node": 1},
        {"op": "update-edge", "edge": 2, "old": 0, "end": "start", "new": 1},
        {"op": "rename", "item": 2, "name": "wire"},
        {"op": "delete-node", "node": 9}
    ]"#;
    let operations: Vec<Operation> = serde_json::from_str(script).unwrap();
    let mut store = HypergraphStore::default();

    let report = replay(&mut store, &operations);

    assert_eq!(report.applied, 6);
    assert_eq!(report.rejected, 2);
    assert_eq!(report.steps[2].item, Some(2));
    assert_eq!(
        report.steps[3].error.as_ref().map(|err| err.code()),
        Some("edge-to-edge")
    );
    assert_eq!(report.steps[7].operation, "delete-node");
    assert_eq!(store.item_name(hg_core::ItemId::from_raw(2)), Some("wire"));
    assert_eq!(
        store.edge(hg_core::EdgeId::from_raw(2)).unwrap().start_nodes(),
        &[hg_core::NodeId::from_raw(1), hg_core::NodeId::from_raw(1)]
    );
    assert!(check_invariants(&store).is_empty());
}

#[test]
fn invalid_end_name_fails_to_parse() {
    let script = r#"{"op": "update-edge", "edge": 2, "old": 0, "end": "middle", "new": 1}"#;
    let err = serde_json::from_str::<Operation>(script).unwrap_err();
    assert!(err.to_string().contains("invalid-end"));
}

#[test]
fn apply_returns_grown_edge() {
    let mut store = HypergraphStore::default();
    for _ in 0..3 {
        apply_operation(&mut store, &Operation::CreateNode {
            name: None,
            metadata: Default::default(),
        })
        .unwrap();
    }
    let edge = apply_operation(
        &mut store,
        &Operation::CreateEdge {
            start: 0,
            end: 1,
            name: Some("link".to_string()),
            metadata: Default::default(),
        },
    )
    .unwrap();
    let grown = apply_operation(
        &mut store,
        &Operation::ExtendEdge {
            edge: 3,
            end: End::End,
            node: 2,
        },
    )
    .unwrap();
    assert_eq!(edge, grown);
    assert_eq!(store.item_name(hg_core::ItemId::from_raw(3)), Some("link"));
}
