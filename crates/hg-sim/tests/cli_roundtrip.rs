use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use hg_graph::{canonical_hash, store_from_json};
use tempfile::tempdir;

const SCRIPT: &str = r#"
- op: create-node
  name: source
- op: create-node
- op: create-node
- op: create-edge
  start: 0
  end: 1
  metadata:
    colour: red
- op: create-edge
  start: 3
  end: 2
- op: create-edge
  start: 3
  end: 3
- op: update-edge
  edge: 3
  old: 0
  end: start
  new: 2
"#;

fn hg_sim(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_hg-sim"))
        .args(args)
        .output()
        .expect("run hg-sim")
}

fn arg(path: &Path) -> &str {
    path.to_str().expect("utf-8 path")
}

#[test]
fn replay_then_check_and_show() {
    let dir = tempdir().expect("tmp dir");
    let script = dir.path().join("script.yaml");
    let snapshot = dir.path().join("out/store.json");
    let report = dir.path().join("out/report.json");
    fs::write(&script, SCRIPT).unwrap();

    let output = hg_sim(&[
        "replay",
        "--script",
        arg(&script),
        "--out",
        arg(&snapshot),
        "--report",
        arg(&report),
    ]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("applied=6 rejected=1"), "{stdout}");

    let store = store_from_json(&fs::read_to_string(&snapshot).unwrap()).unwrap();
    assert_eq!(store.edge_count(), 1);
    assert_eq!(store.item_name(hg_core::ItemId::from_raw(3)), Some("e3"));
    let report: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&report).unwrap()).unwrap();
    assert_eq!(report["steps"][5]["error"]["detail"]["code"], "edge-to-edge");

    let hash = canonical_hash(&store);
    let output = hg_sim(&["check", "--in", arg(&snapshot), "--expect-hash", &hash]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).starts_with("ok nodes=3 edges=1"));

    let output = hg_sim(&["show", "--in", arg(&snapshot), "--item", "3"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("starts: [2]"), "{stdout}");
    assert!(stdout.contains("ends: [1, 2]"), "{stdout}");
}

#[test]
fn strict_config_and_deny_rejections_fail() {
    let dir = tempdir().expect("tmp dir");
    let script = dir.path().join("script.yaml");
    let config = dir.path().join("config.yaml");
    let snapshot = dir.path().join("store.bin");
    fs::write(&script, "- op: create-node\n- op: create-edge\n  start: 0\n  end: 0\n").unwrap();
    fs::write(&config, "self_loops: reject\n").unwrap();

    let output = hg_sim(&[
        "replay",
        "--script",
        arg(&script),
        "--config",
        arg(&config),
        "--out",
        arg(&snapshot),
        "--deny-rejections",
    ]);
    assert!(!output.status.success());
    // the snapshot is still written before the rejection count is enforced
    let output = hg_sim(&["check", "--in", arg(&snapshot)]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("nodes=1 edges=0 next_id=1"));
}

#[test]
fn corrupted_snapshot_fails_check() {
    let dir = tempdir().expect("tmp dir");
    let snapshot = dir.path().join("store.json");
    fs::write(
        &snapshot,
        r#"{"config":{},"next_id":1,"nodes":[{"id":0,"metadata":{},"starts_edges":[4],"ends_edges":[]}],"edges":[]}"#,
    )
    .unwrap();

    let output = hg_sim(&["check", "--in", arg(&snapshot)]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("invalid-snapshot"));
}

#[test]
fn generated_script_replays() {
    let dir = tempdir().expect("tmp dir");
    let script = dir.path().join("random.yaml");
    let snapshot = dir.path().join("random.json");

    let output = hg_sim(&["generate", "--out", arg(&script), "--steps", "60", "--seed", "9"]);
    assert!(output.status.success());
    let output = hg_sim(&["replay", "--script", arg(&script), "--out", arg(&snapshot)]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let output = hg_sim(&["check", "--in", arg(&snapshot)]);
    assert!(output.status.success());
}
