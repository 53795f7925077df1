use hg_core::SchemaVersion;
use serde::{Deserialize, Serialize};

/// Configuration options that control the behaviour of [`HypergraphStore`](crate::HypergraphStore).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Whether an edge may start and end on the same node.
    #[serde(default)]
    pub self_loops: SelfLoopPolicy,
    /// Prefix of the default name given to nodes created without one.
    #[serde(default = "default_node_prefix")]
    pub node_name_prefix: String,
    /// Prefix of the default name given to edges created without one.
    #[serde(default = "default_edge_prefix")]
    pub edge_name_prefix: String,
    /// Schema version stored alongside serialized snapshots.
    #[serde(default = "default_schema_version")]
    pub schema_version: SchemaVersion,
}

fn default_node_prefix() -> String {
    "n".to_string()
}

fn default_edge_prefix() -> String {
    "e".to_string()
}

fn default_schema_version() -> SchemaVersion {
    SchemaVersion::new(1, 0, 0)
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            self_loops: SelfLoopPolicy::default(),
            node_name_prefix: default_node_prefix(),
            edge_name_prefix: default_edge_prefix(),
            schema_version: default_schema_version(),
        }
    }
}

impl StoreConfig {
    /// Returns a configuration that rejects self-loops.
    pub fn strict() -> Self {
        Self {
            self_loops: SelfLoopPolicy::Reject,
            ..Self::default()
        }
    }
}

/// Whether a node may appear on both ends of the same edge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SelfLoopPolicy {
    /// Self-loops are stored like any other connection.
    #[default]
    Allow,
    /// Operations that would produce a self-loop fail with `InvalidConnection`.
    Reject,
}

impl SelfLoopPolicy {
    /// Returns whether self-loops are accepted.
    pub fn allows(self) -> bool {
        matches!(self, SelfLoopPolicy::Allow)
    }
}
