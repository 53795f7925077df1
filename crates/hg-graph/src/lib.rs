#![deny(missing_docs)]
#![doc = include_str!("../docs/store-api.md")]

//! Editor hypergraph store implementing the `hg-core` contracts.

mod clipboard;
mod flags;
mod generators;
mod hash;
mod ids;
mod invariants;
mod serialization;
pub mod session;
mod store;

pub use clipboard::{copy_fragment, paste_fragment, Fragment, FragmentEdge, FragmentNode, PasteMap};
pub use flags::{SelfLoopPolicy, StoreConfig};
pub use generators::{gen_random_session, gen_random_store};
pub use hash::canonical_hash;
pub use ids::IdAllocator;
pub use invariants::{check_invariants, InvariantViolation};
pub use store::{Edge, HypergraphStore, Item, Node};

/// Re-export serialization helpers for downstream crates.
pub use serialization::{
    store_from_bytes, store_from_json, store_to_bytes, store_to_json, SNAPSHOT_SCHEMA,
};
