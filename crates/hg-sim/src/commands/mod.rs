use std::error::Error;
use std::fs;
use std::path::Path;

use hg_graph::{store_from_bytes, store_from_json, store_to_bytes, store_to_json, HypergraphStore};

pub mod check;
pub mod generate;
pub mod replay;
pub mod show;

/// Snapshots ending in `.bin` use the binary encoding, anything else JSON.
fn is_binary(path: &Path) -> bool {
    path.extension().and_then(|ext| ext.to_str()) == Some("bin")
}

pub fn load_snapshot(path: &Path) -> Result<HypergraphStore, Box<dyn Error>> {
    let store = if is_binary(path) {
        store_from_bytes(&fs::read(path)?)?
    } else {
        store_from_json(&fs::read_to_string(path)?)?
    };
    Ok(store)
}

pub fn write_snapshot(path: &Path, store: &HypergraphStore) -> Result<(), Box<dyn Error>> {
    if is_binary(path) {
        write_output(path, store_to_bytes(store)?)
    } else {
        write_output(path, store_to_json(store)?)
    }
}

pub fn write_output(path: &Path, contents: impl AsRef<[u8]>) -> Result<(), Box<dyn Error>> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, contents)?;
    Ok(())
}
