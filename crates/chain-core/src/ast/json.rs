//! Helpers for exchanging expression trees as JSON.
//!
//! Tree producers and consumers that live outside the process hand trees over
//! in this format; it is the serde representation of [`Node`].

use crate::ast::Node;
use crate::Result;
use std::fs;
use std::io::Read;
use std::path::Path;

/// Load a `Node` from a JSON file on disk.
pub fn load_node_from_file(path: &Path) -> Result<Node> {
    let contents = fs::read_to_string(path)?;
    load_node_from_str(&contents)
}

/// Load a `Node` directly from a string slice containing JSON.
pub fn load_node_from_str(contents: &str) -> Result<Node> {
    Ok(serde_json::from_str(contents)?)
}

/// Load a `Node` from any reader producing JSON.
pub fn load_node_from_reader(mut reader: impl Read) -> Result<Node> {
    let mut buf = String::new();
    reader.read_to_string(&mut buf)?;
    load_node_from_str(&buf)
}

pub fn write_node_to_string(node: &Node) -> Result<String> {
    Ok(serde_json::to_string_pretty(node)?)
}

/// Persist a `Node` as JSON to the provided path.
pub fn write_node_to_file(path: &Path, node: &Node) -> Result<()> {
    fs::write(path, write_node_to_string(node)?)?;
    Ok(())
}
