//! Flat Views
//!
//! Aggregations over the traversal's node set: the path list, the key graph
//! grouping nodes by short id, and the enum value index.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};

use super::walker::NodeSet;

// =============================================================================
// Path List
// =============================================================================

/// One row of the path list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathRecord {
    /// Canonical path (`vegalite.encoding.color`)
    pub id: String,
    /// Raw traversal steps joined with `.`
    pub full_path: String,
    pub description: String,
}

pub fn path_list(nodes: &NodeSet<'_>) -> Vec<PathRecord> {
    nodes
        .iter()
        .map(|node| PathRecord {
            id: node.path_string(),
            full_path: node.full_path_string(),
            description: node.description(),
        })
        .collect()
}

// =============================================================================
// Key Graph
// =============================================================================

/// All canonical paths sharing one short id, and the keys directly above them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphRecord {
    pub key: String,
    pub paths: Vec<String>,
    pub parents: Vec<String>,
}

pub fn key_graph(nodes: &NodeSet<'_>) -> Vec<GraphRecord> {
    let mut groups: BTreeMap<String, (BTreeSet<String>, BTreeSet<String>)> = BTreeMap::new();

    for node in nodes {
        let (paths, parents) = groups.entry(node.id()).or_default();
        paths.insert(node.path_string());
        if let Some(parent) = node.parent_key() {
            parents.insert(parent.to_string());
        }
    }

    groups
        .into_iter()
        .map(|(key, (paths, parents))| GraphRecord {
            key,
            paths: paths.into_iter().collect(),
            parents: parents.into_iter().collect(),
        })
        .collect()
}

// =============================================================================
// Enum Index
// =============================================================================

/// Where an enum value may appear and with which declared types
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumRecord {
    pub value: String,
    pub types: Vec<String>,
    pub paths: Vec<String>,
}

fn declared_types(schema: &Value) -> Vec<&str> {
    match schema.get("type") {
        Some(Value::String(ty)) => vec![ty.as_str()],
        Some(Value::Array(types)) => types.iter().filter_map(Value::as_str).collect(),
        _ => Vec::new(),
    }
}

/// Index string enum values by the paths that accept them. Every fragment
/// the walk reached under a node's canonical path contributes, through any
/// raw path and any transparent hop (`$ref`, `anyOf`).
pub fn enum_index(nodes: &NodeSet<'_>) -> Vec<EnumRecord> {
    let mut index: BTreeMap<String, (BTreeSet<String>, BTreeSet<String>)> = BTreeMap::new();

    for node in nodes {
        let path = node.path_string();

        for &fragment in nodes.fragments(node) {
            let Some(values) = fragment.get("enum").and_then(Value::as_array) else {
                continue;
            };
            let types = declared_types(fragment);
            for value in values.iter().filter_map(Value::as_str) {
                let (value_types, paths) = index.entry(value.to_string()).or_default();
                value_types.extend(types.iter().map(|t| t.to_string()));
                paths.insert(path.clone());
            }
        }
    }

    index
        .into_iter()
        .map(|(value, (types, paths))| EnumRecord {
            value,
            types: types.into_iter().collect(),
            paths: paths.into_iter().collect(),
        })
        .collect()
}
