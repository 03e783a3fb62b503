//! Run manifest
//!
//! Records what a run read and wrote: the schema checksum, the blocklist in
//! effect, view sizes and the artifacts on disk.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::path::PathBuf;

use crate::graph::SchemaPaths;

/// SHA256 checksum of a schema document
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Checksum(String);

impl Checksum {
    pub fn from_bytes(data: &[u8]) -> Self {
        Self(format!("{:x}", Sha256::digest(data)))
    }

    /// Checksum of the compact JSON rendering. serde_json maps keep keys
    /// sorted, so formatting differences in the source file do not matter.
    pub fn from_json(value: &serde_json::Value) -> Self {
        let canonical = serde_json::to_vec(value).unwrap_or_default();
        Self::from_bytes(&canonical)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn verify_json(&self, value: &serde_json::Value) -> bool {
        *self == Self::from_json(value)
    }
}

impl fmt::Display for Checksum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunManifest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema_path: Option<PathBuf>,
    pub schema_checksum: Checksum,
    pub generated_at: DateTime<Utc>,
    pub blocklist: Vec<String>,
    /// Raw nodes expanded during the walk
    pub expanded: usize,
    /// Distinct canonical paths before the blocklist
    pub distinct: usize,
    pub node_count: usize,
    pub tree_size: usize,
    pub dependency_count: usize,
    pub graph_keys: usize,
    pub enum_values: usize,
    #[serde(default)]
    pub artifacts: Vec<PathBuf>,
}

impl RunManifest {
    pub fn new(document: &serde_json::Value, paths: &SchemaPaths) -> Self {
        Self {
            schema_path: None,
            schema_checksum: Checksum::from_json(document),
            generated_at: Utc::now(),
            blocklist: paths.blocklist.clone(),
            expanded: paths.stats.expanded,
            distinct: paths.stats.distinct,
            node_count: paths.paths.len(),
            tree_size: paths.tree_size(),
            dependency_count: paths.dependencies.len(),
            graph_keys: paths.graph.len(),
            enum_values: paths.enums.len(),
            artifacts: Vec::new(),
        }
    }

    pub fn with_schema_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.schema_path = Some(path.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_checksum_ignores_formatting() {
        let a: serde_json::Value = serde_json::from_str(r#"{"b": 1, "a": [1, 2]}"#).unwrap();
        let b: serde_json::Value = serde_json::from_str("{\n  \"a\": [1,2],\n  \"b\": 1\n}").unwrap();
        assert_eq!(Checksum::from_json(&a), Checksum::from_json(&b));
        assert!(Checksum::from_json(&a).verify_json(&b));
    }

    #[test]
    fn test_checksum_different_content() {
        let a = Checksum::from_json(&json!({"name": "test1"}));
        let b = Checksum::from_json(&json!({"name": "test2"}));
        assert_ne!(a, b);
        assert_eq!(a.as_str().len(), 64);
    }

    #[test]
    fn test_manifest_counts() {
        let doc = json!({"properties": {"x": {}, "y": {"properties": {"z": {}}}}});
        let paths = SchemaPaths::analyze(&doc, &[]).unwrap();
        let manifest = RunManifest::new(&doc, &paths).with_schema_path("schema.json");

        assert_eq!(manifest.node_count, 4);
        assert_eq!(manifest.tree_size, 2);
        assert_eq!(manifest.dependency_count, 4);
        assert_eq!(manifest.schema_path, Some(PathBuf::from("schema.json")));
    }
}
