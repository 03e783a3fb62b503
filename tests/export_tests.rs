//! Artifact export tests

use std::fs;

use schema_paths::config::{OutputConfig, OutputFormat};
use schema_paths::export::write_artifacts;
use schema_paths::graph::{default_blocklist, Dependency, GraphRecord, SchemaPaths, TreeNode};
use schema_paths::{PathsError, RunManifest};
use serde_json::Value;

fn vegalite_mini() -> Value {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/vegalite_mini.json");
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn test_writes_every_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let schema = vegalite_mini();
    let paths = SchemaPaths::analyze(&schema, &default_blocklist()).unwrap();

    let output = OutputConfig {
        out_path: dir.path().join("data").join("vegalite"),
        format: OutputFormat::Pretty,
        write_dot: true,
        ..OutputConfig::default()
    };
    let manifest = RunManifest::new(&schema, &paths).with_schema_path("vegalite_mini.json");
    let written = write_artifacts(&paths, Some(manifest), &output).unwrap();

    let names: Vec<String> = written
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
        .collect();
    assert_eq!(
        names,
        vec![
            "vegalite.csv",
            "vegalite.json",
            "vegalite.dep.json",
            "vegalite.graph.json",
            "vegalite.enums.json",
            "vegalite.dot",
            "vegalite.manifest.json",
        ]
    );
    assert!(written.iter().all(|p| p.exists()));

    let csv = fs::read_to_string(&written[0]).unwrap();
    assert_eq!(csv.lines().next(), Some("id,full_path,description"));
    assert_eq!(csv.lines().count(), paths.paths.len() + 1);

    let tree: Option<TreeNode> = serde_json::from_str(&fs::read_to_string(&written[1]).unwrap()).unwrap();
    assert_eq!(tree, paths.tree);

    let deps: Vec<Dependency> = serde_json::from_str(&fs::read_to_string(&written[2]).unwrap()).unwrap();
    assert_eq!(deps[0].name, "vegalite");

    let graph: Vec<GraphRecord> = serde_json::from_str(&fs::read_to_string(&written[3]).unwrap()).unwrap();
    assert_eq!(graph, paths.graph);

    let dot = fs::read_to_string(&written[5]).unwrap();
    assert!(dot.contains("\"vegalite\" -> \"vegalite.mark\";"));

    let manifest: RunManifest = serde_json::from_str(&fs::read_to_string(&written[6]).unwrap()).unwrap();
    assert_eq!(manifest.node_count, paths.paths.len());
    assert_eq!(manifest.artifacts.len(), 7);
    assert!(manifest.schema_checksum.verify_json(&schema));
}

#[test]
fn test_optional_artifacts_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let schema: Value = serde_json::json!({"properties": {"x": {"type": "string"}}});
    let paths = SchemaPaths::analyze(&schema, &[]).unwrap();

    let output = OutputConfig {
        out_path: dir.path().join("paths"),
        write_enums: false,
        write_manifest: false,
        delimiter: '\t',
        ..OutputConfig::default()
    };
    let written = write_artifacts(&paths, None, &output).unwrap();
    assert_eq!(written.len(), 4);

    let tsv = fs::read_to_string(&written[0]).unwrap();
    let rows: Vec<&str> = tsv.lines().collect();
    assert_eq!(rows, vec!["id\tfull_path\tdescription", "vegalite\t\t", "vegalite.x\tx\t"]);
}

#[test]
fn test_non_ascii_delimiter_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let schema: Value = serde_json::json!({"properties": {"x": {"type": "string"}}});
    let paths = SchemaPaths::analyze(&schema, &[]).unwrap();

    let output = OutputConfig {
        out_path: dir.path().join("out").join("paths"),
        delimiter: 'é',
        ..OutputConfig::default()
    };

    match write_artifacts(&paths, None, &output) {
        Err(PathsError::InvalidConfig(message)) => assert!(message.contains("delimiter")),
        other => panic!("Expected InvalidConfig, got {:?}", other),
    }
    assert!(!dir.path().join("out").exists());
}

#[test]
fn test_blocked_root_writes_null_tree() {
    let dir = tempfile::tempdir().unwrap();
    let schema: Value = serde_json::json!({"properties": {"x": {"type": "string"}}});
    let paths = SchemaPaths::analyze(&schema, &["vegalite".to_string()]).unwrap();

    let output = OutputConfig {
        out_path: dir.path().join("paths"),
        ..OutputConfig::default()
    };
    let written = write_artifacts(&paths, None, &output).unwrap();

    assert_eq!(fs::read_to_string(&written[1]).unwrap(), "null");
    assert_eq!(fs::read_to_string(&written[0]).unwrap().lines().count(), 1);
}
