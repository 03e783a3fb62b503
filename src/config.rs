//! Configuration management for schema path extraction
//!
//! Supports loading configuration from:
//! - Default values
//! - Config file (schema-paths.toml)
//! - Environment variables (SCHEMA_PATHS__*)
//!
//! ## Example config file (schema-paths.toml):
//! ```toml
//! [traversal]
//! blocklist = ["vconcat", "hconcat", "layer", "spec", "repeat",
//!              "condition", "selection", "data", "facet"]
//!
//! [output]
//! out_path = "visualize/data/vegalite"
//! format = "compact"
//! delimiter = ","
//! write_enums = true
//! write_dot = false
//! write_manifest = true
//!
//! [validation]
//! strict_json_schema = true
//! ```

use config_crate::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::graph::default_blocklist;

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathsConfig {
    #[serde(default)]
    pub traversal: TraversalConfig,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub validation: ValidationConfig,
}

/// Traversal settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraversalConfig {
    /// Nodes whose canonical path contains any of these keys are dropped
    #[serde(default = "default_blocklist")]
    pub blocklist: Vec<String>,
}

/// Artifact settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Prefix for every artifact (`<out_path>.csv`, `<out_path>.json`, ...)
    #[serde(default = "default_out_path")]
    pub out_path: PathBuf,

    #[serde(default)]
    pub format: OutputFormat,

    /// Path list field delimiter
    #[serde(default = "default_delimiter")]
    pub delimiter: char,

    #[serde(default = "default_true")]
    pub write_enums: bool,

    /// Graphviz export of the containment graph
    #[serde(default)]
    pub write_dot: bool,

    #[serde(default = "default_true")]
    pub write_manifest: bool,
}

/// Output format for JSON
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Pretty,
    #[default]
    Compact,
}

/// Validation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Compile the document against its meta-schema before walking it
    #[serde(default = "default_true")]
    pub strict_json_schema: bool,
}

fn default_out_path() -> PathBuf {
    PathBuf::from("visualize/data/vegalite")
}

fn default_delimiter() -> char {
    ','
}

fn default_true() -> bool {
    true
}

impl Default for TraversalConfig {
    fn default() -> Self {
        Self {
            blocklist: default_blocklist(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            out_path: default_out_path(),
            format: OutputFormat::Compact,
            delimiter: default_delimiter(),
            write_enums: true,
            write_dot: false,
            write_manifest: true,
        }
    }
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            strict_json_schema: true,
        }
    }
}

impl PathsConfig {
    /// Load configuration from default locations
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration, layering an explicit file over the defaults
    pub fn load_from(config_path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_locations = [
            "schema-paths.toml",
            ".schema-paths.toml",
            "config/schema-paths.toml",
        ];

        for location in config_locations {
            builder = builder.add_source(File::with_name(location).required(false));
        }

        if let Some(config_dir) = directories::ProjectDirs::from("dev", "familiar", "schema-paths") {
            let xdg_config = config_dir.config_dir().join("schema-paths.toml");
            if xdg_config.exists() {
                builder = builder.add_source(File::from(xdg_config).required(false));
            }
        }

        if let Some(path) = config_path {
            builder = builder.add_source(File::from(path).required(true));
        }

        // SCHEMA_PATHS__OUTPUT__WRITE_DOT=true
        builder = builder.add_source(
            Environment::with_prefix("SCHEMA_PATHS")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("traversal.blocklist"),
        );

        let config = builder.build()?;
        Ok(config.try_deserialize()?)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PathsConfig::default();
        assert_eq!(config.traversal.blocklist.len(), 9);
        assert_eq!(config.output.delimiter, ',');
        assert!(config.validation.strict_json_schema);
        assert!(!config.output.write_dot);
    }

    #[test]
    fn test_serialize_config() {
        let config = PathsConfig::default();
        let toml_str = config.to_toml().unwrap();
        assert!(toml_str.contains("[traversal]"));
        assert!(toml_str.contains("[output]"));
        assert!(toml_str.contains("format = \"compact\""));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "[traversal]\nblocklist = [\"layer\"]\n\n[output]\nwrite_dot = true\n").unwrap();

        let config = PathsConfig::load_from(Some(&path)).unwrap();
        assert_eq!(config.traversal.blocklist, vec!["layer"]);
        assert!(config.output.write_dot);
        assert!(config.output.write_enums);
        assert_eq!(config.output.out_path, PathBuf::from("visualize/data/vegalite"));
    }

    #[test]
    fn test_save_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schema-paths.toml");
        let mut config = PathsConfig::default();
        config.output.format = OutputFormat::Pretty;
        config.save(&path).unwrap();

        let loaded = PathsConfig::load_from(Some(&path)).unwrap();
        assert_eq!(loaded.output.format, OutputFormat::Pretty);
        assert_eq!(loaded.traversal.blocklist, config.traversal.blocklist);
    }
}
