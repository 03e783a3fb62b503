//! Schema Loading
//!
//! Reads the schema document from disk and optionally checks it against
//! its meta-schema before any traversal happens.

use jsonschema::JSONSchema;
use serde_json::Value;
use std::fs;
use std::path::Path;

use crate::error::{PathsError, Result};

/// Read and parse a schema document
pub fn load_schema(path: &Path) -> Result<Value> {
    tracing::debug!(path = %path.display(), "reading schema");
    let content = fs::read_to_string(path)?;
    let document: Value = serde_json::from_str(&content)?;
    Ok(document)
}

/// Compile the document as a JSON Schema, surfacing meta-schema violations
pub fn validate_schema(document: &Value) -> Result<()> {
    JSONSchema::compile(document).map_err(|e| PathsError::InvalidSchema(e.to_string()))?;
    Ok(())
}

/// Read a schema document, validating it when `strict` is set
pub fn load_and_validate(path: &Path, strict: bool) -> Result<Value> {
    let document = load_schema(path)?;
    if strict {
        validate_schema(&document)?;
        tracing::debug!("schema passed meta-schema validation");
    }
    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_load_schema() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schema.json");
        fs::write(&path, r#"{"properties": {"x": {"type": "string"}}}"#).unwrap();

        let document = load_and_validate(&path, true).unwrap();
        assert_eq!(document["properties"]["x"]["type"], "string");
    }

    #[test]
    fn test_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(load_schema(&path), Err(PathsError::Json(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = load_schema(Path::new("/nonexistent/schema.json"));
        assert!(matches!(result, Err(PathsError::Io(_))));
    }

    #[test]
    fn test_meta_schema_violation() {
        let document = json!({"type": 12});
        assert!(matches!(
            validate_schema(&document),
            Err(PathsError::InvalidSchema(_))
        ));
        assert!(validate_schema(&json!({"type": "object"})).is_ok());
    }
}
