//! Reference Resolution
//!
//! The traversal only needs `resolve(ref) -> fragment`. `PointerResolver`
//! answers document-local references (`#`, `#/definitions/Mark`) against the
//! loaded document; anything it cannot find is an error, never a silent miss.

use percent_encoding::percent_decode_str;
use serde_json::Value;

use crate::error::{PathsError, Result};

/// Resolves `$ref` strings to schema fragments
pub trait SchemaResolver<'a> {
    fn resolve(&self, reference: &str) -> Result<&'a Value>;
}

/// Resolves local JSON pointer references against one document
#[derive(Debug, Clone, Copy)]
pub struct PointerResolver<'a> {
    document: &'a Value,
}

impl<'a> PointerResolver<'a> {
    pub fn new(document: &'a Value) -> Self {
        Self { document }
    }

    pub fn document(&self) -> &'a Value {
        self.document
    }
}

impl<'a> SchemaResolver<'a> for PointerResolver<'a> {
    fn resolve(&self, reference: &str) -> Result<&'a Value> {
        let fragment = reference
            .strip_prefix('#')
            .ok_or_else(|| PathsError::unresolvable(reference))?;

        // `#/definitions/Dict%3CInlineDataset%3E`
        let pointer = percent_decode_str(fragment)
            .decode_utf8()
            .map_err(|_| PathsError::unresolvable(reference))?;

        if pointer.is_empty() {
            return Ok(self.document);
        }

        self.document
            .pointer(&pointer)
            .ok_or_else(|| PathsError::unresolvable(reference))
    }
}
