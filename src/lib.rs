//! Schema Paths
//!
//! Enumerates every property path reachable through a JSON Schema document
//! (the Vega-Lite grammar in particular) and derives the views an
//! exploration front end consumes.
//!
//! ## Features
//!
//! - **Reference-aware traversal**: follows `$ref`, `anyOf`, `items` and
//!   `properties`, never re-entering a reference already on the path
//! - **Canonical identity**: nodes reached through different reference or
//!   union hops collapse onto one canonical path
//! - **Blocklist filtering**: container keys (`layer`, `facet`, ...) are
//!   excluded from every view
//! - **Consistent views**: path list, containment tree, key graph and enum
//!   index are all derived from the node set of a single walk
//!
//! ## Artifacts
//!
//! ```text
//! visualize/data/
//! ├── vegalite.csv            # id,full_path,description
//! ├── vegalite.json           # containment tree with leaf-count sizes
//! ├── vegalite.dep.json       # [{name, imports}]
//! ├── vegalite.graph.json     # [{key, paths, parents}]
//! ├── vegalite.enums.json     # [{value, types, paths}]
//! └── vegalite.manifest.json  # checksum, counts, artifacts
//! ```

pub mod config;
pub mod error;
pub mod export;
pub mod graph;
pub mod loader;
pub mod manifest;
pub mod search;

pub use config::{OutputFormat, PathsConfig};
pub use error::{PathsError, Result};
pub use graph::{
    default_blocklist, traverse, GraphRecord, Node, NodeSet, PathRecord, PathStep,
    PointerResolver, SchemaPaths, SchemaResolver, TreeNode,
};
pub use manifest::{Checksum, RunManifest};
