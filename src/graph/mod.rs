//! Schema Path Graph
//!
//! Walks a JSON Schema through `$ref`, `anyOf`, `items` and `properties`,
//! collecting every distinct property path. Every view is derived from the
//! node set of one traversal:
//!
//! - path list (one row per canonical path)
//! - containment tree with leaf-count sizes, plus its dependency table
//! - key graph (paths and parent keys grouped by short id)
//! - enum index (string enum values by accepting path)
//!
//! Identity is the canonical path: the raw steps with union, reference and
//! array markers removed, under the `vegalite` root marker.

pub mod node;
pub mod resolver;
pub mod expand;
pub mod walker;
pub mod tree;
pub mod views;
pub mod containment;

pub use containment::ContainmentGraph;
pub use expand::{children, collapse, real_children, Collapsed};
pub use node::{Node, PathStep, ROOT_MARKER};
pub use resolver::{PointerResolver, SchemaResolver};
pub use tree::{build_tree, ContainmentTree, Dependency, DependencyTable, TreeNode};
pub use views::{enum_index, key_graph, path_list, EnumRecord, GraphRecord, PathRecord};
pub use walker::{default_blocklist, traverse, NodeSet, WalkStats, DEFAULT_BLOCKLIST};

use serde_json::Value;

use crate::error::Result;

/// Every view derived from one traversal of a schema
#[derive(Debug, Clone)]
pub struct SchemaPaths {
    pub paths: Vec<PathRecord>,
    /// `None` when the blocklist removes the root
    pub tree: Option<TreeNode>,
    pub dependencies: DependencyTable,
    pub graph: Vec<GraphRecord>,
    pub enums: Vec<EnumRecord>,
    pub blocklist: Vec<String>,
    pub stats: WalkStats,
}

impl SchemaPaths {
    /// Analyze a self-contained document, resolving `#/...` references
    /// against the document itself
    pub fn analyze(document: &Value, blocklist: &[String]) -> Result<Self> {
        let resolver = PointerResolver::new(document);
        Self::analyze_with(document, &resolver, blocklist)
    }

    /// Analyze with a caller-supplied resolver
    pub fn analyze_with<'a, R>(document: &'a Value, resolver: &R, blocklist: &[String]) -> Result<Self>
    where
        R: SchemaResolver<'a> + ?Sized,
    {
        let nodes = traverse(document, resolver, blocklist)?;
        let ContainmentTree { root, dependencies } = build_tree(&nodes);

        Ok(Self {
            paths: path_list(&nodes),
            graph: key_graph(&nodes),
            enums: enum_index(&nodes),
            tree: root,
            dependencies,
            blocklist: blocklist.to_vec(),
            stats: nodes.stats(),
        })
    }

    /// Leaf count of the tree, 0 when there is no tree
    pub fn tree_size(&self) -> usize {
        self.tree.as_ref().map_or(0, |tree| tree.size)
    }

    /// Canonical path strings in output order
    pub fn path_strings(&self) -> Vec<&str> {
        self.paths.iter().map(|p| p.id.as_str()).collect()
    }

    pub fn containment_graph(&self) -> ContainmentGraph {
        ContainmentGraph::from_dependencies(&self.dependencies)
    }
}
