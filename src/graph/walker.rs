//! Schema Traversal
//!
//! Iterative depth-first walk from the document root collecting every
//! distinct canonical path, followed by the blocklist filter.

use serde_json::Value;
use std::collections::HashMap;

use super::expand::children;
use super::node::{sort_nodes, Node};
use super::resolver::SchemaResolver;
use crate::error::Result;

/// Keys excluded from the path views unless configured otherwise
pub const DEFAULT_BLOCKLIST: &[&str] = &[
    "vconcat",
    "hconcat",
    "layer",
    "spec",
    "repeat",
    "condition",
    "selection",
    "data",
    "facet",
];

const PROGRESS_INTERVAL: usize = 1_000;

/// Default blocklist as owned strings
pub fn default_blocklist() -> Vec<String> {
    DEFAULT_BLOCKLIST.iter().map(|s| s.to_string()).collect()
}

/// Traversal counters, reported once the walk finishes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkStats {
    /// Raw nodes popped from the worklist
    pub expanded: usize,
    /// Distinct canonical paths before filtering
    pub distinct: usize,
    /// Nodes surviving the blocklist
    pub retained: usize,
}

/// Deduplicated, filtered and sorted nodes of a schema, plus every
/// fragment reached under each node's canonical path
#[derive(Debug, Clone)]
pub struct NodeSet<'a> {
    nodes: Vec<Node<'a>>,
    fragments: HashMap<Node<'a>, Vec<&'a Value>>,
    blocklist: Vec<String>,
    stats: WalkStats,
}

impl<'a> NodeSet<'a> {
    pub fn nodes(&self) -> &[Node<'a>] {
        &self.nodes
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Node<'a>> {
        self.nodes.iter()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn blocklist(&self) -> &[String] {
        &self.blocklist
    }

    pub fn stats(&self) -> WalkStats {
        self.stats
    }

    /// The root node, unless the blocklist removed it
    pub fn root(&self) -> Option<&Node<'a>> {
        self.nodes.iter().find(|n| n.full_path().is_empty())
    }

    /// Distinct fragments reached by any raw path sharing `node`'s
    /// canonical path, in discovery order. Transparent hops are included.
    pub fn fragments(&self, node: &Node<'a>) -> &[&'a Value] {
        self.fragments.get(node).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl<'s, 'a> IntoIterator for &'s NodeSet<'a> {
    type Item = &'s Node<'a>;
    type IntoIter = std::slice::Iter<'s, Node<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}

/// Walk every raw path reachable from `root` and return the distinct nodes
/// whose canonical path contains no blocklisted key.
///
/// The first raw path discovered for a canonical path is the one kept.
/// Every raw path is still expanded, so descendants reachable only through
/// a later raw path are collected too.
pub fn traverse<'a, R>(root: &'a Value, resolver: &R, blocklist: &[String]) -> Result<NodeSet<'a>>
where
    R: SchemaResolver<'a> + ?Sized,
{
    let mut visited: HashMap<Node<'a>, Vec<&'a Value>> = HashMap::new();
    let mut stack = vec![Node::root(root)];
    let mut expanded = 0usize;

    while let Some(node) = stack.pop() {
        expanded += 1;
        if expanded % PROGRESS_INTERVAL == 0 {
            tracing::debug!(expanded, distinct = visited.len(), pending = stack.len(), "walking schema");
        }

        let mut new_nodes = children(&node, resolver)?;
        new_nodes.reverse();
        stack.extend(new_nodes);

        // the entry keeps its first key on collision
        let fragment = node.schema();
        let reached = visited.entry(node).or_default();
        if !reached.iter().any(|seen| std::ptr::eq(*seen, fragment)) {
            reached.push(fragment);
        }
    }

    let distinct = visited.len();
    let mut nodes = Vec::with_capacity(distinct);
    let mut fragments = HashMap::with_capacity(distinct);
    for (node, reached) in visited {
        if node.is_blocked(blocklist) {
            continue;
        }
        nodes.push(node.clone());
        fragments.insert(node, reached);
    }
    sort_nodes(&mut nodes);

    let stats = WalkStats {
        expanded,
        distinct,
        retained: nodes.len(),
    };
    tracing::info!(
        expanded = stats.expanded,
        distinct = stats.distinct,
        retained = stats.retained,
        "schema traversal complete"
    );

    Ok(NodeSet {
        nodes,
        fragments,
        blocklist: blocklist.to_vec(),
        stats,
    })
}
