//! Containment Tree
//!
//! Nested view rooted at the document root, derived from the traversal's
//! node set. A node's children are every surviving canonical path one key
//! below it, whichever raw path reached them. Each tree node carries a size
//! equal to the number of leaves beneath it.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

use super::node::Node;
use super::walker::NodeSet;

/// One node of the containment tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    /// Canonical path (`vegalite.encoding.color`)
    pub path: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Leaf count; 1 for a leaf
    pub size: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Total number of tree nodes, this one included
    pub fn count(&self) -> usize {
        let mut total = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            total += 1;
            stack.extend(node.children.iter());
        }
        total
    }
}

/// Child canonical paths recorded for one canonical path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    pub name: String,
    pub imports: Vec<String>,
}

/// Canonical path -> child canonical paths, merged across every raw path
/// that reaches the same canonical path. Keeps first-encounter order.
#[derive(Debug, Clone, Default)]
pub struct DependencyTable {
    order: Vec<String>,
    entries: HashMap<String, BTreeSet<String>>,
}

impl DependencyTable {
    pub fn record<I>(&mut self, name: &str, imports: I)
    where
        I: IntoIterator<Item = String>,
    {
        if !self.entries.contains_key(name) {
            self.order.push(name.to_string());
        }
        self.entries.entry(name.to_string()).or_default().extend(imports);
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn imports(&self, name: &str) -> Option<&BTreeSet<String>> {
        self.entries.get(name)
    }

    /// Records in first-encounter order
    pub fn to_records(&self) -> Vec<Dependency> {
        self.order
            .iter()
            .map(|name| Dependency {
                name: name.clone(),
                imports: self.entries[name].iter().cloned().collect(),
            })
            .collect()
    }
}

/// Containment tree plus the dependency table collected while building it.
/// `root` is `None` when the blocklist removed the root itself.
#[derive(Debug, Clone)]
pub struct ContainmentTree {
    pub root: Option<TreeNode>,
    pub dependencies: DependencyTable,
}

struct TreeBuilder<'s, 'a> {
    by_parent: HashMap<String, Vec<&'s Node<'a>>>,
    dependencies: DependencyTable,
}

impl<'s, 'a> TreeBuilder<'s, 'a> {
    fn expand(&mut self, node: &Node<'a>) -> TreeNode {
        let path = node.path_string();
        let kept = self.by_parent.get(&path).cloned().unwrap_or_default();

        self.dependencies
            .record(&path, kept.iter().map(|child| child.path_string()));

        let children: Vec<TreeNode> = kept.iter().map(|child| self.expand(child)).collect();

        let size = if children.is_empty() {
            1
        } else {
            children.iter().map(|c| c.size).sum()
        };

        TreeNode {
            name: node.name().to_string(),
            description: node.description(),
            path,
            size,
            children,
        }
    }
}

/// Build the containment tree and dependency table from a traversal.
///
/// Children keep the node set's output order. Recursion depth follows the
/// canonical depth of the schema, which the reference cycle guard keeps
/// finite.
pub fn build_tree(nodes: &NodeSet<'_>) -> ContainmentTree {
    let mut by_parent: HashMap<String, Vec<&Node<'_>>> = HashMap::new();
    for node in nodes {
        if let Some(parent) = node.parent_path() {
            by_parent.entry(parent).or_default().push(node);
        }
    }

    let mut builder = TreeBuilder {
        by_parent,
        dependencies: DependencyTable::default(),
    };
    let root = nodes.root().map(|root| builder.expand(root));
    tracing::debug!(
        tree_nodes = root.as_ref().map_or(0, TreeNode::count),
        size = root.as_ref().map_or(0, |r| r.size),
        dependencies = builder.dependencies.len(),
        "containment tree built"
    );

    ContainmentTree {
        root,
        dependencies: builder.dependencies,
    }
}
