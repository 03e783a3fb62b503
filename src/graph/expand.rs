//! Child Expansion
//!
//! Produces the immediate structural children of a node (`anyOf` branches,
//! `$ref` jumps, `items`, `properties`) and collapses transparent hops so
//! containment views only see edges that change the canonical path.

use serde_json::Value;
use std::collections::HashSet;

use super::node::{sort_nodes, Node, PathStep};
use super::resolver::SchemaResolver;
use crate::error::Result;

/// Immediate raw children of a node, in emission order.
///
/// A `$ref` already present in the node's raw path is not followed again.
pub fn children<'a, R>(node: &Node<'a>, resolver: &R) -> Result<Vec<Node<'a>>>
where
    R: SchemaResolver<'a> + ?Sized,
{
    let Some(obj) = node.schema().as_object() else {
        return Ok(Vec::new());
    };

    let mut child_nodes = Vec::new();

    if let Some(branches) = obj.get("anyOf").and_then(Value::as_array) {
        for (i, branch) in branches.iter().enumerate() {
            child_nodes.push(node.child(branch, PathStep::AnyOf(i)));
        }
    }

    if let Some(reference) = obj.get("$ref").and_then(Value::as_str) {
        if !node.has_visited_ref(reference) {
            let target = resolver.resolve(reference)?;
            child_nodes.push(node.child(target, PathStep::reference(reference)));
        }
    }

    match obj.get("items") {
        Some(Value::Array(tuple)) => {
            for item in tuple {
                child_nodes.push(node.child(item, PathStep::Items));
            }
        }
        Some(items) => child_nodes.push(node.child(items, PathStep::Items)),
        None => {}
    }

    if let Some(props) = obj.get("properties").and_then(Value::as_object) {
        let mut keys: Vec<&String> = props.keys().collect();
        keys.sort();
        for key in keys {
            child_nodes.push(node.child(&props[key.as_str()], PathStep::key(key.as_str())));
        }
    }

    Ok(child_nodes)
}

/// Result of walking through a node's transparent hops
#[derive(Debug, Default)]
pub struct Collapsed<'a> {
    /// Fragments reached without leaving the node's canonical path
    pub hops: Vec<&'a Value>,
    /// Children whose canonical path differs from the node's, in output order
    pub real_children: Vec<Node<'a>>,
}

/// Walk a node's raw children, descending through every child that shares
/// the node's canonical path and keeping the first child seen for each
/// other canonical path.
pub fn collapse<'a, R>(node: &Node<'a>, resolver: &R) -> Result<Collapsed<'a>>
where
    R: SchemaResolver<'a> + ?Sized,
{
    let mut queue = children(node, resolver)?;
    let mut seen: HashSet<Node<'a>> = HashSet::new();
    let mut collapsed = Collapsed::default();

    while let Some(child) = queue.pop() {
        if child.same_canonical(node) {
            collapsed.hops.push(child.schema());
            queue.extend(children(&child, resolver)?);
        } else if !seen.contains(&child) {
            seen.insert(child.clone());
            collapsed.real_children.push(child);
        }
    }

    sort_nodes(&mut collapsed.real_children);
    Ok(collapsed)
}

/// Children that change the canonical path, with transparent hops elided
pub fn real_children<'a, R>(node: &Node<'a>, resolver: &R) -> Result<Vec<Node<'a>>>
where
    R: SchemaResolver<'a> + ?Sized,
{
    Ok(collapse(node, resolver)?.real_children)
}
