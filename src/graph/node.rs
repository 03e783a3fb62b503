//! Node Identity
//!
//! A node is a schema fragment together with the raw steps taken from the
//! document root to reach it. Identity is the canonical path: the raw path
//! with union, reference and array markers stripped and the root marker
//! prepended. Two fragments reached through different raw paths with the
//! same canonical path are the same node.

use serde_json::Value;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Marker prepended to every canonical path
pub const ROOT_MARKER: &str = "vegalite";

/// A single raw traversal step
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathStep {
    /// A literal object property key
    Key(String),
    /// An `anyOf` alternative (index into the array)
    AnyOf(usize),
    /// A `$ref` jump, carrying the literal reference string
    Ref(String),
    /// Array item schema
    Items,
}

impl PathStep {
    pub fn key(key: impl Into<String>) -> Self {
        PathStep::Key(key.into())
    }

    pub fn reference(reference: impl Into<String>) -> Self {
        PathStep::Ref(reference.into())
    }

    /// The literal key, if this step is one
    pub fn as_key(&self) -> Option<&str> {
        match self {
            PathStep::Key(key) => Some(key),
            _ => None,
        }
    }

    /// Abbreviated form used by display paths: keys verbatim, references
    /// cut to their final segment (`#/definitions/Mark` -> `/Mark`).
    fn display_form(&self) -> Option<&str> {
        match self {
            PathStep::Key(key) => Some(key),
            PathStep::Ref(reference) => Some(
                reference
                    .rfind('/')
                    .map(|idx| &reference[idx..])
                    .unwrap_or(reference),
            ),
            PathStep::AnyOf(_) | PathStep::Items => None,
        }
    }
}

impl fmt::Display for PathStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathStep::Key(key) => write!(f, "{}", key),
            PathStep::AnyOf(i) => write!(f, "anyOf[{}]", i),
            PathStep::Ref(reference) => write!(f, "{}", reference),
            PathStep::Items => write!(f, "items"),
        }
    }
}

/// A schema fragment reached through a specific raw path
#[derive(Debug, Clone)]
pub struct Node<'a> {
    schema: &'a Value,
    full_path: Vec<PathStep>,
}

impl<'a> Node<'a> {
    pub fn new(schema: &'a Value, full_path: Vec<PathStep>) -> Self {
        Self { schema, full_path }
    }

    /// The document root, reached through the empty path
    pub fn root(schema: &'a Value) -> Self {
        Self::new(schema, Vec::new())
    }

    /// Child node reached by appending one step
    pub fn child(&self, schema: &'a Value, step: PathStep) -> Node<'a> {
        let mut full_path = Vec::with_capacity(self.full_path.len() + 1);
        full_path.extend_from_slice(&self.full_path);
        full_path.push(step);
        Node::new(schema, full_path)
    }

    pub fn schema(&self) -> &'a Value {
        self.schema
    }

    pub fn full_path(&self) -> &[PathStep] {
        &self.full_path
    }

    /// Whether this raw path already jumped through `reference`
    pub fn has_visited_ref(&self, reference: &str) -> bool {
        self.full_path
            .iter()
            .any(|step| matches!(step, PathStep::Ref(r) if r == reference))
    }

    /// Canonical path elements without allocating
    pub fn canonical_iter(&self) -> impl Iterator<Item = &str> + '_ {
        std::iter::once(ROOT_MARKER).chain(self.full_path.iter().filter_map(PathStep::as_key))
    }

    pub fn canonical_path(&self) -> Vec<&str> {
        self.canonical_iter().collect()
    }

    /// Canonical path joined with `.` (`vegalite.encoding.color`)
    pub fn path_string(&self) -> String {
        self.canonical_path().join(".")
    }

    pub fn display_path(&self) -> Vec<&str> {
        self.full_path.iter().filter_map(PathStep::display_form).collect()
    }

    /// Raw path joined with `.`; drives output ordering
    pub fn full_path_string(&self) -> String {
        self.full_path
            .iter()
            .map(|step| step.to_string())
            .collect::<Vec<_>>()
            .join(".")
    }

    pub fn description(&self) -> String {
        self.schema
            .get("description")
            .and_then(Value::as_str)
            .map(|d| d.replace('\u{a0}', " "))
            .unwrap_or_default()
    }

    pub fn name(&self) -> &str {
        self.canonical_iter().last().unwrap_or(ROOT_MARKER)
    }

    /// Short identity used to group nodes in the key graph. A node whose
    /// raw path ends on a reference jump is identified by the key it hangs
    /// off plus the abbreviated target (`color/ColorDef`); otherwise by its
    /// last key.
    pub fn id(&self) -> String {
        let display = self.display_path();
        match (self.full_path.last(), display.as_slice()) {
            (_, []) => ROOT_MARKER.to_string(),
            (Some(PathStep::Ref(_)), [.., parent, last]) => format!("{}{}", parent, last),
            (_, [.., last]) => last.to_string(),
        }
    }

    /// Key that directly contains this node in its canonical path
    pub fn parent_key(&self) -> Option<&str> {
        let canonical = self.canonical_path();
        let len = canonical.len();
        if len < 2 {
            return None;
        }
        Some(canonical[len - 2])
    }

    /// Canonical path string one key up; `None` for the root
    pub fn parent_path(&self) -> Option<String> {
        let canonical = self.canonical_path();
        match canonical.split_last() {
            Some((_, parent)) if !parent.is_empty() => Some(parent.join(".")),
            _ => None,
        }
    }

    /// Whether any canonical element appears in the blocklist
    pub fn is_blocked<S: AsRef<str>>(&self, blocklist: &[S]) -> bool {
        self.canonical_iter()
            .any(|elem| blocklist.iter().any(|blocked| blocked.as_ref() == elem))
    }

    pub fn same_canonical(&self, other: &Node<'_>) -> bool {
        self.canonical_iter().eq(other.canonical_iter())
    }

    /// Deterministic output ordering: raw path text first, canonical path
    /// as tie-breaker so the order is total.
    pub fn output_cmp(&self, other: &Node<'_>) -> Ordering {
        self.full_path_string()
            .cmp(&other.full_path_string())
            .then_with(|| self.canonical_iter().cmp(other.canonical_iter()))
    }
}

impl PartialEq for Node<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.same_canonical(other)
    }
}

impl Eq for Node<'_> {}

impl Hash for Node<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for elem in self.canonical_iter() {
            elem.hash(state);
        }
    }
}

impl fmt::Display for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}", self.path_string(), self.full_path_string())
    }
}

/// Sort nodes into deterministic output order
pub fn sort_nodes(nodes: &mut [Node<'_>]) {
    nodes.sort_by(|a, b| a.output_cmp(b));
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashSet;

    fn path(steps: &[PathStep]) -> Vec<PathStep> {
        steps.to_vec()
    }

    #[test]
    fn test_canonical_strips_markers() {
        let schema = json!({});
        let node = Node::new(
            &schema,
            path(&[
                PathStep::key("encoding"),
                PathStep::reference("#/definitions/Encoding"),
                PathStep::key("color"),
                PathStep::AnyOf(1),
                PathStep::Items,
            ]),
        );
        assert_eq!(node.canonical_path(), vec!["vegalite", "encoding", "color"]);
        assert_eq!(node.path_string(), "vegalite.encoding.color");
        assert_eq!(node.name(), "color");
    }

    #[test]
    fn test_display_path_abbreviates_refs() {
        let schema = json!({});
        let node = Node::new(
            &schema,
            path(&[
                PathStep::key("encoding"),
                PathStep::reference("#/definitions/Encoding"),
                PathStep::AnyOf(0),
                PathStep::key("color"),
            ]),
        );
        assert_eq!(node.display_path(), vec!["encoding", "/Encoding", "color"]);
        assert_eq!(node.id(), "color");
    }

    #[test]
    fn test_id_on_reference_hop() {
        let schema = json!({});
        let node = Node::new(
            &schema,
            path(&[PathStep::key("color"), PathStep::reference("#/definitions/ColorDef")]),
        );
        assert_eq!(node.id(), "color/ColorDef");

        let root = Node::root(&schema);
        assert_eq!(root.id(), ROOT_MARKER);
        assert_eq!(root.name(), ROOT_MARKER);
        assert_eq!(root.parent_key(), None);
    }

    #[test]
    fn test_equality_by_canonical_path() {
        let a = json!({"type": "string"});
        let b = json!({"type": "number"});
        let n1 = Node::new(&a, path(&[PathStep::key("x")]));
        let n2 = Node::new(&b, path(&[PathStep::AnyOf(0), PathStep::key("x")]));
        assert_eq!(n1, n2);

        let set: HashSet<_> = [n1, n2].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_description_normalizes_nbsp() {
        let schema = json!({"description": "a\u{a0}b"});
        assert_eq!(Node::root(&schema).description(), "a b");

        let scalar = json!(true);
        assert_eq!(Node::root(&scalar).description(), "");
    }

    #[test]
    fn test_output_order_uses_full_path() {
        let schema = json!({});
        let mut nodes = vec![
            Node::new(&schema, path(&[PathStep::key("y")])),
            Node::new(&schema, path(&[PathStep::key("x"), PathStep::key("z")])),
            Node::root(&schema),
            Node::new(&schema, path(&[PathStep::key("x")])),
        ];
        sort_nodes(&mut nodes);
        let order: Vec<_> = nodes.iter().map(|n| n.path_string()).collect();
        assert_eq!(order, vec!["vegalite", "vegalite.x", "vegalite.x.z", "vegalite.y"]);
    }

    #[test]
    fn test_key_named_items_is_kept() {
        let schema = json!({});
        let node = Node::new(&schema, path(&[PathStep::key("items"), PathStep::Items]));
        assert_eq!(node.path_string(), "vegalite.items");
        assert_eq!(node.full_path_string(), "items.items");
    }

    #[test]
    fn test_blocklist_match() {
        let schema = json!({});
        let node = Node::new(&schema, path(&[PathStep::key("layer"), PathStep::key("mark")]));
        assert!(node.is_blocked(&["layer"]));
        assert!(!node.is_blocked(&["facet"]));
        assert!(!node.is_blocked::<&str>(&[]));
        assert_eq!(node.parent_key(), Some("layer"));
        assert_eq!(node.parent_path(), Some("vegalite.layer".to_string()));
        assert_eq!(Node::root(&schema).parent_path(), None);
    }
}
