//! Containment Graph
//!
//! The dependency table loaded into a petgraph `DiGraph` (parent path ->
//! child path) for graph queries and Graphviz export.

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use std::collections::HashMap;

use super::tree::DependencyTable;

pub struct ContainmentGraph {
    graph: DiGraph<String, ()>,
    indices: HashMap<String, NodeIndex>,
}

impl ContainmentGraph {
    pub fn from_dependencies(dependencies: &DependencyTable) -> Self {
        let records = dependencies.to_records();
        let mut graph = DiGraph::with_capacity(records.len(), records.len() * 2);
        let mut indices: HashMap<String, NodeIndex> = HashMap::with_capacity(records.len());

        let mut index_of = |graph: &mut DiGraph<String, ()>, path: &str| -> NodeIndex {
            *indices
                .entry(path.to_string())
                .or_insert_with(|| graph.add_node(path.to_string()))
        };

        for record in &records {
            let parent = index_of(&mut graph, &record.name);
            for import in &record.imports {
                let child = index_of(&mut graph, import);
                graph.update_edge(parent, child, ());
            }
        }

        Self { graph, indices }
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Immediate children of a canonical path, sorted
    pub fn children_of(&self, path: &str) -> Vec<&str> {
        self.neighbors(path, Direction::Outgoing)
    }

    /// Immediate parents of a canonical path, sorted
    pub fn parents_of(&self, path: &str) -> Vec<&str> {
        self.neighbors(path, Direction::Incoming)
    }

    fn neighbors(&self, path: &str, direction: Direction) -> Vec<&str> {
        let Some(&idx) = self.indices.get(path) else {
            return Vec::new();
        };
        let mut out: Vec<&str> = self
            .graph
            .edges_directed(idx, direction)
            .filter_map(|e| {
                let other = match direction {
                    Direction::Outgoing => e.target(),
                    Direction::Incoming => e.source(),
                };
                self.graph.node_weight(other).map(String::as_str)
            })
            .collect();
        out.sort();
        out
    }

    /// Graphviz DOT, nodes labelled with their last key
    pub fn to_dot(&self) -> String {
        let mut output = String::new();

        output.push_str("digraph SchemaPaths {\n");
        output.push_str("  rankdir=LR;\n");
        output.push_str("  node [shape=box, style=\"rounded\", fontname=\"Helvetica\", fontsize=10];\n");
        output.push_str("\n");

        let mut nodes: Vec<&String> = self
            .graph
            .node_indices()
            .filter_map(|idx| self.graph.node_weight(idx))
            .collect();
        nodes.sort();
        for path in nodes {
            let label = path.rsplit('.').next().unwrap_or(path);
            output.push_str(&format!("  \"{}\" [label=\"{}\"];\n", escape(path), escape(label)));
        }

        output.push_str("\n");

        let mut edges: Vec<(&str, &str)> = self
            .graph
            .edge_references()
            .filter_map(|edge| {
                let source = self.graph.node_weight(edge.source())?;
                let target = self.graph.node_weight(edge.target())?;
                Some((source.as_str(), target.as_str()))
            })
            .collect();
        edges.sort();
        for (source, target) in edges {
            output.push_str(&format!("  \"{}\" -> \"{}\";\n", escape(source), escape(target)));
        }

        output.push_str("}\n");
        output
    }
}

fn escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}
