//! Summary statistics for a built dependency graph.

use serde::Serialize;

use super::build::DependencyGraph;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphSummary {
    pub node_count: usize,
    pub edge_count: usize,
    /// Highest node level (0 for an empty graph).
    pub max_level: usize,
    /// Modules with no dependencies.
    pub root_count: usize,
    /// Modules nothing depends on.
    pub leaf_count: usize,
    pub cycle_count: usize,
    pub has_core: bool,
    pub content_hash: String,
}

impl GraphSummary {
    #[must_use]
    pub fn from_graph(graph: &DependencyGraph) -> Self {
        Self {
            node_count: graph.node_count(),
            edge_count: graph.edge_count(),
            max_level: graph.max_level(),
            root_count: graph
                .nodes
                .values()
                .filter(|node| node.dependencies.is_empty())
                .count(),
            leaf_count: graph
                .nodes
                .values()
                .filter(|node| node.dependents.is_empty())
                .count(),
            cycle_count: graph.cycles.len(),
            has_core: graph.nodes.values().any(|node| node.is_core),
            content_hash: graph.content_hash.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::build::build_graph;
    use modgraph_core::model::DependencyEdge;

    #[test]
    fn summary_of_small_tree() {
        let graph = build_graph(&[
            DependencyEdge::new("crm", "core"),
            DependencyEdge::new("billing", "core"),
            DependencyEdge::new("invoicing", "billing"),
        ]);
        let summary = GraphSummary::from_graph(&graph);

        assert_eq!(summary.node_count, 4);
        assert_eq!(summary.edge_count, 3);
        assert_eq!(summary.max_level, 2);
        assert_eq!(summary.root_count, 1);
        assert_eq!(summary.leaf_count, 2);
        assert_eq!(summary.cycle_count, 0);
        assert!(summary.has_core);
    }

    #[test]
    fn summary_of_empty_graph() {
        let summary = GraphSummary::from_graph(&build_graph(&[]));
        assert_eq!(summary.node_count, 0);
        assert_eq!(summary.max_level, 0);
        assert!(!summary.has_core);
    }
}
