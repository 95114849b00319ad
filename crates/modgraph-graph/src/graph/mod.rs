//! Dependency graph construction and queries.
//!
//! # Overview
//!
//! This module turns the flat edge list of a [`modgraph_core::Snapshot`]
//! into a [`DependencyGraph`] and answers transitive questions about it.
//!
//! ## Pipeline
//!
//! ```text
//! Snapshot.dependencies (active edges)
//!        ↓  build::build_graph()
//! DependencyGraph
//!   ├─ nodes:  direct dependencies/dependents, level, is_core
//!   ├─ levels: level → module keys
//!   └─ cycles: path segments found while computing levels
//!        ↓  query::{transitive_dependencies, transitive_dependents, installation_order}
//!        ↓  cycles::report_cycles_with_breaks()
//!        ↓  stats::GraphSummary::from_graph()
//! ```
//!
//! ## Typical Usage
//!
//! ```rust
//! use modgraph_core::DependencyEdge;
//! use modgraph_graph::graph::{build_graph, installation_order};
//!
//! let graph = build_graph(&[DependencyEdge::new("A", "B"), DependencyEdge::new("B", "C")]);
//! assert_eq!(graph.level("A"), Some(2));
//! assert_eq!(installation_order(&graph, &["A", "B", "C"]), vec!["C", "B", "A"]);
//! ```

pub mod build;
pub mod cycles;
mod levels;
pub mod query;
pub mod stats;

pub use build::{
    DependencyGraph, DependencyNode, GraphEdge, build_graph, build_graph_with_core,
    edge_content_hash,
};
pub use cycles::{CycleReport, report_cycles_with_breaks, would_create_cycle};
pub use query::{installation_order, transitive_dependencies, transitive_dependents};
pub use stats::GraphSummary;
