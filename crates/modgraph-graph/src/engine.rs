//! Query facade over one snapshot.
//!
//! [`DependencyEngine`] owns the graph and the compatibility matrix built
//! from a single [`Snapshot`]. It is immutable: when the store changes,
//! build a new engine from a fresh snapshot.

use modgraph_core::config::GraphConfig;
use modgraph_core::model::CompatibilityRecord;
use modgraph_core::snapshot::Snapshot;
use tracing::instrument;

use crate::compat::CompatibilityMatrix;
use crate::graph::{
    CycleReport, DependencyGraph, GraphSummary, build_graph_with_core, installation_order,
    report_cycles_with_breaks, transitive_dependencies, transitive_dependents,
};

#[derive(Debug, Clone)]
pub struct DependencyEngine {
    graph: DependencyGraph,
    compatibility: CompatibilityMatrix,
    core_key: String,
}

impl DependencyEngine {
    /// Build an engine with the default `"core"` sentinel.
    #[must_use]
    pub fn new(snapshot: &Snapshot) -> Self {
        Self::with_config(snapshot, &GraphConfig::default())
    }

    #[must_use]
    #[instrument(skip_all, fields(core_key = %config.core_key))]
    pub fn with_config(snapshot: &Snapshot, config: &GraphConfig) -> Self {
        Self {
            graph: build_graph_with_core(&snapshot.dependencies, &config.core_key),
            compatibility: CompatibilityMatrix::from_records(&snapshot.compatibility),
            core_key: config.core_key.clone(),
        }
    }

    /// Sentinel root key the graph was built with.
    #[must_use]
    pub fn core_key(&self) -> &str {
        &self.core_key
    }

    #[must_use]
    pub const fn graph(&self) -> &DependencyGraph {
        &self.graph
    }

    #[must_use]
    pub const fn compatibility(&self) -> &CompatibilityMatrix {
        &self.compatibility
    }

    /// Transitive dependencies of `key`; empty for an unknown key.
    #[must_use]
    pub fn get_module_dependencies(&self, key: &str) -> Vec<String> {
        transitive_dependencies(&self.graph, key)
    }

    /// Transitive dependents of `key`; empty for an unknown key.
    #[must_use]
    pub fn get_module_dependents(&self, key: &str) -> Vec<String> {
        transitive_dependents(&self.graph, key)
    }

    #[must_use]
    pub fn check_compatibility(&self, a: &str, b: &str) -> Option<&CompatibilityRecord> {
        self.compatibility.check(a, b)
    }

    #[must_use]
    pub fn get_installation_order<S: AsRef<str>>(&self, candidates: &[S]) -> Vec<String> {
        installation_order(&self.graph, candidates)
    }

    /// Returns `true` if `key` is an endpoint of any active edge.
    #[must_use]
    pub fn is_known_module(&self, key: &str) -> bool {
        self.graph.contains(key)
    }

    #[must_use]
    pub fn content_hash(&self) -> &str {
        &self.graph.content_hash
    }

    #[must_use]
    pub fn cycle_reports(&self) -> Vec<CycleReport> {
        report_cycles_with_breaks(&self.graph)
    }

    #[must_use]
    pub fn summary(&self) -> GraphSummary {
        GraphSummary::from_graph(&self.graph)
    }
}
