//! In-memory module registry.
//!
//! Holds the edge list and compatibility records the way a backing store
//! would, with explicit add/remove/upsert operations. Queries go through
//! [`ModuleRegistry::engine`], which rebuilds the whole graph from the
//! current records. Nothing is patched incrementally.

use modgraph_core::config::GraphConfig;
use modgraph_core::error::CoreError;
use modgraph_core::model::{CompatibilityRecord, DependencyEdge};
use modgraph_core::snapshot::Snapshot;
use tracing::{info, instrument};

use crate::compat::CompatibilityMatrix;
use crate::engine::DependencyEngine;
use crate::graph::{build_graph_with_core, would_create_cycle};

#[derive(Debug, Clone, Default)]
pub struct ModuleRegistry {
    config: GraphConfig,
    edges: Vec<DependencyEdge>,
    compatibility: CompatibilityMatrix,
}

impl ModuleRegistry {
    #[must_use]
    pub fn new(config: GraphConfig) -> Self {
        Self {
            config,
            edges: Vec::new(),
            compatibility: CompatibilityMatrix::default(),
        }
    }

    /// Seed a registry from an existing snapshot. Records are taken as-is,
    /// without the add-time guards.
    #[must_use]
    pub fn from_snapshot(snapshot: Snapshot, config: GraphConfig) -> Self {
        Self {
            config,
            compatibility: CompatibilityMatrix::from_records(&snapshot.compatibility),
            edges: snapshot.dependencies,
        }
    }

    /// Add a dependency edge.
    ///
    /// # Errors
    ///
    /// - [`CoreError::SelfDependency`] when the edge points a module at itself
    ///   and `reject_self_dependency` is set.
    /// - [`CoreError::DuplicateDependency`] when an active edge for the same
    ///   pair already exists.
    /// - [`CoreError::CycleDetected`] when the edge would close a cycle and
    ///   `reject_cycles` is set.
    #[instrument(skip(self, edge), fields(module_key = %edge.module_key, depends_on = %edge.depends_on))]
    pub fn add_dependency(&mut self, edge: DependencyEdge) -> Result<(), CoreError> {
        if edge.is_self_loop() && self.config.reject_self_dependency {
            return Err(CoreError::SelfDependency(edge.module_key));
        }

        if self.find_active(&edge.module_key, &edge.depends_on).is_some() {
            return Err(CoreError::DuplicateDependency {
                module_key: edge.module_key,
                depends_on: edge.depends_on,
            });
        }

        if self.config.reject_cycles && edge.is_active {
            let graph = build_graph_with_core(&self.edges, &self.config.core_key);
            if let Some(path) = would_create_cycle(&graph, &edge.module_key, &edge.depends_on) {
                return Err(CoreError::CycleDetected { path });
            }
        }

        info!("dependency added");
        self.edges.push(edge);
        Ok(())
    }

    /// Remove the active edge `module_key → depends_on`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::DependencyNotFound`] if no such active edge exists.
    #[instrument(skip(self))]
    pub fn remove_dependency(
        &mut self,
        module_key: &str,
        depends_on: &str,
    ) -> Result<DependencyEdge, CoreError> {
        let Some(position) = self.find_active(module_key, depends_on) else {
            return Err(CoreError::DependencyNotFound {
                module_key: module_key.to_string(),
                depends_on: depends_on.to_string(),
            });
        };

        info!("dependency removed");
        Ok(self.edges.remove(position))
    }

    /// Insert or replace the compatibility record for its unordered pair.
    pub fn upsert_compatibility(&mut self, record: CompatibilityRecord) -> Option<CompatibilityRecord> {
        self.compatibility.upsert(record)
    }

    #[must_use]
    pub fn edges(&self) -> &[DependencyEdge] {
        &self.edges
    }

    /// Current contents as a snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::new(
            self.edges.clone(),
            self.compatibility.records().cloned().collect(),
        )
    }

    /// Build a fresh engine from the current records.
    #[must_use]
    pub fn engine(&self) -> DependencyEngine {
        DependencyEngine::with_config(&self.snapshot(), &self.config)
    }

    fn find_active(&self, module_key: &str, depends_on: &str) -> Option<usize> {
        self.edges.iter().position(|edge| {
            edge.is_active && edge.module_key == module_key && edge.depends_on == depends_on
        })
    }
}
