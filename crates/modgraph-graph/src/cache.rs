//! Caller-owned graph cache keyed by edge-list content hash.
//!
//! The graph is a pure function of the collapsed active edge list, so a
//! rebuild can be skipped whenever the [`edge_content_hash`] of the incoming
//! edges matches the one the cached graph was built from. The cache is a plain value owned
//! by whoever refreshes the snapshot; there is no process-wide instance.

use modgraph_core::model::{CORE_MODULE_KEY, DependencyEdge};
use tracing::debug;

use crate::graph::{DependencyGraph, build_graph_with_core, edge_content_hash};

#[derive(Debug, Clone)]
pub struct GraphCache {
    core_key: String,
    cached: Option<DependencyGraph>,
    hits: u64,
    misses: u64,
}

impl Default for GraphCache {
    fn default() -> Self {
        Self::new(CORE_MODULE_KEY)
    }
}

impl GraphCache {
    pub fn new(core_key: impl Into<String>) -> Self {
        Self {
            core_key: core_key.into(),
            cached: None,
            hits: 0,
            misses: 0,
        }
    }

    /// Return the cached graph when `edges` hash to the same content,
    /// otherwise rebuild and cache.
    pub fn get_or_build(&mut self, edges: &[DependencyEdge]) -> &DependencyGraph {
        let hash = edge_content_hash(edges);
        let fresh = self
            .cached
            .as_ref()
            .is_some_and(|graph| graph.content_hash == hash);

        if fresh {
            self.hits += 1;
            debug!(%hash, "graph cache hit");
        } else {
            self.misses += 1;
            debug!(%hash, "graph cache miss; rebuilding");
            self.cached = Some(build_graph_with_core(edges, &self.core_key));
        }

        self.cached.get_or_insert_with(DependencyGraph::default)
    }

    /// Drop the cached graph so the next call rebuilds.
    pub fn invalidate(&mut self) {
        self.cached = None;
    }

    #[must_use]
    pub fn cached_hash(&self) -> Option<&str> {
        self.cached.as_ref().map(|graph| graph.content_hash.as_str())
    }

    #[must_use]
    pub const fn hits(&self) -> u64 {
        self.hits
    }

    #[must_use]
    pub const fn misses(&self) -> u64 {
        self.misses
    }
}
