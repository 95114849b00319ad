//! Graph construction from a flat edge list.
//!
//! # Overview
//!
//! [`build_graph`] turns the active [`DependencyEdge`]s of a snapshot into a
//! [`DependencyGraph`]: one [`DependencyNode`] per module key seen on either
//! end of an edge, direct adjacency in both directions, a longest-chain
//! `level` per node, and the cycles discovered while computing levels.
//!
//! ## Edge Direction
//!
//! An edge `A → B` means "A **depends on** B": `B` appears in
//! `A.dependencies` and `A` appears in `B.dependents`.
//!
//! ## Determinism
//!
//! Nodes live in a `BTreeMap`, so every pass over the node set (level
//! traversal start points, level grouping, cycle discovery) runs in key
//! order. Building twice from the same edges yields equal graphs.
//!
//! ## Cache Invalidation
//!
//! [`DependencyGraph::content_hash`] is a BLAKE3 hash of the edges the graph
//! was built from: active edges, duplicates collapsed, in input order.
//! Adjacency order and the surviving dependency type both follow input
//! order, so two edge lists with equal hashes always build equal graphs.

use std::collections::{BTreeMap, HashSet};

use modgraph_core::model::{CORE_MODULE_KEY, DependencyEdge, DependencyType};
use serde::Serialize;
use tracing::{debug, instrument, warn};

use super::levels::compute_levels;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// One module in the dependency graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencyNode {
    pub id: String,
    /// Direct dependencies, in edge order.
    pub dependencies: Vec<String>,
    /// Direct dependents, in edge order.
    pub dependents: Vec<String>,
    /// Longest dependency chain below this node (0 with no dependencies).
    pub level: usize,
    pub is_core: bool,
}

impl DependencyNode {
    fn new(id: &str, core_key: &str) -> Self {
        Self {
            id: id.to_string(),
            dependencies: Vec::new(),
            dependents: Vec::new(),
            level: 0,
            is_core: id == core_key,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphEdge {
    pub from: String,
    pub to: String,
    pub dependency_type: DependencyType,
}

/// The full derived graph. Rebuilt from scratch on every refresh.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DependencyGraph {
    pub nodes: BTreeMap<String, DependencyNode>,
    pub edges: Vec<GraphEdge>,
    pub levels: BTreeMap<usize, Vec<String>>,
    pub has_cycles: bool,
    /// Cyclic path segments found during level computation.
    pub cycles: Vec<Vec<String>>,
    /// BLAKE3 content hash of the collapsed active edge list.
    pub content_hash: String,
}

impl DependencyGraph {
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    #[must_use]
    pub fn node(&self, key: &str) -> Option<&DependencyNode> {
        self.nodes.get(key)
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.nodes.contains_key(key)
    }

    /// Level of `key`, or `None` for an unknown module.
    #[must_use]
    pub fn level(&self, key: &str) -> Option<usize> {
        self.nodes.get(key).map(|node| node.level)
    }

    #[must_use]
    pub fn max_level(&self) -> usize {
        self.levels.keys().next_back().copied().unwrap_or(0)
    }
}

// ---------------------------------------------------------------------------
// Construction
// ---------------------------------------------------------------------------

/// Build a [`DependencyGraph`] treating `"core"` as the sentinel root.
#[must_use]
pub fn build_graph(edges: &[DependencyEdge]) -> DependencyGraph {
    build_graph_with_core(edges, CORE_MODULE_KEY)
}

/// Build a [`DependencyGraph`] with a custom sentinel root key.
///
/// Inactive edges are skipped. A repeated `(module_key, depends_on)` pair
/// keeps only its first occurrence. Self-edges are kept and show up as
/// one-element cycles. Never fails: cyclic input is reported through
/// [`DependencyGraph::has_cycles`] and [`DependencyGraph::cycles`].
#[must_use]
#[instrument(skip_all, fields(edges = edges.len()))]
pub fn build_graph_with_core(edges: &[DependencyEdge], core_key: &str) -> DependencyGraph {
    // Step 1: active edges, repeated pairs collapsed to their first occurrence.
    let collapsed = collapse_active(edges);

    // Step 2: one node per distinct endpoint.
    let mut nodes: BTreeMap<String, DependencyNode> = BTreeMap::new();
    for edge in &collapsed {
        for key in [&edge.module_key, &edge.depends_on] {
            if !nodes.contains_key(key) {
                nodes.insert(key.clone(), DependencyNode::new(key, core_key));
            }
        }
    }

    // Step 3: direct adjacency in both directions.
    let mut graph_edges: Vec<GraphEdge> = Vec::with_capacity(collapsed.len());
    for edge in &collapsed {
        if let Some(node) = nodes.get_mut(&edge.module_key) {
            node.dependencies.push(edge.depends_on.clone());
        }
        if let Some(node) = nodes.get_mut(&edge.depends_on) {
            node.dependents.push(edge.module_key.clone());
        }
        graph_edges.push(GraphEdge {
            from: edge.module_key.clone(),
            to: edge.depends_on.clone(),
            dependency_type: edge.dependency_type,
        });
    }

    // Step 4: longest-chain levels with path-based cycle detection.
    let outcome = compute_levels(&nodes);
    for (key, level) in outcome.levels {
        if let Some(node) = nodes.get_mut(&key) {
            node.level = level;
        }
    }

    // Step 5: group by level.
    let mut levels: BTreeMap<usize, Vec<String>> = BTreeMap::new();
    for node in nodes.values() {
        levels.entry(node.level).or_default().push(node.id.clone());
    }

    let has_cycles = !outcome.cycles.is_empty();
    if has_cycles {
        warn!(cycles = outcome.cycles.len(), "dependency graph contains cycles");
    }

    let content_hash = hash_rows(&collapsed);
    debug!(
        nodes = nodes.len(),
        edges = graph_edges.len(),
        max_level = levels.keys().next_back().copied().unwrap_or(0),
        "built dependency graph"
    );

    DependencyGraph {
        nodes,
        edges: graph_edges,
        levels,
        has_cycles,
        cycles: outcome.cycles,
        content_hash,
    }
}

/// BLAKE3 hash of the edges a build would use, formatted `blake3:<hex>`.
///
/// Inactive edges and repeats of an earlier `(module_key, depends_on)` pair
/// do not affect the hash. Edge order does.
#[must_use]
pub fn edge_content_hash(edges: &[DependencyEdge]) -> String {
    hash_rows(&collapse_active(edges))
}

/// Active edges, keeping the first occurrence of each pair.
fn collapse_active(edges: &[DependencyEdge]) -> Vec<&DependencyEdge> {
    let mut seen: HashSet<(&str, &str)> = HashSet::with_capacity(edges.len());
    let mut kept: Vec<&DependencyEdge> = Vec::with_capacity(edges.len());
    for edge in edges.iter().filter(|edge| edge.is_active) {
        if seen.insert((edge.module_key.as_str(), edge.depends_on.as_str())) {
            kept.push(edge);
        }
    }
    kept
}

fn hash_rows(rows: &[&DependencyEdge]) -> String {
    let mut hasher = blake3::Hasher::new();
    for edge in rows {
        hasher.update(edge.module_key.as_bytes());
        hasher.update(b"\x00");
        hasher.update(edge.depends_on.as_bytes());
        hasher.update(b"\x00");
        hasher.update(edge.dependency_type.as_str().as_bytes());
        hasher.update(b"\x00");
    }
    format!("blake3:{}", hasher.finalize())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
