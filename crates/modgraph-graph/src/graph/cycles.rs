//! Cycle pre-checks and cycle break suggestions.
//!
//! # Edge Direction
//!
//! Edges run `module_key → depends_on`. Adding a new edge `from → to` would
//! create a cycle if `from` is already reachable from `to` through existing
//! dependencies.
//!
//! The level pass in [`super::build`] already records the cyclic path
//! segments it trips over. This module answers the follow-up questions: would
//! a new edge close a loop, and which existing edges should go to open each
//! loop again.

use std::collections::{HashMap, HashSet, VecDeque};

use modgraph_core::model::DependencyType;
use petgraph::Direction;
use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use serde::Serialize;

use super::build::DependencyGraph;

/// Check whether adding `from → to` would introduce a dependency cycle.
///
/// Returns a concrete cycle path when a cycle would be created, formatted as:
/// `from -> to -> ... -> from`.
///
/// If the edge already exists, this returns `None` (no *new* cycle is created).
#[must_use]
pub fn would_create_cycle(graph: &DependencyGraph, from: &str, to: &str) -> Option<Vec<String>> {
    if from == to {
        return Some(vec![from.to_string(), to.to_string()]);
    }

    if graph
        .node(from)
        .is_some_and(|node| node.dependencies.iter().any(|dep| dep == to))
    {
        return None;
    }

    // BFS from `to` looking for `from`.
    let mut queue: VecDeque<&str> = VecDeque::from([to]);
    let mut visited: HashSet<&str> = HashSet::from([to]);
    let mut parent: HashMap<&str, &str> = HashMap::new();

    while let Some(current) = queue.pop_front() {
        if current == from {
            return Some(reconstruct_cycle_path(from, to, &parent));
        }

        let Some(node) = graph.node(current) else {
            continue;
        };
        for next in &node.dependencies {
            if visited.insert(next.as_str()) {
                parent.insert(next.as_str(), current);
                queue.push_back(next.as_str());
            }
        }
    }

    None
}

fn reconstruct_cycle_path(from: &str, to: &str, parent: &HashMap<&str, &str>) -> Vec<String> {
    // Parent links describe `to -> ... -> from`; walk them back from `from`.
    let mut to_to_from: Vec<&str> = vec![from];
    let mut cursor = from;

    while cursor != to {
        let Some(next) = parent.get(cursor) else { break };
        cursor = *next;
        to_to_from.push(cursor);
    }

    to_to_from.reverse();

    let mut cycle: Vec<String> = Vec::with_capacity(to_to_from.len() + 1);
    cycle.push(from.to_string());
    cycle.extend(to_to_from.into_iter().map(str::to_string));
    cycle
}

// ---------------------------------------------------------------------------
// Cycle break suggestions
// ---------------------------------------------------------------------------

/// A detected dependency cycle with suggested edges to remove to break it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CycleReport {
    /// Sorted module keys that form this cycle (members of the SCC).
    pub members: Vec<String>,
    /// Suggested `(module_key, depends_on)` edges to remove.
    ///
    /// These are back-edges found by a DFS inside the SCC. Removing all of
    /// them makes the SCC acyclic; usually one is enough.
    pub suggested_breaks: Vec<(String, String)>,
}

/// Mirror a [`DependencyGraph`] into a petgraph `DiGraph` (`module_key → depends_on`).
#[must_use]
pub fn to_petgraph(graph: &DependencyGraph) -> (DiGraph<String, DependencyType>, HashMap<String, NodeIndex>) {
    let mut pg = DiGraph::<String, DependencyType>::with_capacity(graph.node_count(), graph.edge_count());
    let mut index: HashMap<String, NodeIndex> = HashMap::with_capacity(graph.node_count());

    for key in graph.nodes.keys() {
        index.insert(key.clone(), pg.add_node(key.clone()));
    }
    for edge in &graph.edges {
        if let (Some(&from), Some(&to)) = (index.get(&edge.from), index.get(&edge.to)) {
            pg.add_edge(from, to, edge.dependency_type);
        }
    }

    (pg, index)
}

/// Detect all cycles and, for each, suggest edges to remove to break them.
///
/// Tarjan's SCC identifies cycle members, then a DFS inside each SCC
/// collects back-edges. Self-loops are reported with the single edge
/// `(id, id)` as the break.
#[must_use]
pub fn report_cycles_with_breaks(graph: &DependencyGraph) -> Vec<CycleReport> {
    let (pg, _) = to_petgraph(graph);

    let mut reports: Vec<CycleReport> = tarjan_scc(&pg)
        .into_iter()
        .filter(|component| {
            component.len() > 1
                || component
                    .first()
                    .is_some_and(|node| pg.find_edge(*node, *node).is_some())
        })
        .map(|component| {
            let mut members: Vec<String> = component.iter().map(|&idx| pg[idx].clone()).collect();
            members.sort_unstable();

            if component.len() == 1 {
                let id = members[0].clone();
                return CycleReport {
                    members,
                    suggested_breaks: vec![(id.clone(), id)],
                };
            }

            let member_set: HashSet<NodeIndex> = component.iter().copied().collect();
            let suggested_breaks = find_back_edges_in_scc(&pg, &component, &member_set);

            CycleReport {
                members,
                suggested_breaks,
            }
        })
        .collect();

    reports.sort_unstable_by(|a, b| a.members.cmp(&b.members));
    reports
}

/// Iterative DFS within one SCC collecting back-edges (edges to an ancestor
/// on the current DFS path).
fn find_back_edges_in_scc(
    pg: &DiGraph<String, DependencyType>,
    component: &[NodeIndex],
    member_set: &HashSet<NodeIndex>,
) -> Vec<(String, String)> {
    let scc_neighbors = |idx: NodeIndex| -> Vec<NodeIndex> {
        let mut out: Vec<NodeIndex> = pg
            .neighbors_directed(idx, Direction::Outgoing)
            .filter(|n| member_set.contains(n))
            .collect();
        // petgraph yields neighbors newest-first; visit them in key order.
        out.sort_unstable_by(|a, b| pg[*a].cmp(&pg[*b]));
        out
    };

    // Start points in key order for determinism.
    let mut starts: Vec<NodeIndex> = component.to_vec();
    starts.sort_unstable_by(|a, b| pg[*a].cmp(&pg[*b]));

    let mut visited: HashSet<NodeIndex> = HashSet::new();
    let mut ancestors: HashSet<NodeIndex> = HashSet::new();
    let mut back_edges: Vec<(String, String)> = Vec::new();
    let mut call_stack: Vec<(NodeIndex, Vec<NodeIndex>, usize)> = Vec::new();

    for start in starts {
        if !visited.insert(start) {
            continue;
        }
        ancestors.insert(start);
        call_stack.push((start, scc_neighbors(start), 0));

        loop {
            let Some(frame) = call_stack.last_mut() else { break };
            let current = frame.0;

            if let Some(&neighbor) = frame.1.get(frame.2) {
                frame.2 += 1;
                if ancestors.contains(&neighbor) {
                    back_edges.push((pg[current].clone(), pg[neighbor].clone()));
                } else if visited.insert(neighbor) {
                    ancestors.insert(neighbor);
                    call_stack.push((neighbor, scc_neighbors(neighbor), 0));
                }
            } else {
                call_stack.pop();
                ancestors.remove(&current);
            }
        }
    }

    back_edges.sort_unstable();
    back_edges
}
