//! Transitive queries and installation ordering over a built graph.
//!
//! All queries are total: unknown keys produce empty results and cycles
//! terminate because every node is expanded at most once.

use std::collections::HashSet;

use super::build::{DependencyGraph, DependencyNode};

/// Everything `key` depends on, directly or transitively, in depth-first
/// discovery order.
///
/// `key` itself is only included when it sits on a cycle reachable from
/// itself.
#[must_use]
pub fn transitive_dependencies(graph: &DependencyGraph, key: &str) -> Vec<String> {
    closure(graph, key, |node| node.dependencies.as_slice())
}

/// Everything that depends on `key`, directly or transitively.
#[must_use]
pub fn transitive_dependents(graph: &DependencyGraph, key: &str) -> Vec<String> {
    closure(graph, key, |node| node.dependents.as_slice())
}

fn closure<'g>(
    graph: &'g DependencyGraph,
    key: &str,
    next: impl Fn(&'g DependencyNode) -> &'g [String],
) -> Vec<String> {
    let Some(start) = graph.nodes.get(key) else {
        return Vec::new();
    };

    let mut seen: HashSet<&str> = HashSet::new();
    let mut out: Vec<String> = Vec::new();
    let mut stack: Vec<&str> = next(start).iter().rev().map(String::as_str).collect();

    while let Some(id) = stack.pop() {
        if !seen.insert(id) {
            continue;
        }
        out.push(id.to_string());
        if let Some(node) = graph.nodes.get(id) {
            stack.extend(next(node).iter().rev().map(String::as_str));
        }
    }

    out
}

/// Reorder `candidates` so each module follows its dependencies that are
/// also candidates.
///
/// Post-order depth-first walk seeded from each candidate in input order.
/// Dependencies outside the candidate set are treated as already installed.
/// Every candidate is emitted exactly once; unknown keys are emitted where
/// they are first reached.
///
/// When the candidates contain a cycle the members come out in first-reached
/// order. That order is not a contract.
#[must_use]
pub fn installation_order<S: AsRef<str>>(graph: &DependencyGraph, candidates: &[S]) -> Vec<String> {
    let seeds: Vec<&str> = candidates.iter().map(AsRef::as_ref).collect();
    let candidate_set: HashSet<&str> = seeds.iter().copied().collect();
    let mut visited: HashSet<&str> = HashSet::with_capacity(candidate_set.len());
    let mut order: Vec<String> = Vec::with_capacity(candidate_set.len());

    for seed in seeds {
        if !visited.insert(seed) {
            continue;
        }

        // (module, index of the next dependency to inspect)
        let mut stack: Vec<(&str, usize)> = vec![(seed, 0)];
        loop {
            let Some(top) = stack.last_mut() else { break };
            let id = top.0;
            let deps = graph
                .nodes
                .get(id)
                .map_or(&[][..], |node| node.dependencies.as_slice());

            if let Some(dep) = deps.get(top.1) {
                top.1 += 1;
                let dep = dep.as_str();
                if candidate_set.contains(dep) && visited.insert(dep) {
                    stack.push((dep, 0));
                }
            } else {
                order.push(id.to_string());
                stack.pop();
            }
        }
    }

    order
}
