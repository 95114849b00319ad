//! Longest-chain levels with path-based cycle detection.
//!
//! A node's level is `1 + max(level of its direct dependencies)`, or 0 when
//! it has none. The traversal is an iterative depth-first walk that keeps the
//! current path as an explicit stack, so deep chains cannot overflow the call
//! stack.
//!
//! Reaching a node that is still on the current path closes a cycle. The
//! segment of the path from that node's first occurrence up to the current
//! node is recorded, and the back-edge contributes level 0 instead of
//! propagating around the loop.

use std::collections::{BTreeMap, HashMap, HashSet};

use super::build::DependencyNode;

pub(crate) struct LevelOutcome {
    pub levels: HashMap<String, usize>,
    pub cycles: Vec<Vec<String>>,
}

/// One entry of the explicit DFS stack.
struct Frame<'a> {
    id: &'a str,
    dependencies: &'a [String],
    cursor: usize,
    max_child: Option<usize>,
}

impl<'a> Frame<'a> {
    fn new(node: &'a DependencyNode) -> Self {
        Self {
            id: node.id.as_str(),
            dependencies: node.dependencies.as_slice(),
            cursor: 0,
            max_child: None,
        }
    }

    fn next_dependency(&mut self) -> Option<&'a str> {
        let dep = self.dependencies.get(self.cursor)?;
        self.cursor += 1;
        Some(dep.as_str())
    }

    fn absorb(&mut self, level: usize) {
        self.max_child = Some(self.max_child.map_or(level, |max| max.max(level)));
    }

    fn level(&self) -> usize {
        self.max_child.map_or(0, |max| max + 1)
    }
}

pub(crate) fn compute_levels(nodes: &BTreeMap<String, DependencyNode>) -> LevelOutcome {
    let mut resolved: HashMap<&str, usize> = HashMap::with_capacity(nodes.len());
    let mut visited: HashSet<&str> = HashSet::with_capacity(nodes.len());
    let mut cycles: Vec<Vec<String>> = Vec::new();

    for start in nodes.values() {
        if visited.contains(start.id.as_str()) {
            continue;
        }

        let mut path: Vec<&str> = vec![start.id.as_str()];
        let mut on_path: HashSet<&str> = HashSet::from([start.id.as_str()]);
        let mut stack: Vec<Frame<'_>> = vec![Frame::new(start)];
        visited.insert(start.id.as_str());

        loop {
            let Some(frame) = stack.last_mut() else { break };

            if let Some(dep) = frame.next_dependency() {
                if on_path.contains(dep) {
                    let first = path.iter().position(|id| *id == dep).unwrap_or(0);
                    cycles.push(path[first..].iter().map(|id| (*id).to_string()).collect());
                    frame.absorb(0);
                } else if let Some(&level) = resolved.get(dep) {
                    frame.absorb(level);
                } else if let Some(node) = nodes.get(dep) {
                    visited.insert(node.id.as_str());
                    path.push(node.id.as_str());
                    on_path.insert(node.id.as_str());
                    stack.push(Frame::new(node));
                }
                continue;
            }

            let level = frame.level();
            let id = frame.id;
            stack.pop();
            path.pop();
            on_path.remove(id);
            resolved.insert(id, level);
            if let Some(parent) = stack.last_mut() {
                parent.absorb(level);
            }
        }
    }

    LevelOutcome {
        levels: resolved
            .into_iter()
            .map(|(id, level)| (id.to_string(), level))
            .collect(),
        cycles,
    }
}
