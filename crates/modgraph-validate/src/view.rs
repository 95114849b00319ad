//! The slice of the dependency engine the validator reads.

use modgraph_core::model::{CORE_MODULE_KEY, CompatibilityRecord};
use modgraph_graph::DependencyEngine;

/// Read-only graph queries needed to validate a module change.
pub trait ModuleGraphView {
    /// Transitive dependents of `key`; empty for an unknown key.
    fn dependents_of(&self, key: &str) -> Vec<String>;

    /// Stored compatibility judgment for the unordered pair, if any.
    fn compatibility(&self, a: &str, b: &str) -> Option<&CompatibilityRecord>;

    /// Whether `key` is an endpoint of any known dependency edge.
    fn is_known_module(&self, key: &str) -> bool;

    /// Sentinel root key; a dependency on it is never reported as unknown.
    fn core_key(&self) -> &str {
        CORE_MODULE_KEY
    }
}

impl ModuleGraphView for DependencyEngine {
    fn dependents_of(&self, key: &str) -> Vec<String> {
        self.get_module_dependents(key)
    }

    fn compatibility(&self, a: &str, b: &str) -> Option<&CompatibilityRecord> {
        self.check_compatibility(a, b)
    }

    fn is_known_module(&self, key: &str) -> bool {
        Self::is_known_module(self, key)
    }

    fn core_key(&self) -> &str {
        Self::core_key(self)
    }
}
