//! Directed "module depends on module" edges as supplied by the backing store.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How strongly a module relies on one of its dependencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DependencyType {
    #[default]
    Required,
    Optional,
    Peer,
    Dev,
}

impl DependencyType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::Optional => "optional",
            Self::Peer => "peer",
            Self::Dev => "dev",
        }
    }
}

impl fmt::Display for DependencyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A directed edge: `module_key` depends on `depends_on`.
///
/// Only edges with `is_active = true` take part in graph construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyEdge {
    pub module_key: String,
    pub depends_on: String,
    #[serde(default)]
    pub dependency_type: DependencyType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_version: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl DependencyEdge {
    /// An active, required edge with no version bounds.
    pub fn new(module_key: impl Into<String>, depends_on: impl Into<String>) -> Self {
        Self {
            module_key: module_key.into(),
            depends_on: depends_on.into(),
            dependency_type: DependencyType::Required,
            min_version: None,
            max_version: None,
            is_active: true,
        }
    }

    #[must_use]
    pub const fn with_type(mut self, dependency_type: DependencyType) -> Self {
        self.dependency_type = dependency_type;
        self
    }

    #[must_use]
    pub const fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }

    /// Returns `true` when the edge points a module at itself.
    #[must_use]
    pub fn is_self_loop(&self) -> bool {
        self.module_key == self.depends_on
    }
}

const fn default_true() -> bool {
    true
}
