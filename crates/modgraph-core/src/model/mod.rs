//! Plain data types shared by the graph engine and the validator.

pub mod compat;
pub mod edge;
pub mod module;

pub use compat::{CompatibilityRecord, CompatibilityStatus, pair_key};
pub use edge::{DependencyEdge, DependencyType};
pub use module::{Feature, ModuleRecord};

/// Reserved key treated as the implicit root of every dependency tree.
pub const CORE_MODULE_KEY: &str = "core";
