#![forbid(unsafe_code)]
//! modgraph-graph library.
//!
//! Builds an in-memory dependency graph from a flat list of module edges and
//! answers transitive-dependency, transitive-dependent, cycle, compatibility
//! and installation-order queries against it.
//!
//! # Conventions
//!
//! - **Errors**: Building and querying never fail; registry mutations return
//!   [`modgraph_core::CoreError`].
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod cache;
pub mod compat;
pub mod engine;
pub mod graph;
pub mod registry;

pub use cache::GraphCache;
pub use compat::CompatibilityMatrix;
pub use engine::DependencyEngine;
pub use graph::{CycleReport, DependencyGraph, DependencyNode, GraphEdge, GraphSummary};
pub use registry::ModuleRegistry;
