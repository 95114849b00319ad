#![forbid(unsafe_code)]
//! modgraph-core library.
//!
//! Shared data model, error codes, configuration and snapshot loading for the
//! module dependency graph engine and the configuration validator.
//!
//! # Conventions
//!
//! - **Errors**: Store-like operations return [`error::CoreError`]; loaders use `anyhow::Result`.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod config;
pub mod error;
pub mod model;
pub mod snapshot;

pub use error::{CoreError, ErrorCode};
pub use model::{
    CORE_MODULE_KEY, CompatibilityRecord, CompatibilityStatus, DependencyEdge, DependencyType,
    Feature, ModuleRecord,
};
pub use snapshot::{Snapshot, load_snapshot};
