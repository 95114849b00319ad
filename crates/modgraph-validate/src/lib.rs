#![forbid(unsafe_code)]
//! modgraph-validate library.
//!
//! Checks a proposed module configuration record against its stored version
//! and the current dependency graph before the caller persists it.
//!
//! ```rust
//! use modgraph_core::{DependencyEdge, ModuleRecord, Snapshot};
//! use modgraph_core::config::ValidationConfig;
//! use modgraph_graph::DependencyEngine;
//! use modgraph_validate::ConfigValidator;
//!
//! let engine = DependencyEngine::new(&Snapshot::new(
//!     vec![DependencyEdge::new("sales", "crm")],
//!     Vec::new(),
//! ));
//! let validator = ConfigValidator::new(&engine, ValidationConfig::default());
//!
//! let result = validator.validate_module(
//!     Some(&ModuleRecord::new("crm", "CRM")),
//!     &ModuleRecord::new("contacts", "CRM"),
//! );
//! assert!(result.can_save);
//! assert!(result.requires_confirmation);
//! assert_eq!(result.affected_modules, vec!["sales"]);
//! ```
//!
//! # Conventions
//!
//! - **Errors**: Validation never fails; problems are data in [`ValidationResult`].
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod issue;
pub mod result;
pub mod rules;
pub mod validator;
pub mod view;

pub use issue::{IssueCode, IssueType, ValidationIssue};
pub use result::{IssueBuckets, ValidationResult};
pub use validator::ConfigValidator;
pub use view::ModuleGraphView;
