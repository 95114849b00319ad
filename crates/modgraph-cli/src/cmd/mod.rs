//! Command handlers for `mg`.

pub mod compat;
pub mod cycles;
pub mod deps;
pub mod graph;
pub mod order;
pub mod stats;
pub mod validate;

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use modgraph_core::config::EffectiveConfig;
use modgraph_core::load_snapshot;
use modgraph_graph::DependencyEngine;
use tracing::debug;

use crate::output::OutputMode;

/// Snapshot file used when neither `--snapshot` nor the user config names one.
pub const DEFAULT_SNAPSHOT: &str = "modgraph.json";

/// Everything a command needs besides its own arguments.
#[derive(Debug)]
pub struct Context {
    pub config: EffectiveConfig,
    pub snapshot_path: PathBuf,
    pub output: OutputMode,
}

impl Context {
    /// Pick the snapshot path: explicit flag, then user config, then
    /// [`DEFAULT_SNAPSHOT`] under `project_root`.
    pub fn new(
        config: EffectiveConfig,
        snapshot_flag: Option<PathBuf>,
        project_root: &Path,
        output: OutputMode,
    ) -> Self {
        let snapshot_path = snapshot_flag
            .or_else(|| config.user.snapshot.clone())
            .unwrap_or_else(|| project_root.join(DEFAULT_SNAPSHOT));
        Self {
            config,
            snapshot_path,
            output,
        }
    }

    /// Load the snapshot and build a fresh engine from it.
    pub fn engine(&self) -> anyhow::Result<DependencyEngine> {
        let snapshot = load_snapshot(&self.snapshot_path)
            .with_context(|| format!("loading snapshot {}", self.snapshot_path.display()))?;
        debug!(
            edges = snapshot.dependencies.len(),
            compatibility = snapshot.compatibility.len(),
            "snapshot loaded"
        );
        Ok(DependencyEngine::with_config(
            &snapshot,
            &self.config.project.graph,
        ))
    }
}

/// Write one key per line.
pub fn write_lines(w: &mut dyn std::io::Write, keys: &[String]) -> std::io::Result<()> {
    for key in keys {
        writeln!(w, "{key}")?;
    }
    Ok(())
}
