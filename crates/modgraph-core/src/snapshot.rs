//! Snapshot of the backing store: every dependency edge plus every
//! compatibility record.
//!
//! The snapshot is the only input the graph engine consumes. Callers refresh
//! it from their store on their own cadence and rebuild the engine from it.
//!
//! ```json
//! {
//!   "dependencies": [
//!     { "module_key": "crm", "depends_on": "core", "dependency_type": "required" }
//!   ],
//!   "compatibility": [
//!     { "module_a": "crm", "module_b": "billing", "status": "compatible" }
//!   ]
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::CoreError;
use crate::model::{CompatibilityRecord, DependencyEdge};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub dependencies: Vec<DependencyEdge>,
    #[serde(default)]
    pub compatibility: Vec<CompatibilityRecord>,
}

impl Snapshot {
    #[must_use]
    pub const fn new(
        dependencies: Vec<DependencyEdge>,
        compatibility: Vec<CompatibilityRecord>,
    ) -> Self {
        Self {
            dependencies,
            compatibility,
        }
    }

    /// Parse a snapshot from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::SnapshotParse`] if the text is not a valid snapshot.
    pub fn from_json(text: &str) -> Result<Self, CoreError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Edges that take part in graph construction.
    pub fn active_edges(&self) -> impl Iterator<Item = &DependencyEdge> {
        self.dependencies.iter().filter(|edge| edge.is_active)
    }
}

/// Load a snapshot from a JSON file.
///
/// # Errors
///
/// Returns [`CoreError::SnapshotRead`] if the file cannot be read and
/// [`CoreError::SnapshotParse`] if it is not a valid snapshot.
#[instrument]
pub fn load_snapshot(path: &Path) -> Result<Snapshot, CoreError> {
    let text = std::fs::read_to_string(path).map_err(|source| CoreError::SnapshotRead {
        path: path.to_path_buf(),
        source,
    })?;
    let snapshot = Snapshot::from_json(&text)?;
    debug!(
        edges = snapshot.dependencies.len(),
        compatibility = snapshot.compatibility.len(),
        "loaded snapshot"
    );
    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn empty_object_is_an_empty_snapshot() {
        let snapshot = Snapshot::from_json("{}").expect("parse");
        assert!(snapshot.dependencies.is_empty());
        assert!(snapshot.compatibility.is_empty());
    }

    #[test]
    fn inactive_edges_are_filtered() {
        let snapshot = Snapshot::new(
            vec![
                DependencyEdge::new("a", "b"),
                DependencyEdge::new("b", "c").inactive(),
            ],
            Vec::new(),
        );
        let active: Vec<_> = snapshot.active_edges().map(|e| e.depends_on.as_str()).collect();
        assert_eq!(active, vec!["b"]);
    }

    #[test]
    fn malformed_json_maps_to_parse_code() {
        let err = Snapshot::from_json("[1, 2").expect_err("must fail");
        assert_eq!(err.code(), ErrorCode::SnapshotParseError);
    }

    #[test]
    fn missing_file_maps_to_read_code() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = load_snapshot(&dir.path().join("nope.json")).expect_err("must fail");
        assert_eq!(err.code(), ErrorCode::SnapshotReadFailed);
    }

    #[test]
    fn load_snapshot_reads_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("snapshot.json");
        std::fs::write(
            &path,
            r#"{"dependencies":[{"module_key":"crm","depends_on":"core"}],"compatibility":[]}"#,
        )
        .expect("write");

        let snapshot = load_snapshot(&path).expect("load");
        assert_eq!(snapshot.dependencies.len(), 1);
        assert_eq!(snapshot.dependencies[0].module_key, "crm");
    }
}
