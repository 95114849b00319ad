use std::fmt;
use std::path::PathBuf;

/// Machine-readable error codes for agent-friendly decision making.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ConfigParseError,
    SnapshotReadFailed,
    SnapshotParseError,
    ModuleNotFound,
    CycleDetected,
    DuplicateDependency,
    SelfDependency,
    DependencyNotFound,
    InternalUnexpected,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::ConfigParseError => "E1002",
            Self::SnapshotReadFailed => "E1003",
            Self::SnapshotParseError => "E1004",
            Self::ModuleNotFound => "E2001",
            Self::CycleDetected => "E2003",
            Self::DuplicateDependency => "E2006",
            Self::SelfDependency => "E2007",
            Self::DependencyNotFound => "E2008",
            Self::InternalUnexpected => "E9001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::ConfigParseError => "Config file parse error",
            Self::SnapshotReadFailed => "Snapshot file could not be read",
            Self::SnapshotParseError => "Snapshot file parse error",
            Self::ModuleNotFound => "Module not found",
            Self::CycleDetected => "Cycle would be created",
            Self::DuplicateDependency => "Dependency already exists",
            Self::SelfDependency => "Module cannot depend on itself",
            Self::DependencyNotFound => "Dependency not found",
            Self::InternalUnexpected => "Internal unexpected error",
        }
    }

    /// Optional remediation hint that can be surfaced to operators and agents.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::ConfigParseError => Some("Fix syntax in .modgraph/config.toml and retry."),
            Self::SnapshotReadFailed => Some("Check the --snapshot path and read permissions."),
            Self::SnapshotParseError => {
                Some("The snapshot must be a JSON object with `dependencies` and `compatibility` arrays.")
            }
            Self::ModuleNotFound => Some("Check the module key spelling or the --snapshot file."),
            Self::CycleDetected => Some("Remove/adjust dependency links to keep the graph acyclic."),
            Self::DuplicateDependency => None,
            Self::SelfDependency => Some("Drop the module's own key from its dependency list."),
            Self::DependencyNotFound => Some("Run `mg deps <key>` to list existing dependencies."),
            Self::InternalUnexpected => Some("Retry once. If persistent, report a bug with logs."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Failures raised by store-like operations (loading, registry mutation).
///
/// Graph building, graph queries, and validation never produce these: their
/// anomalies are returned as data.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("failed to read snapshot {path}: {source}")]
    SnapshotRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse snapshot: {0}")]
    SnapshotParse(#[from] serde_json::Error),

    #[error("module '{module_key}' already depends on '{depends_on}'")]
    DuplicateDependency {
        module_key: String,
        depends_on: String,
    },

    #[error("module '{0}' is not in the dependency graph")]
    ModuleNotFound(String),

    #[error("module '{0}' cannot depend on itself")]
    SelfDependency(String),

    #[error("dependency would create a cycle: {}", .path.join(" -> "))]
    CycleDetected { path: Vec<String> },

    #[error("module '{module_key}' has no dependency on '{depends_on}'")]
    DependencyNotFound {
        module_key: String,
        depends_on: String,
    },
}

impl CoreError {
    /// The stable [`ErrorCode`] for this failure.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::SnapshotRead { .. } => ErrorCode::SnapshotReadFailed,
            Self::SnapshotParse(_) => ErrorCode::SnapshotParseError,
            Self::DuplicateDependency { .. } => ErrorCode::DuplicateDependency,
            Self::ModuleNotFound(_) => ErrorCode::ModuleNotFound,
            Self::SelfDependency(_) => ErrorCode::SelfDependency,
            Self::CycleDetected { .. } => ErrorCode::CycleDetected,
            Self::DependencyNotFound { .. } => ErrorCode::DependencyNotFound,
        }
    }

    /// Remediation text for display, falling back to the code summary.
    #[must_use]
    pub fn suggestion(&self) -> String {
        let code = self.code();
        code.hint().unwrap_or(code.message()).to_string()
    }
}
