//! Validation issue values.

use std::fmt;

use serde::Serialize;

// ---------------------------------------------------------------------------
// IssueType
// ---------------------------------------------------------------------------

/// Severity of a single finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueType {
    /// Blocks saving.
    Error,
    /// Needs confirmation but does not block saving.
    Warning,
    /// Informational nudge. Never affects score or save eligibility.
    Info,
}

impl IssueType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

impl fmt::Display for IssueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// IssueCode
// ---------------------------------------------------------------------------

/// Stable machine-readable issue code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueCode {
    MissingKey,
    MissingName,
    KeyChangeBreaking,
    FeatureRemoved,
    UnknownDependency,
    CircularDependency,
    InvalidVersion,
    CompatibilityIssue,
    MissingDescription,
    ShortDescription,
    NoFeatures,
}

impl IssueCode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MissingKey => "MISSING_KEY",
            Self::MissingName => "MISSING_NAME",
            Self::KeyChangeBreaking => "KEY_CHANGE_BREAKING",
            Self::FeatureRemoved => "FEATURE_REMOVED",
            Self::UnknownDependency => "UNKNOWN_DEPENDENCY",
            Self::CircularDependency => "CIRCULAR_DEPENDENCY",
            Self::InvalidVersion => "INVALID_VERSION",
            Self::CompatibilityIssue => "COMPATIBILITY_ISSUE",
            Self::MissingDescription => "MISSING_DESCRIPTION",
            Self::ShortDescription => "SHORT_DESCRIPTION",
            Self::NoFeatures => "NO_FEATURES",
        }
    }
}

impl fmt::Display for IssueCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ValidationIssue
// ---------------------------------------------------------------------------

/// One finding about a proposed module record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    #[serde(rename = "type")]
    pub issue_type: IssueType,
    pub code: IssueCode,
    pub message: String,
    /// Record field the issue is about, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    /// Modules impacted by this change. Only breaking issues fill this.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub affected_modules: Vec<String>,
}

impl ValidationIssue {
    #[must_use]
    pub fn new(issue_type: IssueType, code: IssueCode, message: impl Into<String>) -> Self {
        Self {
            issue_type,
            code,
            message: message.into(),
            field: None,
            suggestion: None,
            affected_modules: Vec::new(),
        }
    }

    #[must_use]
    pub fn error(code: IssueCode, message: impl Into<String>) -> Self {
        Self::new(IssueType::Error, code, message)
    }

    #[must_use]
    pub fn warning(code: IssueCode, message: impl Into<String>) -> Self {
        Self::new(IssueType::Warning, code, message)
    }

    #[must_use]
    pub fn info(code: IssueCode, message: impl Into<String>) -> Self {
        Self::new(IssueType::Info, code, message)
    }

    #[must_use]
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    #[must_use]
    pub fn with_affected(mut self, modules: Vec<String>) -> Self {
        self.affected_modules = modules;
        self
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.issue_type, self.code, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_wire_names() {
        let issue = ValidationIssue::error(IssueCode::MissingKey, "Module key is required")
            .with_field("module_key");
        let value = serde_json::to_value(&issue).expect("serialize");

        assert_eq!(value["type"], "error");
        assert_eq!(value["code"], "MISSING_KEY");
        assert_eq!(value["field"], "module_key");
        assert!(value.get("suggestion").is_none());
        assert!(value.get("affected_modules").is_none());
    }

    #[test]
    fn affected_modules_serialized_when_present() {
        let issue = ValidationIssue::warning(IssueCode::KeyChangeBreaking, "renamed")
            .with_affected(vec!["c".into()]);
        let value = serde_json::to_value(&issue).expect("serialize");
        assert_eq!(value["affected_modules"][0], "c");
    }

    #[test]
    fn code_strings_match_serde() {
        for code in [
            IssueCode::MissingKey,
            IssueCode::KeyChangeBreaking,
            IssueCode::CompatibilityIssue,
            IssueCode::NoFeatures,
        ] {
            let value = serde_json::to_value(code).expect("serialize");
            assert_eq!(value, code.as_str());
        }
    }

    #[test]
    fn display_is_compact() {
        let issue = ValidationIssue::info(IssueCode::NoFeatures, "No features defined");
        assert_eq!(issue.to_string(), "[info] NO_FEATURES: No features defined");
    }
}
