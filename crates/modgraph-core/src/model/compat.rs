//! Pairwise compatibility judgments between modules.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CompatibilityStatus {
    Compatible,
    Partial,
    Incompatible,
    #[default]
    Unknown,
    Testing,
}

impl CompatibilityStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Compatible => "compatible",
            Self::Partial => "partial",
            Self::Incompatible => "incompatible",
            Self::Unknown => "unknown",
            Self::Testing => "testing",
        }
    }
}

impl fmt::Display for CompatibilityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A judgment about an unordered pair of modules.
///
/// `(module_a, module_b)` and `(module_b, module_a)` describe the same pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompatibilityRecord {
    pub module_a: String,
    pub module_b: String,
    #[serde(default)]
    pub status: CompatibilityStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl CompatibilityRecord {
    pub fn new(
        module_a: impl Into<String>,
        module_b: impl Into<String>,
        status: CompatibilityStatus,
    ) -> Self {
        Self {
            module_a: module_a.into(),
            module_b: module_b.into(),
            status,
            score: None,
            notes: None,
        }
    }

    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    #[must_use]
    pub const fn with_score(mut self, score: f64) -> Self {
        self.score = Some(score);
        self
    }

    /// Canonical key for the unordered pair (smaller key first).
    #[must_use]
    pub fn pair_key(&self) -> (String, String) {
        pair_key(&self.module_a, &self.module_b)
    }

    /// Returns `true` if this record describes `a` and `b` in either order.
    #[must_use]
    pub fn involves(&self, a: &str, b: &str) -> bool {
        (self.module_a == a && self.module_b == b) || (self.module_a == b && self.module_b == a)
    }
}

/// Order-independent key for a pair of module keys.
#[must_use]
pub fn pair_key(a: &str, b: &str) -> (String, String) {
    if a <= b {
        (a.to_string(), b.to_string())
    } else {
        (b.to_string(), a.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pair_key_ignores_order() {
        assert_eq!(pair_key("b", "a"), pair_key("a", "b"));
        assert_eq!(pair_key("a", "b"), ("a".to_string(), "b".to_string()));
    }

    #[test]
    fn involves_matches_both_orderings() {
        let rec = CompatibilityRecord::new("crm", "billing", CompatibilityStatus::Partial);
        assert!(rec.involves("crm", "billing"));
        assert!(rec.involves("billing", "crm"));
        assert!(!rec.involves("crm", "crm"));
    }

    #[test]
    fn status_defaults_to_unknown() {
        let rec: CompatibilityRecord =
            serde_json::from_str(r#"{"module_a":"a","module_b":"b"}"#).expect("parse");
        assert_eq!(rec.status, CompatibilityStatus::Unknown);
    }
}
