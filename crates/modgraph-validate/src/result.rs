//! Issue buckets, scoring and result assembly.

use serde::Serialize;

use crate::issue::ValidationIssue;

/// Issues collected during one validation run, before scoring.
#[derive(Debug, Clone, Default)]
pub struct IssueBuckets {
    /// Error-type issues.
    pub issues: Vec<ValidationIssue>,
    /// Changes that impact other modules.
    pub breaking: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
    /// Info-type nudges.
    pub suggestions: Vec<ValidationIssue>,
}

impl IssueBuckets {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Score penalties as configured.
    #[must_use]
    pub fn score(&self, error_penalty: u32, warning_penalty: u32) -> u32 {
        let blocking = saturating_u32(self.issues.len() + self.breaking.len());
        let warnings = saturating_u32(self.warnings.len());
        let penalty = blocking
            .saturating_mul(error_penalty)
            .saturating_add(warnings.saturating_mul(warning_penalty));
        100_u32.saturating_sub(penalty)
    }

    /// Fold the buckets into a [`ValidationResult`].
    #[must_use]
    pub fn finish(self, error_penalty: u32, warning_penalty: u32) -> ValidationResult {
        let score = self.score(error_penalty, warning_penalty);

        let mut affected_modules: Vec<String> = Vec::new();
        for module in self.breaking.iter().flat_map(|issue| &issue.affected_modules) {
            if !affected_modules.contains(module) {
                affected_modules.push(module.clone());
            }
        }

        ValidationResult {
            is_valid: self.issues.is_empty() && self.breaking.is_empty(),
            score,
            can_save: self.issues.is_empty(),
            requires_confirmation: !self.breaking.is_empty() || !self.warnings.is_empty(),
            issues: self.issues,
            breaking: self.breaking,
            warnings: self.warnings,
            suggestions: self.suggestions,
            affected_modules,
        }
    }
}

fn saturating_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

/// Outcome of validating one proposed module record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    /// No error-type issue and no breaking issue.
    pub is_valid: bool,
    /// 0–100.
    pub score: u32,
    /// No error-type issue. Breaking changes alone do not block saving.
    pub can_save: bool,
    /// Any breaking issue or any warning.
    pub requires_confirmation: bool,
    pub issues: Vec<ValidationIssue>,
    pub breaking: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
    pub suggestions: Vec<ValidationIssue>,
    /// Deduplicated union of modules named by breaking issues, in first-seen order.
    pub affected_modules: Vec<String>,
}

impl ValidationResult {
    /// All issues in bucket order: errors, breaking, warnings, suggestions.
    pub fn all_issues(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues
            .iter()
            .chain(&self.breaking)
            .chain(&self.warnings)
            .chain(&self.suggestions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issue::IssueCode;

    fn warning() -> ValidationIssue {
        ValidationIssue::warning(IssueCode::InvalidVersion, "bad version")
    }

    fn error() -> ValidationIssue {
        ValidationIssue::error(IssueCode::MissingKey, "missing key")
    }

    #[test]
    fn clean_buckets_score_full_marks() {
        let result = IssueBuckets::new().finish(20, 5);
        assert_eq!(result.score, 100);
        assert!(result.is_valid);
        assert!(result.can_save);
        assert!(!result.requires_confirmation);
    }

    #[test]
    fn score_subtracts_penalties() {
        let buckets = IssueBuckets {
            issues: vec![error()],
            warnings: vec![warning(), warning()],
            ..IssueBuckets::default()
        };
        assert_eq!(buckets.score(20, 5), 70);
    }

    #[test]
    fn score_clamps_at_zero() {
        let buckets = IssueBuckets {
            issues: vec![error(); 6],
            ..IssueBuckets::default()
        };
        assert_eq!(buckets.score(20, 5), 0);
    }

    #[test]
    fn suggestions_do_not_affect_anything() {
        let buckets = IssueBuckets {
            suggestions: vec![ValidationIssue::info(IssueCode::NoFeatures, "none")],
            ..IssueBuckets::default()
        };
        let result = buckets.finish(20, 5);
        assert_eq!(result.score, 100);
        assert!(result.is_valid);
        assert!(!result.requires_confirmation);
    }

    #[test]
    fn breaking_needs_confirmation_but_can_save() {
        let breaking = ValidationIssue::warning(IssueCode::KeyChangeBreaking, "renamed")
            .with_affected(vec!["c".into(), "d".into()]);
        let result = IssueBuckets {
            breaking: vec![breaking.clone(), breaking],
            ..IssueBuckets::default()
        }
        .finish(20, 5);

        assert!(!result.is_valid);
        assert!(result.can_save);
        assert!(result.requires_confirmation);
        assert_eq!(result.score, 60);
        assert_eq!(result.affected_modules, vec!["c", "d"]);
    }

    #[test]
    fn all_issues_in_bucket_order() {
        let result = IssueBuckets {
            issues: vec![error()],
            warnings: vec![warning()],
            ..IssueBuckets::default()
        }
        .finish(20, 5);
        let codes: Vec<_> = result.all_issues().map(|issue| issue.code).collect();
        assert_eq!(codes, vec![IssueCode::MissingKey, IssueCode::InvalidVersion]);
    }
}
