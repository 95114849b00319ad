//! Individual checks, each appending to an [`IssueBuckets`].
//!
//! Checks read records through the lenient accessors on [`ModuleRecord`], so
//! malformed input turns into issues rather than failures.

use std::collections::HashSet;
use std::sync::LazyLock;

use modgraph_core::model::{CompatibilityStatus, ModuleRecord};
use regex_lite::Regex;

use crate::issue::{IssueCode, ValidationIssue};
use crate::result::IssueBuckets;
use crate::view::ModuleGraphView;

static SEMVER: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"^\d+\.\d+\.\d+$").ok());

/// Strict `MAJOR.MINOR.PATCH`, digits only.
#[must_use]
pub fn is_strict_semver(version: &str) -> bool {
    SEMVER.as_ref().is_some_and(|re| re.is_match(version))
}

pub fn check_required_fields(proposed: &ModuleRecord, out: &mut IssueBuckets) {
    if proposed.key().is_none() {
        out.issues.push(
            ValidationIssue::error(IssueCode::MissingKey, "Module key is required")
                .with_field("module_key"),
        );
    }
    if proposed.name().is_none() {
        out.issues.push(
            ValidationIssue::error(IssueCode::MissingName, "Module name is required")
                .with_field("module_name"),
        );
    }
}

pub fn check_key_change<V: ModuleGraphView + ?Sized>(
    view: &V,
    current: Option<&ModuleRecord>,
    proposed: &ModuleRecord,
    out: &mut IssueBuckets,
) {
    let Some(old_key) = current.and_then(ModuleRecord::key) else {
        return;
    };
    if proposed.key() == Some(old_key) {
        return;
    }

    let dependents = view.dependents_of(old_key);
    if dependents.is_empty() {
        return;
    }

    let new_key = proposed.key().unwrap_or_default();
    out.breaking.push(
        ValidationIssue::warning(
            IssueCode::KeyChangeBreaking,
            format!(
                "Changing module key from '{old_key}' to '{new_key}' affects {} dependent module(s)",
                dependents.len()
            ),
        )
        .with_field("module_key")
        .with_suggestion("Update the dependent modules or keep the existing key")
        .with_affected(dependents),
    );
}

pub fn check_removed_features(
    current: Option<&ModuleRecord>,
    proposed: &ModuleRecord,
    out: &mut IssueBuckets,
) {
    let Some(current) = current else { return };
    let kept: HashSet<&str> = proposed.feature_keys().collect();
    let mut reported: HashSet<&str> = HashSet::new();

    for key in current.feature_keys() {
        if kept.contains(key) || !reported.insert(key) {
            continue;
        }
        out.warnings.push(
            ValidationIssue::warning(
                IssueCode::FeatureRemoved,
                format!("Feature '{key}' is being removed"),
            )
            .with_field("features")
            .with_suggestion("Make sure no workflow still relies on this feature"),
        );
    }
}

pub fn check_unknown_dependencies<V: ModuleGraphView + ?Sized>(
    view: &V,
    proposed: &ModuleRecord,
    out: &mut IssueBuckets,
) {
    for dep in proposed.dependencies() {
        if dep == view.core_key() || view.is_known_module(dep) {
            continue;
        }
        out.warnings.push(
            ValidationIssue::warning(
                IssueCode::UnknownDependency,
                format!("Dependency '{dep}' is not a known module"),
            )
            .with_field("dependencies"),
        );
    }
}

pub fn check_self_dependency(proposed: &ModuleRecord, out: &mut IssueBuckets) {
    let Some(key) = proposed.key() else { return };
    if proposed.dependencies().iter().any(|dep| dep == key) {
        out.issues.push(
            ValidationIssue::error(
                IssueCode::CircularDependency,
                format!("Module '{key}' cannot depend on itself"),
            )
            .with_field("dependencies"),
        );
    }
}

pub fn check_version(proposed: &ModuleRecord, out: &mut IssueBuckets) {
    let Some(version) = proposed.version() else {
        return;
    };
    if !is_strict_semver(version) {
        out.warnings.push(
            ValidationIssue::warning(
                IssueCode::InvalidVersion,
                format!("Version '{version}' is not in MAJOR.MINOR.PATCH form"),
            )
            .with_field("version")
            .with_suggestion("Use a version such as 1.0.0"),
        );
    }
}

pub fn check_compatibility<V: ModuleGraphView + ?Sized>(
    view: &V,
    proposed: &ModuleRecord,
    out: &mut IssueBuckets,
) {
    let Some(key) = proposed.key() else { return };

    for dependent in view.dependents_of(key) {
        let Some(record) = view.compatibility(key, &dependent) else {
            continue;
        };
        if record.status != CompatibilityStatus::Incompatible {
            continue;
        }

        let mut issue = ValidationIssue::warning(
            IssueCode::CompatibilityIssue,
            format!("Module '{key}' is marked incompatible with dependent '{dependent}'"),
        );
        if let Some(notes) = record.notes.as_deref() {
            issue = issue.with_suggestion(notes);
        }
        out.warnings.push(issue);
    }
}

pub fn check_suggestions(proposed: &ModuleRecord, min_description_len: usize, out: &mut IssueBuckets) {
    match proposed.description() {
        None => out.suggestions.push(
            ValidationIssue::info(IssueCode::MissingDescription, "Add a description")
                .with_field("description"),
        ),
        Some(text) if text.chars().count() < min_description_len => out.suggestions.push(
            ValidationIssue::info(
                IssueCode::ShortDescription,
                format!("Description is shorter than {min_description_len} characters"),
            )
            .with_field("description"),
        ),
        Some(_) => {}
    }

    if proposed.features().is_empty() {
        out.suggestions.push(
            ValidationIssue::info(IssueCode::NoFeatures, "No features defined")
                .with_field("features"),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn semver_pattern_compiles() {
        assert!(SEMVER.is_some());
    }

    #[test]
    fn semver_shape() {
        assert!(is_strict_semver("1.2.3"));
        assert!(is_strict_semver("10.0.42"));
        assert!(!is_strict_semver("1.0"));
        assert!(!is_strict_semver("v1.2.3"));
        assert!(!is_strict_semver("1.2.3-beta"));
        assert!(!is_strict_semver("1..3"));
    }

    #[test]
    fn removed_feature_reported_once() {
        let current = ModuleRecord::new("crm", "CRM").with_features(["leads", "leads", "deals"]);
        let proposed = ModuleRecord::new("crm", "CRM").with_features(["deals"]);
        let mut out = IssueBuckets::new();

        check_removed_features(Some(&current), &proposed, &mut out);

        assert_eq!(out.warnings.len(), 1);
        assert_eq!(out.warnings[0].message, "Feature 'leads' is being removed");
    }

    #[test]
    fn description_length_counts_characters() {
        let proposed = ModuleRecord::new("crm", "CRM")
            .with_description("ééééééééééééééééééé")
            .with_features(["leads"]);
        let mut out = IssueBuckets::new();

        check_suggestions(&proposed, 20, &mut out);

        assert_eq!(out.suggestions.len(), 1);
        assert_eq!(out.suggestions[0].code, IssueCode::ShortDescription);
    }
}
