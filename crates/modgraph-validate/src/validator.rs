//! Pre-save validation of a proposed module record.

use modgraph_core::config::ValidationConfig;
use modgraph_core::model::ModuleRecord;
use tracing::{debug, instrument};

use crate::result::{IssueBuckets, ValidationResult};
use crate::rules;
use crate::view::ModuleGraphView;

/// Validates module changes against a dependency graph.
///
/// Never fails. Everything wrong with the input is reported as issues in the
/// returned [`ValidationResult`].
pub struct ConfigValidator<'g, V: ModuleGraphView + ?Sized> {
    view: &'g V,
    config: ValidationConfig,
}

impl<'g, V: ModuleGraphView + ?Sized> ConfigValidator<'g, V> {
    #[must_use]
    pub const fn new(view: &'g V, config: ValidationConfig) -> Self {
        Self { view, config }
    }

    #[must_use]
    pub const fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Run the full rule battery.
    ///
    /// `current` is the stored record, or `None` for a new module.
    #[must_use]
    #[instrument(skip_all, fields(module_key = proposed.key().unwrap_or_default()))]
    pub fn validate_module(
        &self,
        current: Option<&ModuleRecord>,
        proposed: &ModuleRecord,
    ) -> ValidationResult {
        let mut out = IssueBuckets::new();

        rules::check_required_fields(proposed, &mut out);
        rules::check_key_change(self.view, current, proposed, &mut out);
        rules::check_removed_features(current, proposed, &mut out);
        rules::check_unknown_dependencies(self.view, proposed, &mut out);
        rules::check_self_dependency(proposed, &mut out);
        rules::check_version(proposed, &mut out);
        rules::check_compatibility(self.view, proposed, &mut out);
        rules::check_suggestions(proposed, self.config.min_description_len, &mut out);

        self.finish(out)
    }

    /// Required fields and key-rename impact only.
    #[must_use]
    #[instrument(skip_all, fields(module_key = proposed.key().unwrap_or_default()))]
    pub fn validate_quick(
        &self,
        current: Option<&ModuleRecord>,
        proposed: &ModuleRecord,
    ) -> ValidationResult {
        let mut out = IssueBuckets::new();

        rules::check_required_fields(proposed, &mut out);
        rules::check_key_change(self.view, current, proposed, &mut out);

        self.finish(out)
    }

    fn finish(&self, out: IssueBuckets) -> ValidationResult {
        let result = out.finish(self.config.error_penalty, self.config.warning_penalty);
        debug!(
            score = result.score,
            errors = result.issues.len(),
            breaking = result.breaking.len(),
            warnings = result.warnings.len(),
            suggestions = result.suggestions.len(),
            can_save = result.can_save,
            "validation complete"
        );
        result
    }
}
