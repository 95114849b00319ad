use proptest::prelude::*;

use modgraph_core::config::ValidationConfig;
use modgraph_core::{DependencyEdge, ModuleRecord, Snapshot};
use modgraph_graph::DependencyEngine;
use modgraph_validate::{ConfigValidator, IssueType};

// ---------------------------------------------------------------------------
// Generators
// ---------------------------------------------------------------------------

const KEYS: [&str; 6] = ["", "core", "crm", "sales", "reports", "ghost"];

fn arb_key() -> impl Strategy<Value = &'static str> {
    prop::sample::select(KEYS.to_vec())
}

fn arb_record() -> impl Strategy<Value = ModuleRecord> {
    (
        prop::option::of(arb_key()),
        prop::option::of(prop_oneof![Just(""), Just("CRM")]),
        prop::option::of("[a-z ]{0,30}"),
        prop::option::of(prop::collection::vec(arb_key(), 0..4)),
        prop::option::of(prop::collection::vec(arb_key(), 0..4)),
        prop::option::of(prop_oneof![Just("1.0.0".to_string()), "[0-9.a-z]{0,7}"]),
    )
        .prop_map(|(key, name, description, features, dependencies, version)| {
            let mut record = ModuleRecord {
                module_key: key.map(str::to_string),
                module_name: name.map(str::to_string),
                description,
                dependencies: dependencies
                    .map(|deps| deps.into_iter().map(str::to_string).collect()),
                version,
                ..ModuleRecord::default()
            };
            if let Some(keys) = features {
                record = record.with_features(keys);
            }
            record
        })
}

fn engine() -> DependencyEngine {
    DependencyEngine::new(&Snapshot::new(
        vec![
            DependencyEdge::new("crm", "core"),
            DependencyEdge::new("sales", "crm"),
            DependencyEdge::new("reports", "sales"),
        ],
        Vec::new(),
    ))
}

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(512))]

    #[test]
    fn result_fields_follow_the_buckets(
        current in prop::option::of(arb_record()),
        proposed in arb_record(),
    ) {
        let engine = engine();
        let validator = ConfigValidator::new(&engine, ValidationConfig::default());
        let result = validator.validate_module(current.as_ref(), &proposed);

        let errors = result.issues.len();
        let breaking = result.breaking.len();
        let warnings = result.warnings.len();

        prop_assert!(result.score <= 100);
        let expected = 100_i64 - 20 * i64::try_from(errors + breaking).unwrap_or(i64::MAX / 40)
            - 5 * i64::try_from(warnings).unwrap_or(i64::MAX / 10);
        prop_assert_eq!(i64::from(result.score), expected.clamp(0, 100));

        prop_assert_eq!(result.can_save, errors == 0);
        prop_assert_eq!(result.is_valid, errors == 0 && breaking == 0);
        prop_assert_eq!(result.requires_confirmation, breaking > 0 || warnings > 0);

        prop_assert!(result.issues.iter().all(|i| i.issue_type == IssueType::Error));
        prop_assert!(result.suggestions.iter().all(|i| i.issue_type == IssueType::Info));
        prop_assert!(result.warnings.iter().all(|i| i.issue_type == IssueType::Warning));
    }

    #[test]
    fn quick_is_a_prefix_of_full(
        current in prop::option::of(arb_record()),
        proposed in arb_record(),
    ) {
        let engine = engine();
        let validator = ConfigValidator::new(&engine, ValidationConfig::default());
        let quick = validator.validate_quick(current.as_ref(), &proposed);
        let full = validator.validate_module(current.as_ref(), &proposed);

        prop_assert_eq!(&quick.breaking, &full.breaking);
        prop_assert_eq!(&quick.affected_modules, &full.affected_modules);
        prop_assert!(quick.issues.iter().all(|issue| full.issues.contains(issue)));
        prop_assert!(quick.score >= full.score);
    }
}
