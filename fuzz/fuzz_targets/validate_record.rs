#![no_main]

use libfuzzer_sys::fuzz_target;
use modgraph_core::config::ValidationConfig;
use modgraph_core::{ModuleRecord, Snapshot};
use modgraph_graph::DependencyEngine;
use modgraph_validate::ConfigValidator;

const SNAPSHOT: &str = r#"{
  "dependencies": [
    { "module_key": "crm", "depends_on": "core" },
    { "module_key": "sales", "depends_on": "crm" }
  ],
  "compatibility": [
    { "module_a": "crm", "module_b": "sales", "status": "incompatible" }
  ]
}"#;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(proposed) = ModuleRecord::from_json(text) else {
        return;
    };
    let Ok(snapshot) = Snapshot::from_json(SNAPSHOT) else {
        return;
    };

    let engine = DependencyEngine::new(&snapshot);
    let validator = ConfigValidator::new(&engine, ValidationConfig::default());
    let current = ModuleRecord::new("crm", "CRM").with_features(["contacts"]);

    let result = validator.validate_module(Some(&current), &proposed);
    assert!(result.score <= 100);
    assert_eq!(result.can_save, result.issues.is_empty());

    let quick = validator.validate_quick(Some(&current), &proposed);
    assert!(quick.score >= result.score);
});
