#![no_main]

use libfuzzer_sys::fuzz_target;
use modgraph_core::Snapshot;
use modgraph_graph::DependencyEngine;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(snapshot) = Snapshot::from_json(text) else {
        return;
    };

    let engine = DependencyEngine::new(&snapshot);
    let graph = engine.graph();
    assert_eq!(graph.has_cycles, !graph.cycles.is_empty());

    let keys: Vec<String> = graph.nodes.keys().cloned().collect();
    for key in &keys {
        for dep in engine.get_module_dependencies(key) {
            assert!(graph.nodes.contains_key(&dep));
        }
        let _ = engine.get_module_dependents(key);
    }

    let order = engine.get_installation_order(&keys);
    assert_eq!(order.len(), keys.len());
    let _ = engine.cycle_reports();
});
