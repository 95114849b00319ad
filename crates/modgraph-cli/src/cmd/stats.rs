//! `mg stats`: graph shape summary.

use std::io::Write;

use clap::Args;
use modgraph_graph::GraphSummary;

use super::Context;
use crate::output::{pretty_kv, pretty_section, render_mode};

/// Arguments for `mg stats`.
#[derive(Args, Debug, Default)]
pub struct StatsArgs {}

/// Execute `mg stats`.
pub fn run_stats(_args: &StatsArgs, ctx: &Context) -> anyhow::Result<()> {
    let engine = ctx.engine()?;
    render_mode(
        ctx.output,
        &engine.summary(),
        render_stats_text,
        render_stats_human,
    )
}

fn render_stats_text(summary: &GraphSummary, w: &mut dyn Write) -> std::io::Result<()> {
    writeln!(
        w,
        "nodes={} edges={} max_level={} roots={} leaves={} cycles={} core={} hash={}",
        summary.node_count,
        summary.edge_count,
        summary.max_level,
        summary.root_count,
        summary.leaf_count,
        summary.cycle_count,
        summary.has_core,
        summary.content_hash
    )
}

fn render_stats_human(summary: &GraphSummary, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, "Graph summary")?;
    pretty_kv(w, "modules", summary.node_count.to_string())?;
    pretty_kv(w, "edges", summary.edge_count.to_string())?;
    pretty_kv(w, "max level", summary.max_level.to_string())?;
    pretty_kv(w, "roots", summary.root_count.to_string())?;
    pretty_kv(w, "leaves", summary.leaf_count.to_string())?;
    pretty_kv(w, "cycles", summary.cycle_count.to_string())?;
    pretty_kv(w, "core present", if summary.has_core { "yes" } else { "no" })?;
    pretty_kv(w, "content hash", &summary.content_hash)
}

#[cfg(test)]
mod tests {
    use super::*;
    use modgraph_core::DependencyEdge;
    use modgraph_graph::graph::build_graph;

    #[test]
    fn text_output_is_one_line() {
        let graph = build_graph(&[DependencyEdge::new("crm", "core")]);
        let summary = GraphSummary::from_graph(&graph);
        let mut buf = Vec::new();
        render_stats_text(&summary, &mut buf).expect("render");
        let text = String::from_utf8(buf).expect("utf8");
        assert_eq!(text.lines().count(), 1);
        assert!(text.starts_with("nodes=2 edges=1 max_level=1"));
        assert!(text.contains("core=true"));
        assert!(text.contains("hash=blake3:"));
    }
}
