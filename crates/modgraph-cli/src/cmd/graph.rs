//! `mg graph`: the full derived dependency graph.

use std::io::Write;

use clap::Args;
use modgraph_graph::DependencyGraph;

use super::Context;
use crate::output::{pretty_section, render_mode};

/// Arguments for `mg graph`.
#[derive(Args, Debug, Default)]
pub struct GraphArgs {}

/// Execute `mg graph`.
pub fn run_graph(_args: &GraphArgs, ctx: &Context) -> anyhow::Result<()> {
    let engine = ctx.engine()?;
    render_mode(ctx.output, engine.graph(), render_graph_text, render_graph_human)
}

fn render_graph_text(graph: &DependencyGraph, w: &mut dyn Write) -> std::io::Result<()> {
    for (level, keys) in &graph.levels {
        writeln!(w, "{level}\t{}", keys.join(" "))?;
    }
    for cycle in &graph.cycles {
        writeln!(w, "cycle\t{}", cycle.join(" "))?;
    }
    Ok(())
}

fn render_graph_human(graph: &DependencyGraph, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(
        w,
        &format!(
            "Dependency graph: {} modules, {} edges",
            graph.node_count(),
            graph.edge_count()
        ),
    )?;

    for (level, keys) in &graph.levels {
        writeln!(w, "Level {level}:")?;
        for key in keys {
            let Some(node) = graph.node(key) else { continue };
            let marker = if node.is_core { " [core]" } else { "" };
            if node.dependencies.is_empty() {
                writeln!(w, "  {key}{marker}")?;
            } else {
                writeln!(w, "  {key}{marker} -> {}", node.dependencies.join(", "))?;
            }
        }
    }

    if graph.has_cycles {
        writeln!(w)?;
        writeln!(w, "Cycles ({}):", graph.cycles.len())?;
        for cycle in &graph.cycles {
            writeln!(w, "  {}", cycle.join(" -> "))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use modgraph_core::DependencyEdge;
    use modgraph_graph::graph::build_graph;

    #[test]
    fn text_output_lists_levels_then_cycles() {
        let graph = build_graph(&[
            DependencyEdge::new("A", "B"),
            DependencyEdge::new("C", "D"),
            DependencyEdge::new("D", "C"),
        ]);
        let mut buf = Vec::new();
        render_graph_text(&graph, &mut buf).expect("render");
        let text = String::from_utf8(buf).expect("utf8");
        assert!(text.contains("0\tB\n"));
        assert!(text.contains("cycle\tC D\n"));
    }

    #[test]
    fn human_output_marks_core() {
        let graph = build_graph(&[DependencyEdge::new("crm", "core")]);
        let mut buf = Vec::new();
        render_graph_human(&graph, &mut buf).expect("render");
        let text = String::from_utf8(buf).expect("utf8");
        assert!(text.contains("core [core]"));
        assert!(text.contains("crm -> core"));
        assert!(!text.contains("Cycles"));
    }
}
