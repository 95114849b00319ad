//! `mg cycles`: dependency cycles with suggested edges to remove.

use std::io::Write;

use clap::Args;
use modgraph_graph::CycleReport;
use serde::Serialize;

use super::Context;
use crate::output::render_mode;

/// Arguments for `mg cycles`.
#[derive(Args, Debug, Default)]
pub struct CyclesArgs {}

#[derive(Debug, Serialize)]
struct CyclesOutput {
    cycles: Vec<CycleReport>,
}

/// Execute `mg cycles`.
pub fn run_cycles(_args: &CyclesArgs, ctx: &Context) -> anyhow::Result<()> {
    let engine = ctx.engine()?;
    let payload = CyclesOutput {
        cycles: engine.cycle_reports(),
    };

    render_mode(ctx.output, &payload, render_cycles_text, render_cycles_human)
}

fn render_cycles_text(payload: &CyclesOutput, w: &mut dyn Write) -> std::io::Result<()> {
    for report in &payload.cycles {
        writeln!(w, "{}", report.members.join(" "))?;
    }
    Ok(())
}

fn render_cycles_human(payload: &CyclesOutput, w: &mut dyn Write) -> std::io::Result<()> {
    if payload.cycles.is_empty() {
        writeln!(w, "No dependency cycles found.")?;
        return Ok(());
    }

    writeln!(w, "Dependency cycles ({})", payload.cycles.len())?;

    for (idx, report) in payload.cycles.iter().enumerate() {
        writeln!(w, "\nCycle {}:", idx + 1)?;
        for key in &report.members {
            writeln!(w, "  - {key}")?;
        }
        if !report.suggested_breaks.is_empty() {
            writeln!(w, "  Suggested breaks:")?;
            for (from, to) in &report.suggested_breaks {
                writeln!(w, "    remove {from} -> {to}")?;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use modgraph_core::DependencyEdge;
    use modgraph_graph::graph::{build_graph, report_cycles_with_breaks};

    #[test]
    fn cycles_args_parse_no_flags() {
        use clap::Parser;

        #[derive(Parser)]
        struct Wrapper {
            #[command(flatten)]
            args: CyclesArgs,
        }

        let parsed = Wrapper::parse_from(["test"]);
        let _ = parsed.args;
    }

    #[test]
    fn human_output_empty() {
        let payload = CyclesOutput { cycles: Vec::new() };
        let mut buf = Vec::new();
        render_cycles_human(&payload, &mut buf).expect("render");
        assert_eq!(
            String::from_utf8(buf).expect("utf8"),
            "No dependency cycles found.\n"
        );
    }

    #[test]
    fn human_output_lists_breaks() {
        let graph = build_graph(&[DependencyEdge::new("a", "b"), DependencyEdge::new("b", "a")]);
        let payload = CyclesOutput {
            cycles: report_cycles_with_breaks(&graph),
        };
        let mut buf = Vec::new();
        render_cycles_human(&payload, &mut buf).expect("render");
        let text = String::from_utf8(buf).expect("utf8");
        assert!(text.contains("Dependency cycles (1)"));
        assert!(text.contains("Suggested breaks:"));
        assert!(text.contains("    remove "));
    }
}
