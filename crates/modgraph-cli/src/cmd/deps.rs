//! `mg deps` / `mg dependents`: transitive dependency closures.

use std::io::Write;

use clap::Args;
use modgraph_core::CoreError;
use serde::Serialize;

use super::{Context, write_lines};
use crate::output::{pretty_section, render_mode};

/// Arguments shared by `mg deps` and `mg dependents`.
#[derive(Args, Debug)]
pub struct ClosureArgs {
    /// Module key to start from.
    pub module_key: String,

    /// Fail with E2001 if the module is not in the graph.
    #[arg(long)]
    pub strict: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Dependencies,
    Dependents,
}

impl Direction {
    const fn label(self) -> &'static str {
        match self {
            Self::Dependencies => "Dependencies",
            Self::Dependents => "Dependents",
        }
    }
}

#[derive(Debug, Serialize)]
struct ClosureOutput {
    module_key: String,
    known: bool,
    modules: Vec<String>,
}

/// Execute `mg deps` or `mg dependents`.
pub fn run_closure(args: &ClosureArgs, direction: Direction, ctx: &Context) -> anyhow::Result<()> {
    let engine = ctx.engine()?;
    let known = engine.is_known_module(&args.module_key);

    if args.strict && !known {
        return Err(CoreError::ModuleNotFound(args.module_key.clone()).into());
    }

    let modules = match direction {
        Direction::Dependencies => engine.get_module_dependencies(&args.module_key),
        Direction::Dependents => engine.get_module_dependents(&args.module_key),
    };
    let payload = ClosureOutput {
        module_key: args.module_key.clone(),
        known,
        modules,
    };

    render_mode(
        ctx.output,
        &payload,
        |p, w| write_lines(w, &p.modules),
        |p, w| render_closure_human(p, direction, w),
    )
}

fn render_closure_human(
    payload: &ClosureOutput,
    direction: Direction,
    w: &mut dyn Write,
) -> std::io::Result<()> {
    pretty_section(
        w,
        &format!(
            "{} of {} ({})",
            direction.label(),
            payload.module_key,
            payload.modules.len()
        ),
    )?;
    if payload.modules.is_empty() {
        writeln!(w, "  (none)")?;
    }
    for key in &payload.modules {
        writeln!(w, "  - {key}")?;
    }
    Ok(())
}
