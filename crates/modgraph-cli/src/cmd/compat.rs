//! `mg compat`: stored compatibility judgment for a pair of modules.

use std::io::Write;

use clap::Args;
use modgraph_core::CompatibilityRecord;
use serde::Serialize;

use super::Context;
use crate::output::{pretty_kv, pretty_section, render_mode};

/// Arguments for `mg compat`.
#[derive(Args, Debug)]
pub struct CompatArgs {
    pub module_a: String,
    pub module_b: String,
}

#[derive(Debug, Serialize)]
struct CompatOutput {
    module_a: String,
    module_b: String,
    record: Option<CompatibilityRecord>,
}

/// Execute `mg compat`.
pub fn run_compat(args: &CompatArgs, ctx: &Context) -> anyhow::Result<()> {
    let engine = ctx.engine()?;
    let payload = CompatOutput {
        module_a: args.module_a.clone(),
        module_b: args.module_b.clone(),
        record: engine
            .check_compatibility(&args.module_a, &args.module_b)
            .cloned(),
    };

    render_mode(ctx.output, &payload, render_compat_text, render_compat_human)
}

fn render_compat_text(payload: &CompatOutput, w: &mut dyn Write) -> std::io::Result<()> {
    let status = payload
        .record
        .as_ref()
        .map_or("unknown", |record| record.status.as_str());
    writeln!(w, "{}\t{}\t{status}", payload.module_a, payload.module_b)
}

fn render_compat_human(payload: &CompatOutput, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(
        w,
        &format!("Compatibility: {} / {}", payload.module_a, payload.module_b),
    )?;
    let Some(record) = &payload.record else {
        return pretty_kv(w, "status", "unknown (no record)");
    };
    pretty_kv(w, "status", record.status.as_str())?;
    if let Some(score) = record.score {
        pretty_kv(w, "score", format!("{score}"))?;
    }
    if let Some(notes) = &record.notes {
        pretty_kv(w, "notes", notes)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use modgraph_core::CompatibilityStatus;

    #[test]
    fn missing_record_reads_unknown() {
        let payload = CompatOutput {
            module_a: "a".into(),
            module_b: "b".into(),
            record: None,
        };
        let mut buf = Vec::new();
        render_compat_text(&payload, &mut buf).expect("render");
        assert_eq!(String::from_utf8(buf).expect("utf8"), "a\tb\tunknown\n");
    }

    #[test]
    fn human_output_includes_notes() {
        let payload = CompatOutput {
            module_a: "a".into(),
            module_b: "b".into(),
            record: Some(
                CompatibilityRecord::new("b", "a", CompatibilityStatus::Incompatible)
                    .with_notes("table clash"),
            ),
        };
        let mut buf = Vec::new();
        render_compat_human(&payload, &mut buf).expect("render");
        let text = String::from_utf8(buf).expect("utf8");
        assert!(text.contains("incompatible"));
        assert!(text.contains("table clash"));
    }
}
