//! `mg validate`: check a proposed module record before saving it.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::Args;
use modgraph_core::ModuleRecord;
use modgraph_validate::{ConfigValidator, ValidationIssue, ValidationResult};
use tracing::info;

use super::Context;
use crate::output::{pretty_kv, pretty_section, render_mode};

/// Arguments for `mg validate`.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// JSON file with the record about to be saved.
    #[arg(long)]
    pub proposed: PathBuf,

    /// JSON file with the currently stored record. Omit for a new module.
    #[arg(long)]
    pub current: Option<PathBuf>,

    /// Only check required fields and key-rename impact.
    #[arg(long)]
    pub quick: bool,
}

/// Execute `mg validate`.
///
/// Returns whether the proposed record can be saved.
pub fn run_validate(args: &ValidateArgs, ctx: &Context) -> anyhow::Result<bool> {
    let proposed = read_record(&args.proposed)?;
    let current = args.current.as_deref().map(read_record).transpose()?;

    let engine = ctx.engine()?;
    let validator = ConfigValidator::new(&engine, ctx.config.project.validation.clone());
    let result = if args.quick {
        validator.validate_quick(current.as_ref(), &proposed)
    } else {
        validator.validate_module(current.as_ref(), &proposed)
    };

    info!(
        score = result.score,
        can_save = result.can_save,
        quick = args.quick,
        "validated module record"
    );

    render_mode(ctx.output, &result, render_result_text, render_result_human)?;
    Ok(result.can_save)
}

fn read_record(path: &Path) -> anyhow::Result<ModuleRecord> {
    let text =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    ModuleRecord::from_json(&text)
        .with_context(|| format!("Failed to parse module record {}", path.display()))
}

fn render_result_text(result: &ValidationResult, w: &mut dyn Write) -> std::io::Result<()> {
    writeln!(
        w,
        "score={} valid={} can_save={} confirm={}",
        result.score, result.is_valid, result.can_save, result.requires_confirmation
    )?;
    for issue in result.all_issues() {
        let field = issue.field.as_deref().unwrap_or("-");
        writeln!(w, "{}\t{}\t{field}\t{}", issue.issue_type, issue.code, issue.message)?;
    }
    Ok(())
}

fn render_result_human(result: &ValidationResult, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, "Validation")?;
    pretty_kv(w, "score", format!("{}/100", result.score))?;
    pretty_kv(w, "valid", yes_no(result.is_valid))?;
    pretty_kv(w, "can save", yes_no(result.can_save))?;
    pretty_kv(w, "confirm", yes_no(result.requires_confirmation))?;
    if !result.affected_modules.is_empty() {
        pretty_kv(w, "affected", result.affected_modules.join(", "))?;
    }

    for (heading, issues) in [
        ("Errors", &result.issues),
        ("Breaking changes", &result.breaking),
        ("Warnings", &result.warnings),
        ("Suggestions", &result.suggestions),
    ] {
        write_bucket(w, heading, issues)?;
    }
    Ok(())
}

fn write_bucket(w: &mut dyn Write, heading: &str, issues: &[ValidationIssue]) -> std::io::Result<()> {
    if issues.is_empty() {
        return Ok(());
    }
    writeln!(w)?;
    writeln!(w, "{heading} ({}):", issues.len())?;
    for issue in issues {
        writeln!(w, "  [{}] {}", issue.code, issue.message)?;
        if let Some(suggestion) = &issue.suggestion {
            writeln!(w, "      suggestion: {suggestion}")?;
        }
    }
    Ok(())
}

const fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use modgraph_validate::{IssueBuckets, IssueCode};

    #[test]
    fn validate_args_parse() {
        use clap::Parser;

        #[derive(Parser)]
        struct Wrapper {
            #[command(flatten)]
            args: ValidateArgs,
        }

        let parsed = Wrapper::parse_from(["test", "--proposed", "new.json", "--quick"]);
        assert_eq!(parsed.args.proposed, PathBuf::from("new.json"));
        assert!(parsed.args.current.is_none());
        assert!(parsed.args.quick);
        assert!(Wrapper::try_parse_from(["test"]).is_err());
    }

    #[test]
    fn text_output_lists_every_issue() {
        let result = IssueBuckets {
            issues: vec![
                ValidationIssue::error(IssueCode::MissingKey, "Module key is required")
                    .with_field("module_key"),
            ],
            suggestions: vec![ValidationIssue::info(IssueCode::NoFeatures, "No features defined")],
            ..IssueBuckets::default()
        }
        .finish(20, 5);

        let mut buf = Vec::new();
        render_result_text(&result, &mut buf).expect("render");
        let text = String::from_utf8(buf).expect("utf8");

        assert!(text.starts_with("score=80 valid=false can_save=false"));
        assert!(text.contains("error\tMISSING_KEY\tmodule_key\tModule key is required\n"));
        assert!(text.contains("info\tNO_FEATURES\t-\tNo features defined\n"));
    }

    #[test]
    fn read_record_reports_bad_json() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("bad.json");
        fs::write(&path, "not json").expect("write");

        let err = read_record(&path).expect_err("should fail");
        assert!(format!("{err:#}").contains("Failed to parse module record"));
    }
}
