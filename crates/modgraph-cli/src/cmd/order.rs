//! `mg order`: installation order for a set of modules.

use std::io::Write;

use clap::Args;
use serde::Serialize;

use super::{Context, write_lines};
use crate::output::{pretty_section, render_mode};

/// Arguments for `mg order`.
#[derive(Args, Debug)]
pub struct OrderArgs {
    /// Modules to install, in any order.
    #[arg(required = true)]
    pub modules: Vec<String>,
}

#[derive(Debug, Serialize)]
struct OrderOutput {
    order: Vec<String>,
}

/// Execute `mg order`.
pub fn run_order(args: &OrderArgs, ctx: &Context) -> anyhow::Result<()> {
    let engine = ctx.engine()?;
    let payload = OrderOutput {
        order: engine.get_installation_order(&args.modules),
    };

    render_mode(
        ctx.output,
        &payload,
        |p, w| write_lines(w, &p.order),
        render_order_human,
    )
}

fn render_order_human(payload: &OrderOutput, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, "Installation order")?;
    for (step, key) in payload.order.iter().enumerate() {
        writeln!(w, "{:>3}. {key}", step + 1)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_requires_modules() {
        use clap::Parser;

        #[derive(Parser)]
        struct Wrapper {
            #[command(flatten)]
            args: OrderArgs,
        }

        assert!(Wrapper::try_parse_from(["test"]).is_err());
        let parsed = Wrapper::parse_from(["test", "sales", "crm"]);
        assert_eq!(parsed.args.modules, vec!["sales", "crm"]);
    }

    #[test]
    fn human_output_numbers_steps() {
        let payload = OrderOutput {
            order: vec!["core".into(), "crm".into()],
        };
        let mut buf = Vec::new();
        render_order_human(&payload, &mut buf).expect("render");
        let text = String::from_utf8(buf).expect("utf8");
        assert!(text.contains("  1. core\n"));
        assert!(text.contains("  2. crm\n"));
    }
}
