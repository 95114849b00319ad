#![forbid(unsafe_code)]

mod cmd;
mod output;

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use modgraph_core::config::resolve_config;
use modgraph_core::{CoreError, ErrorCode};
use output::{CliError, OutputMode, render_error, resolve_output_mode};
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "mg: module dependency graph and config validator",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,

    /// Output format.
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Emit JSON output instead of human-readable text.
    #[arg(long, global = true, hide = true)]
    json: bool,

    /// Snapshot JSON file with dependencies and compatibility records.
    #[arg(long, global = true)]
    snapshot: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Output mode before config is loaded, used for early failures.
    fn fallback_output_mode(&self) -> OutputMode {
        match self.format {
            Some(mode) => mode,
            None if self.json => OutputMode::Json,
            None => OutputMode::Text,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        next_help_heading = "Graph",
        about = "Show the full dependency graph",
        long_about = "Build the dependency graph from the snapshot and show levels and cycles.",
        after_help = "EXAMPLES:\n    # Show the graph\n    mg graph\n\n    # Emit machine-readable output\n    mg graph --json"
    )]
    Graph(cmd::graph::GraphArgs),

    #[command(
        next_help_heading = "Graph",
        about = "List transitive dependencies",
        after_help = "EXAMPLES:\n    # Everything sales needs\n    mg deps sales\n\n    # Fail if the module is unknown\n    mg deps sales --strict"
    )]
    Deps(cmd::deps::ClosureArgs),

    #[command(
        next_help_heading = "Graph",
        about = "List transitive dependents",
        after_help = "EXAMPLES:\n    # Everything that breaks if crm changes\n    mg dependents crm"
    )]
    Dependents(cmd::deps::ClosureArgs),

    #[command(
        next_help_heading = "Graph",
        about = "Order modules for installation",
        long_about = "Reorder the given modules so each one follows the dependencies it shares with the set.",
        after_help = "EXAMPLES:\n    # Install order for three modules\n    mg order reports crm sales"
    )]
    Order(cmd::order::OrderArgs),

    #[command(
        next_help_heading = "Graph",
        about = "Look up pairwise compatibility",
        after_help = "EXAMPLES:\n    # Either argument order gives the same answer\n    mg compat crm billing"
    )]
    Compat(cmd::compat::CompatArgs),

    #[command(
        next_help_heading = "Graph",
        about = "List dependency cycles",
        long_about = "List strongly connected components with suggested edges to remove.",
        after_help = "EXAMPLES:\n    # Show cycles\n    mg cycles"
    )]
    Cycles(cmd::cycles::CyclesArgs),

    #[command(
        next_help_heading = "Graph",
        about = "Summarize the graph",
        after_help = "EXAMPLES:\n    # Counts and content hash\n    mg stats --format text"
    )]
    Stats(cmd::stats::StatsArgs),

    #[command(
        next_help_heading = "Validation",
        about = "Validate a proposed module record",
        long_about = "Validate a proposed module record against the stored one and the dependency graph. Exits with status 1 when the record cannot be saved.",
        after_help = "EXAMPLES:\n    # Validate a new module\n    mg validate --proposed crm.json\n\n    # Validate an edit\n    mg validate --proposed crm.new.json --current crm.json\n\n    # Fast path\n    mg validate --proposed crm.json --quick"
    )]
    Validate(cmd::validate::ValidateArgs),
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("MODGRAPH_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if env::var("DEBUG").is_ok() {
            "modgraph=debug,info"
        } else {
            "modgraph=info,warn"
        })
    });

    let format = env::var("MODGRAPH_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<ExitCode> {
    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let project_root = env::current_dir()?;
    let config = resolve_config(&project_root, cli.json)?;
    let output = resolve_output_mode(cli.format, &config.resolved_output);
    let ctx = cmd::Context::new(config, cli.snapshot.clone(), &project_root, output);

    match &cli.command {
        Commands::Graph(args) => cmd::graph::run_graph(args, &ctx)?,
        Commands::Deps(args) => {
            cmd::deps::run_closure(args, cmd::deps::Direction::Dependencies, &ctx)?;
        }
        Commands::Dependents(args) => {
            cmd::deps::run_closure(args, cmd::deps::Direction::Dependents, &ctx)?;
        }
        Commands::Order(args) => cmd::order::run_order(args, &ctx)?,
        Commands::Compat(args) => cmd::compat::run_compat(args, &ctx)?,
        Commands::Cycles(args) => cmd::cycles::run_cycles(args, &ctx)?,
        Commands::Stats(args) => cmd::stats::run_stats(args, &ctx)?,
        Commands::Validate(args) => {
            if !cmd::validate::run_validate(args, &ctx)? {
                return Ok(ExitCode::FAILURE);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Map a command failure onto a structured CLI error.
fn to_cli_error(err: &anyhow::Error) -> CliError {
    if let Some(core) = err.chain().find_map(|cause| cause.downcast_ref::<CoreError>()) {
        let mut cli_error = CliError::from(core);
        cli_error.message = format!("{err:#}");
        return cli_error;
    }

    let code = ErrorCode::InternalUnexpected;
    CliError::with_details(
        format!("{err:#}"),
        code.hint().unwrap_or(code.message()),
        code.code(),
    )
}

fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(code) => code,
        Err(err) => {
            debug!(error = %err, "command failed");
            let _ = render_error(cli.fallback_output_mode(), &to_cli_error(&err));
            ExitCode::FAILURE
        }
    }
}
