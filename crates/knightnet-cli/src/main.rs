//! KnightNet CLI - span a covert network, breach a node, respan.

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand};
use knightnet_core::KnightNetConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod driver;
mod output;


use driver::{run_case, BreachTarget, CaseSettings};
use output::{render, OutputFormat};

/// KnightNet - decoy-aware, visibility-constrained spanning trees
#[derive(Parser, Debug)]
#[command(name = "knightnet")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file (defaults to ./knightnet.toml if present)
    #[arg(short, long, global = true, env = "KNIGHTNET_CONFIG")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a single network file
    Run(RunArgs),
    /// Run every [[cases]] entry from the configuration
    Suite,
}

#[derive(Args, Debug)]
struct RunArgs {
    /// Record file: nodeA,nodeB,cost,visibility,isDecoy per line
    #[arg(short, long)]
    input: PathBuf,

    /// Visibility ceiling, may be negative (overrides mst.max_visibility)
    #[arg(short, long, allow_negative_numbers = true)]
    max_visibility: Option<i64>,

    /// Start node (overrides mst.start_node)
    #[arg(short, long)]
    start: Option<String>,

    /// Node to breach (overrides breach.node)
    #[arg(long, conflicts_with = "seed")]
    breach: Option<String>,

    /// Seed for a random breach pick (overrides breach.seed)
    #[arg(long)]
    seed: Option<u64>,
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn breach_target(node: Option<String>, seed: u64) -> BreachTarget {
    node.map_or(BreachTarget::Seeded(seed), BreachTarget::Node)
}

fn settings_for_run(config: &KnightNetConfig, args: RunArgs) -> Result<CaseSettings> {
    let max_visibility = args.max_visibility.unwrap_or(config.mst.max_visibility);
    let breach = match (args.breach, args.seed) {
        (Some(node), _) => BreachTarget::Node(node),
        (None, Some(seed)) => BreachTarget::Seeded(seed),
        (None, None) => breach_target(config.breach.node.clone(), config.breach.seed),
    };
    Ok(CaseSettings {
        input: args.input,
        max_visibility,
        start: args.start.or_else(|| config.mst.start_node.clone()),
        breach,
        policy: config.load.policy,
    })
}

fn settings_for_suite(config: &KnightNetConfig) -> Result<Vec<CaseSettings>> {
    if config.cases.is_empty() {
        bail!("no [[cases]] configured; add them to knightnet.toml or pass --config");
    }
    Ok(config
        .cases
        .iter()
        .map(|case| CaseSettings {
            input: case.input.clone(),
            max_visibility: case.max_visibility,
            start: config.mst.start_node.clone(),
            breach: breach_target(config.breach.node.clone(), config.breach.seed),
            policy: config.load.policy,
        })
        .collect())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = KnightNetConfig::load(cli.config.as_deref())?;
    let cases = match cli.command {
        Command::Run(args) => vec![settings_for_run(&config, args)?],
        Command::Suite => settings_for_suite(&config)?,
    };

    for (idx, settings) in cases.iter().enumerate() {
        let report = run_case(settings)?;
        println!("{}", render(&report, idx + 1, cli.format)?);
    }
    Ok(())
}
