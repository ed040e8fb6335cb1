//! weft - project planning from the command line.
//!
//! Loads a plan (or the bundled "Nouveau Produit" demo), replays it into a
//! project with the chosen notification channel, computes the critical path
//! and prints the activity report.

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use weft_core::{ChannelKind, PlanSpec, ProjectBuilder, WeftConfig};

const DEMO_PLAN: &str = include_str!("../../../demos/nouveau-produit.json");

#[derive(Debug, Parser)]
#[command(name = "weft", version, about = "Project planning: tasks, team notifications, critical path")]
struct Cli {
    /// Plan file (JSON). Runs the bundled demo plan when omitted.
    #[arg(long)]
    plan: Option<PathBuf>,

    /// Config file (JSON).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Notification channel, overrides config and environment.
    #[arg(long)]
    channel: Option<ChannelKind>,

    /// Print the report snapshot as JSON instead of text.
    #[arg(long)]
    json: bool,
}

/// Logs go to stderr so stdout stays reserved for notifications and the report.
fn init_tracing(filter: &str) {
    let env_filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("weft=info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_target(false),
        )
        .init();
}

fn load_config(cli: &Cli) -> Result<WeftConfig> {
    let config = match &cli.config {
        Some(path) => WeftConfig::from_path(path)
            .with_context(|| format!("reading config {}", path.display()))?,
        None => WeftConfig::default(),
    };
    let mut config = config.apply_env()?;
    if let Some(channel) = cli.channel {
        config.notification = channel;
    }
    Ok(config)
}

fn load_plan(path: Option<&PathBuf>) -> Result<PlanSpec> {
    match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading plan {}", path.display()))?;
            PlanSpec::from_json(&text).with_context(|| format!("parsing plan {}", path.display()))
        }
        None => PlanSpec::from_json(DEMO_PLAN).context("parsing bundled demo plan"),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    init_tracing(&config.log_filter);

    let plan = load_plan(cli.plan.as_ref())?;
    // With --json, stdout carries the document only.
    let strategy = if cli.json {
        config.notification.strategy_with_writer(io::stderr())
    } else {
        config.notification.strategy()
    };

    let mut project = ProjectBuilder::from_plan(plan)
        .with_boxed_strategy(strategy)
        .build()?;
    let path = project.compute_critical_path()?.len();
    info!(
        project = %project.name(),
        channel = config.notification.as_str(),
        critical_path = path,
        "plan evaluated"
    );

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&project.snapshot())?);
    } else {
        print!("{}", project.generate_report());
    }
    Ok(())
}
