use anyhow::Result;
use clap::Parser;
use log::info;
use scroller::{AgentKind, RunConfig};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// YAML configuration of the run; defaults are used without it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Update engine, overrides the configuration
    #[arg(short, long, value_enum)]
    agent: Option<AgentKind>,

    /// Number of episodes, overrides the configuration
    #[arg(long)]
    max_iterations: Option<usize>,

    /// Checkpoint to resume from, overrides the configuration
    #[arg(long)]
    load_from: Option<String>,

    /// Write the resolved configuration to this file and exit
    #[arg(long)]
    write_config: Option<PathBuf>,
}

fn resolve(args: &Args) -> Result<RunConfig> {
    let mut config = match &args.config {
        Some(path) => RunConfig::load(path)?,
        None => RunConfig::default(),
    };
    if let Some(agent) = args.agent {
        config.agent = agent;
    }
    if let Some(n) = args.max_iterations {
        config.trainer.max_iterations = n;
    }
    if let Some(id) = &args.load_from {
        config.trainer.load_from = Some(id.clone());
    }
    Ok(config)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = resolve(&args)?;

    if let Some(path) = &args.write_config {
        config.save(path)?;
        info!("Wrote configuration to {}", path.display());
        return Ok(());
    }

    scroller::train(&config)?;
    Ok(())
}
