/*
 * Boid Flocking Simulation
 *
 * This application simulates the flocking behavior of birds (boids) based on three main rules:
 * 1. Separation: Avoid crowding neighbors
 * 2. Alignment: Steer towards the average heading of neighbors
 * 3. Cohesion: Steer towards the average position of neighbors
 *
 * Parameters come from an optional JSON config file, overridden by command
 * line flags, and can then be adjusted live from the control panel.
 */

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use flocking::{app, SimulationParams, TickOrder};

#[derive(Debug, Parser)]
#[command(name = "flocking", about = "Interactive boid flocking simulation")]
struct Cli {
    /// JSON file with simulation parameters
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of boids in the flock
    #[arg(long)]
    boids: Option<usize>,

    /// Seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Update boids in place instead of from a per-tick snapshot
    #[arg(long)]
    sequential: bool,
}

fn main() -> Result<()> {
    init_tracing();
    let params = load_params(Cli::parse())?;

    info!(
        boids = params.num_boids,
        max_speed = params.max_speed,
        max_force = params.max_force,
        perception_radius = params.perception_radius,
        "Starting boid simulation",
    );
    app::run(params);
    Ok(())
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
}

fn load_params(cli: Cli) -> Result<SimulationParams> {
    let mut params = match &cli.config {
        Some(path) => SimulationParams::from_json_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => SimulationParams::default(),
    };

    if let Some(boids) = cli.boids {
        params.num_boids = boids;
    }
    if cli.seed.is_some() {
        params.seed = cli.seed;
    }
    if cli.sequential {
        params.tick_order = TickOrder::Sequential;
    }

    params.validate().context("invalid simulation parameters")?;
    Ok(params)
}
