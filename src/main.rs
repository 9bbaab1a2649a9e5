use threebody::{run_3d, ScenarioConfig, ScenarioSource, Simulation};

use anyhow::{Context, Result};
use clap::Parser;

use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(about = "Three-body gravity sandbox with motion trails")]
struct Args {
    /// Scenario YAML; looked up under `scenarios/` if not found as given
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Seed for randomized fields (overrides `parameters.seed`)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Body count for a fully random scenario (not used with --file)
    #[arg(short, long, default_value_t = 3, conflicts_with = "file")]
    bodies: usize,

    /// Run this many steps without a window and log the final state
    #[arg(long)]
    headless: Option<u64>,
}

// load here to keep main clean
fn load_scenario(args: &Args) -> Result<ScenarioConfig> {
    let Some(file) = &args.file else {
        log::info!("no scenario file, using {} random bodies", args.bodies);
        return Ok(ScenarioConfig::randomized(args.bodies));
    };

    let path = if file.exists() {
        file.clone()
    } else {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file)
    };

    log::info!("loading scenario {}", path.display());
    ScenarioConfig::load(&path).with_context(|| format!("failed to load scenario {}", path.display()))
}

fn run_headless(mut sim: Simulation, steps: u64) {
    let e0 = sim.kinetic_energy() + sim.potential_energy();
    for _ in 0..steps {
        sim.step();
    }
    let e1 = sim.kinetic_energy() + sim.potential_energy();

    log::info!("ran {} steps, t = {:.3}", sim.steps(), sim.time());
    for (i, b) in sim.bodies().iter().enumerate() {
        log::info!("body {i}: x = {:?}, v = {:?}, trail = {}", b.x.as_slice(), b.v.as_slice(), b.trail().len());
    }
    log::info!("momentum = {:?}", sim.total_momentum().as_slice());
    log::info!("energy {:.6} -> {:.6}", e0, e1);
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = load_scenario(&args)?;
    let source = ScenarioSource::new(config, args.seed);
    let sim = source.build().context("invalid scenario")?;

    match args.headless {
        Some(steps) => run_headless(sim, steps),
        None => run_3d(sim, source),
    }

    Ok(())
}
