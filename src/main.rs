use ljsim::{bench_tick, inspect, Scenario, ScenarioConfig};

use anyhow::{Context, Result};
use clap::Parser;

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

#[derive(Parser, Debug)]
struct Args {
    /// Scenario file, looked up in `scenarios/` when not a path to an existing file
    #[arg(short, default_value = "copper.yaml")]
    file_name: String,

    /// Override the number of ticks from the scenario
    #[arg(long)]
    steps: Option<usize>,

    /// Time a single tick for growing N instead of running a scenario
    #[arg(long)]
    bench: bool,
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let direct = PathBuf::from(file_name);
    let config_path = if direct.is_file() {
        direct
    } else {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name)
    };
    let file = File::open(&config_path)
        .with_context(|| format!("opening scenario {}", config_path.display()))?;
    let reader = BufReader::new(file);
    let scenario_cfg: ScenarioConfig = serde_yaml::from_reader(reader)
        .with_context(|| format!("parsing scenario {}", config_path.display()))?;

    Ok(scenario_cfg)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    if args.bench {
        return bench_tick();
    }

    let scenario_cfg = load_scenario_from_yaml(&args.file_name)?;
    let mut scenario = Scenario::build_scenario(scenario_cfg)?;
    let steps = args.steps.unwrap_or(scenario.parameters.steps);
    let every = scenario.parameters.report_every;

    for step in 1..=steps {
        let report = scenario.step()?;
        if report.degenerate_pairs > 0 {
            log::warn!("step {step}: {} coincident pair(s) skipped", report.degenerate_pairs);
        }
        if step % every == 0 || step == steps {
            log::info!(
                "step {step}: t = {:.3} ps, T = {:.1} K (target {:.1} K), rescale {:?}, {} reflecting",
                scenario.simulation.system.t,
                report.temperature,
                scenario.config.desired_temperature,
                report.rescale,
                scenario.simulation.system.bodies.iter().filter(|b| b.is_reflecting()).count(),
            );
        }
    }

    if let Some(first) = scenario.simulation.system.bodies.first().map(|b| b.id) {
        let atom = inspect(&scenario.simulation, first, scenario.parameters.bond_distance)?;
        log::info!(
            "atom {:?} ({} / {}) at [{:.2}, {:.2}, {:.2}]: {} bond(s), {} angle(s)",
            atom.id,
            atom.name,
            atom.symbol,
            atom.position.x,
            atom.position.y,
            atom.position.z,
            atom.bonds.len(),
            atom.angles.len(),
        );
        for bond in &atom.bonds {
            log::info!("  bond to {:?}: {:.3} A", bond.other, bond.distance);
        }
    }

    Ok(())
}
