use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::simulation::driver::Simulation;
use crate::simulation::engine::{Engine, NeighborSearch};
use crate::simulation::environment::SimulationBox;
use crate::simulation::params::SimulationConfig;
use crate::simulation::species::SpeciesTable;

/// Copper gas at roughly solid density, so the cutoff spheres are well populated
fn copper_simulation(n: usize, neighbor_search: NeighborSearch) -> anyhow::Result<Simulation> {
    let volume = 12.0 * n as f64;
    let env = SimulationBox::new(Default::default(), volume, 0.5)?;
    let mut rng = StdRng::seed_from_u64(42);

    let mut sim = Simulation::new(SpeciesTable::builtin_metals(), Engine { neighbor_search });
    sim.populate("Copper", n, &env, &mut rng)?;
    sim.kick(300.0, &mut rng)?;
    Ok(sim)
}

/// Time one full tick for growing N with both neighbor searches
pub fn bench_tick() -> anyhow::Result<()> {
    // Different system sizes to test
    let ns = [100, 200, 400, 800, 1600, 3200];
    let config = SimulationConfig {
        containment_radius: 1.0e6,
        ..Default::default()
    };
    let dt = 0.002;

    for n in ns {
        let mut direct = copper_simulation(n, NeighborSearch::Direct)?;
        let mut cells = copper_simulation(n, NeighborSearch::CellList)?;

        // Warm up
        direct.tick(dt, &config)?;
        cells.tick(dt, &config)?;

        let t0 = Instant::now();
        direct.tick(dt, &config)?;
        let dt_direct = t0.elapsed().as_secs_f64();

        let t1 = Instant::now();
        cells.tick(dt, &config)?;
        let dt_cells = t1.elapsed().as_secs_f64();

        println!("N = {n:5}, direct = {:8.6} s, cell list = {:8.6} s", dt_direct, dt_cells);
    }
    Ok(())
}
