//! Build a fully-initialized sandbox from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces the runtime bundle
//! [`Scenario`] containing:
//! - run parameters (`RunParameters`)
//! - live settings (`SimulationConfig`)
//! - the spawn box (`SimulationBox`)
//! - the simulation itself, populated and kicked to temperature
//!
//! The scenario keeps its spawn list and seeded RNG so `reset` can rebuild
//! the initial population.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::configuration::config::{BodyConfig, ScenarioConfig, SpawnConfig};
use crate::error::Result;
use crate::simulation::driver::{Simulation, TickReport};
use crate::simulation::engine::Engine;
use crate::simulation::environment::SimulationBox;
use crate::simulation::params::SimulationConfig;
use crate::simulation::species::SpeciesTable;
use crate::simulation::states::NVec3;

#[derive(Debug, Clone)]
pub struct RunParameters {
    pub dt: f64,
    pub steps: usize,
    pub report_every: usize,
    pub bond_distance: f64,
    pub kick_temperature: f64,
}

pub struct Scenario {
    pub parameters: RunParameters,
    pub config: SimulationConfig,
    pub environment: SimulationBox,
    pub simulation: Simulation,
    spawn: Vec<SpawnConfig>,
    bodies: Vec<BodyConfig>,
    rng: StdRng,
}

impl Scenario {
    pub fn build_scenario(cfg: ScenarioConfig) -> Result<Self> {
        // Species: explicit list, or the built-in metals
        let species = if cfg.species.is_empty() {
            SpeciesTable::builtin_metals()
        } else {
            let mut table = SpeciesTable::new();
            for s in cfg.species {
                table.register(s)?;
            }
            table
        };

        // Live settings, defaults for anything left out
        let s_cfg = cfg.config;
        let defaults = SimulationConfig::default();
        let config = SimulationConfig {
            cutoff_multiplier: s_cfg.cutoff_multiplier.unwrap_or(defaults.cutoff_multiplier),
            desired_temperature: s_cfg.desired_temperature.unwrap_or(defaults.desired_temperature),
            time_scale: s_cfg.time_scale.unwrap_or(defaults.time_scale),
            containment_radius: s_cfg.containment_radius.unwrap_or(defaults.containment_radius),
            containment_center: s_cfg
                .containment_center
                .map(NVec3::from)
                .unwrap_or(defaults.containment_center),
            paused: s_cfg.paused,
            thermostat_tau: s_cfg.thermostat_tau.unwrap_or(defaults.thermostat_tau),
        };
        config.validate()?;

        let e_cfg = cfg.environment;
        let environment =
            SimulationBox::new(NVec3::from(e_cfg.center), e_cfg.volume, e_cfg.error_buffer)?;

        let p_cfg = cfg.parameters;
        let parameters = RunParameters {
            dt: p_cfg.dt,
            steps: p_cfg.steps,
            report_every: p_cfg.report_every.max(1),
            bond_distance: p_cfg.bond_distance,
            kick_temperature: p_cfg.kick_temperature.unwrap_or(config.desired_temperature),
        };

        let engine = Engine {
            neighbor_search: cfg.engine.neighbor_search,
        };

        let mut scenario = Self {
            parameters,
            config,
            environment,
            simulation: Simulation::new(species, engine),
            spawn: cfg.spawn,
            bodies: cfg.bodies,
            rng: StdRng::seed_from_u64(p_cfg.seed),
        };
        scenario.populate()?;

        log::info!(
            "scenario ready: {} atoms, {} species, box side {:.2} A",
            scenario.simulation.system.len(),
            scenario.simulation.species().len(),
            scenario.environment.side()
        );
        Ok(scenario)
    }

    /// Throw away every atom and rebuild the initial population
    pub fn reset(&mut self) -> Result<()> {
        self.simulation.clear();
        self.populate()
    }

    pub fn step(&mut self) -> Result<TickReport> {
        self.simulation.tick(self.parameters.dt, &self.config)
    }

    fn populate(&mut self) -> Result<()> {
        for bc in &self.bodies {
            let id = self
                .simulation
                .spawn(&bc.species, NVec3::from(bc.x), NVec3::from(bc.v))?;
            if bc.pinned {
                self.simulation.pin(id)?;
            }
        }

        let mut spawned = Vec::new();
        for sc in &self.spawn {
            spawned.extend(self.simulation.populate(
                &sc.species,
                sc.count,
                &self.environment,
                &mut self.rng,
            )?);
        }
        // only the spawned population is kicked, placed atoms keep their velocity
        self.simulation
            .kick_bodies(&spawned, self.parameters.kick_temperature, &mut self.rng)?;
        Ok(())
    }
}
