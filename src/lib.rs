pub mod error;
pub mod simulation;
pub mod configuration;
pub mod benchmark;

pub use error::{Result, SimError};

pub use simulation::states::{Body, BodyId, Containment, Motion, NVec3, System};
pub use simulation::species::{SigmaTable, Species, SpeciesId, SpeciesTable};
pub use simulation::params::SimulationConfig;
pub use simulation::engine::{Engine, NeighborSearch};
pub use simulation::forces::{ForceField, ForceSample};
pub use simulation::containment::{ContainmentEvent, Sphere};
pub use simulation::integrator::{MomentumIntegrator, SemiImplicitEuler};
pub use simulation::environment::SimulationBox;
pub use simulation::driver::{Simulation, TickReport};
pub use simulation::inspect::{inspect, AtomReport};
pub use simulation::scenario::{RunParameters, Scenario};

pub use configuration::config::{
    BodyConfig, EngineConfig, EnvironmentConfig, ParametersConfig, ScenarioConfig, SettingsConfig, SpawnConfig,
};

pub use benchmark::benchmark::bench_tick;
