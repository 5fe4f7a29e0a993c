pub mod states;
pub mod params;
pub mod engine;
pub mod species;
pub mod forces;
pub mod neighbors;
pub mod thermostat;
pub mod containment;
pub mod integrator;
pub mod environment;
pub mod driver;
pub mod inspect;
pub mod scenario;
