//! Configuration types for loading sandbox scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! scenario. A scenario consists of:
//!
//! - [`EngineConfig`]      – engine options (neighbor search)
//! - [`ParametersConfig`]  – run length, step size, seed, reporting
//! - [`SettingsConfig`]    – the live simulation settings (cutoff, temperature, containment)
//! - [`EnvironmentConfig`] – the spawn box
//! - [`Species`]           – optional species list, the built-in metals otherwise
//! - [`SpawnConfig`]       – random placement of N atoms of one species
//! - [`BodyConfig`]        – explicitly placed atoms
//!
//! # YAML format
//!
//! ```yaml
//! engine:
//!   neighbor_search: "cell_list"   # or "direct"
//!
//! parameters:
//!   dt: 0.002                      # ps per tick
//!   steps: 5000
//!   report_every: 500
//!   seed: 42
//!
//! config:
//!   cutoff_multiplier: 2.5
//!   desired_temperature: 300.0     # K
//!   containment_radius: 15.0       # Angstrom
//!
//! environment:
//!   volume: 8000.0                 # cubic Angstrom
//!   error_buffer: 0.5
//!
//! spawn:
//!   - species: "Copper"
//!     count: 10
//!
//! bodies:
//!   - species: "Gold"
//!     x: [0.0, 0.0, 0.0]
//!     pinned: true
//! ```
//!
//! Every section except `parameters` may be omitted. The scenario builder maps
//! this into the runtime types, which are kept separate from these structs.

use serde::Deserialize;

use crate::simulation::engine::NeighborSearch;
use crate::simulation::species::Species;

#[derive(Deserialize, Debug, Clone, Default)]
pub struct EngineConfig {
    #[serde(default)]
    pub neighbor_search: NeighborSearch,
}

/// Run-level parameters of the headless loop
#[derive(Deserialize, Debug, Clone)]
pub struct ParametersConfig {
    pub dt: f64,     // host step (ps)
    pub steps: usize, // ticks to run
    #[serde(default = "default_report_every")]
    pub report_every: usize, // log interval in ticks
    #[serde(default)]
    pub seed: u64, // placement and kick seed, makes runs reproducible
    #[serde(default = "default_bond_distance")]
    pub bond_distance: f64, // Angstrom, for inspection
    pub kick_temperature: Option<f64>, // K, defaults to the desired temperature
}

fn default_report_every() -> usize {
    100
}

fn default_bond_distance() -> f64 {
    3.0
}

/// Live settings; anything left out keeps its default
#[derive(Deserialize, Debug, Clone, Default)]
pub struct SettingsConfig {
    pub cutoff_multiplier: Option<f64>,
    pub desired_temperature: Option<f64>,
    pub time_scale: Option<f64>,
    pub containment_radius: Option<f64>,
    pub containment_center: Option<[f64; 3]>,
    pub thermostat_tau: Option<f64>,
    #[serde(default)]
    pub paused: bool,
}

#[derive(Deserialize, Debug, Clone)]
pub struct EnvironmentConfig {
    #[serde(default = "default_volume")]
    pub volume: f64,
    #[serde(default = "default_error_buffer")]
    pub error_buffer: f64,
    #[serde(default)]
    pub center: [f64; 3],
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            volume: default_volume(),
            error_buffer: default_error_buffer(),
            center: [0.0; 3],
        }
    }
}

fn default_volume() -> f64 {
    8000.0
}

fn default_error_buffer() -> f64 {
    0.5
}

#[derive(Deserialize, Debug, Clone)]
pub struct SpawnConfig {
    pub species: String,
    pub count: usize,
}

#[derive(Deserialize, Debug, Clone)]
pub struct BodyConfig {
    pub species: String,
    pub x: [f64; 3], // Angstrom
    #[serde(default)]
    pub v: [f64; 3], // Angstrom / ps
    #[serde(default)]
    pub pinned: bool,
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub engine: EngineConfig,
    pub parameters: ParametersConfig,
    #[serde(default)]
    pub config: SettingsConfig,
    #[serde(default)]
    pub environment: EnvironmentConfig,
    #[serde(default)]
    pub species: Vec<Species>, // empty -> built-in metals
    #[serde(default)]
    pub spawn: Vec<SpawnConfig>,
    #[serde(default)]
    pub bodies: Vec<BodyConfig>,
}
