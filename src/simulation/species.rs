//! Per-species Lennard-Jones constants and the pair sigma lookup
//!
//! Species are data: register as many as needed in a [`SpeciesTable`], then
//! build a [`SigmaTable`] once before the first force evaluation.
//!
//! Built-in 12-6 parameters from Zhen and Davies, Phys. Stat. Sol. a, 78, 595 (1983):
//!
//! | symbol | epsilon/k_B (K) | sigma (A) | mass (amu) |
//! |--------|-----------------|-----------|------------|
//! | Cu     | 4733.5          | 2.3374    | 63.546     |
//! | Au     | 5152.9          | 2.6367    | 196.967    |
//! | Pt     | 7908.7          | 2.5394    | 195.084    |
//!
//! The masses are standard atomic weights. The platinum figure of 165.084 amu
//! that often travels with this parameter set is a transcription error; the
//! corrected value is used here.

use std::collections::HashMap;

use serde::Deserialize;

use crate::error::{Result, SimError};
use crate::simulation::params::{AMU_TO_KG, BOLTZMANN};

/// Dense index into a [`SpeciesTable`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpeciesId(pub usize);

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Species {
    pub name: String,
    pub symbol: String,
    pub epsilon: f64, // epsilon / k_B (K)
    pub sigma: f64,   // Angstrom
    pub mass: f64,    // amu
}

impl Species {
    pub fn new(name: &str, symbol: &str, epsilon: f64, sigma: f64, mass: f64) -> Self {
        Self {
            name: name.to_string(),
            symbol: symbol.to_string(),
            epsilon,
            sigma,
            mass,
        }
    }

    pub fn copper() -> Self {
        Self::new("Copper", "Cu", 4733.5, 2.3374, 63.546)
    }

    pub fn gold() -> Self {
        Self::new("Gold", "Au", 5152.9, 2.6367, 196.967)
    }

    pub fn platinum() -> Self {
        Self::new("Platinum", "Pt", 7908.7, 2.5394, 195.084)
    }

    pub fn epsilon_joules(&self) -> f64 {
        self.epsilon * BOLTZMANN
    }

    pub fn mass_kg(&self) -> f64 {
        self.mass * AMU_TO_KG
    }

    /// Mass in engine units (100 amu)
    pub fn engine_mass(&self) -> f64 {
        self.mass / 100.0
    }

    fn validate(&self) -> Result<()> {
        let ok = |v: f64| v.is_finite() && v > 0.0;
        if ok(self.epsilon) && ok(self.sigma) && ok(self.mass) {
            Ok(())
        } else {
            Err(SimError::InvalidConfig(format!(
                "species {} needs positive epsilon, sigma and mass",
                self.name
            )))
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SpeciesTable {
    species: Vec<Species>,
    by_name: HashMap<String, SpeciesId>,
}

impl SpeciesTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copper, gold and platinum
    pub fn builtin_metals() -> Self {
        let mut table = Self::new();
        for s in [Species::copper(), Species::gold(), Species::platinum()] {
            table.insert(s);
        }
        table
    }

    pub fn register(&mut self, species: Species) -> Result<SpeciesId> {
        species.validate()?;
        if self.by_name.contains_key(&species.name) {
            return Err(SimError::DuplicateSpecies(species.name));
        }
        Ok(self.insert(species))
    }

    // unchecked
    fn insert(&mut self, species: Species) -> SpeciesId {
        let id = SpeciesId(self.species.len());
        self.by_name.insert(species.name.clone(), id);
        self.species.push(species);
        id
    }

    pub fn id(&self, name: &str) -> Result<SpeciesId> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| SimError::UnknownSpecies(name.to_string()))
    }

    /// Panics if `id` did not come from this table
    pub fn get(&self, id: SpeciesId) -> &Species {
        &self.species[id.0]
    }

    pub fn len(&self) -> usize {
        self.species.len()
    }

    pub fn is_empty(&self) -> bool {
        self.species.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SpeciesId, &Species)> {
        self.species.iter().enumerate().map(|(i, s)| (SpeciesId(i), s))
    }
}

/// Effective sigma for every ordered species pair, stored as an S x S matrix.
///
/// Same-species pairs use the species' own sigma. Cross pairs use
/// `sqrt(sigma_i + sigma_j)`, which is not the Lorentz-Berthelot mean; it is
/// kept because the tuned behaviour of the sandbox depends on it.
#[derive(Debug, Clone)]
pub struct SigmaTable {
    n: usize,
    values: Vec<f64>,
}

impl SigmaTable {
    pub fn build(species: &SpeciesTable) -> Self {
        let n = species.len();
        let mut values = vec![0.0; n * n];
        for (a, sa) in species.iter() {
            values[a.0 * n + a.0] = sa.sigma;
            for (b, sb) in species.iter().skip(a.0 + 1) {
                let cross = (sa.sigma + sb.sigma).sqrt();
                values[a.0 * n + b.0] = cross;
                values[b.0 * n + a.0] = cross;
            }
        }
        Self { n, values }
    }

    /// Number of species covered
    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    pub fn covers(&self, id: SpeciesId) -> bool {
        id.0 < self.n
    }

    /// Panics if either id is not covered; bodies are checked at spawn
    pub fn sigma(&self, a: SpeciesId, b: SpeciesId) -> f64 {
        self.values[a.0 * self.n + b.0]
    }

    pub fn try_sigma(&self, a: SpeciesId, b: SpeciesId) -> Result<f64> {
        for id in [a, b] {
            if !self.covers(id) {
                return Err(SimError::SpeciesNotInTable(id.0));
            }
        }
        Ok(self.sigma(a, b))
    }
}
