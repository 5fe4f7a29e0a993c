//! Lennard-Jones force field for the atom sandbox
//!
//! [`ForceField`] owns the species table and the pair sigma table built from
//! it, and evaluates the net 12-6 force on one body from a list of neighbors.

use crate::error::{Result, SimError};
use crate::simulation::params::{ANGSTROMS_TO_METERS, EYE_ADJUSTMENT, MASS_100AMU_TO_KG};
use crate::simulation::species::{SigmaTable, SpeciesId, SpeciesTable};
use crate::simulation::states::{Body, NVec3};

/// Net force on one body plus the number of neighbor pairs that had to be skipped
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForceSample {
    pub force: NVec3,
    pub skipped: usize,
}

pub struct ForceField {
    species: SpeciesTable,
    sigmas: SigmaTable,
}

impl ForceField {
    /// Freeze the species table and precompute every pair sigma
    pub fn new(species: SpeciesTable) -> Self {
        let sigmas = SigmaTable::build(&species);
        Self { species, sigmas }
    }

    pub fn species(&self) -> &SpeciesTable {
        &self.species
    }

    pub fn sigmas(&self) -> &SigmaTable {
        &self.sigmas
    }

    /// Resolve a species name, failing if it was not present when the table was built
    pub fn species_id(&self, name: &str) -> Result<SpeciesId> {
        let id = self.species.id(name)?;
        self.ensure_covered(id)?;
        Ok(id)
    }

    pub fn ensure_covered(&self, id: SpeciesId) -> Result<()> {
        if self.sigmas.covers(id) {
            Ok(())
        } else {
            Err(SimError::SpeciesNotInTable(id.0))
        }
    }

    /// Neighbor cutoff for a body of this species.
    /// Uses the species' own sigma, not the pair sigma.
    pub fn cutoff(&self, species: SpeciesId, cutoff_multiplier: f64) -> f64 {
        cutoff_multiplier * self.sigmas.sigma(species, species)
    }

    /// Largest cutoff over all species, used to size the cell grid
    pub fn max_cutoff(&self, cutoff_multiplier: f64) -> f64 {
        self.species
            .iter()
            .map(|(id, _)| self.cutoff(id, cutoff_multiplier))
            .fold(0.0, f64::max)
    }

    /// Pair well depth in joules: geometric mean of the two epsilons
    pub fn pair_epsilon(&self, a: SpeciesId, b: SpeciesId) -> f64 {
        let ea = self.species.get(a).epsilon_joules();
        if a == b {
            return ea;
        }
        (ea * self.species.get(b).epsilon_joules()).sqrt()
    }

    /// Separation where the pair force vanishes: 2^(1/6) sigma
    pub fn equilibrium_distance(&self, a: SpeciesId, b: SpeciesId) -> f64 {
        2f64.powf(1.0 / 6.0) * self.sigmas.sigma(a, b)
    }

    /// Force in newtons exerted on `body` by one neighbor, `None` for a degenerate pair.
    ///
    /// F = -48 eps / d^2 * ((sigma/r)^12 - 0.5 (sigma/r)^6) * d
    ///
    /// `r` is the separation in Angstrom and `d` the same separation in metres.
    /// sigma/r is dimensionless and -48 eps / d^2 * d = -48 eps / d is in newtons,
    /// so this is the textbook 12-6 force; the literal form is kept.
    /// Positive bracket (too close) pushes the body away from the neighbor.
    pub fn pair_force(&self, body: &Body, neighbor: &Body) -> Option<NVec3> {
        let delta = neighbor.x - body.x;
        let r = delta.norm();
        if !r.is_finite() || r <= 0.0 {
            return None;
        }
        let direction = delta / r;

        let d = r * ANGSTROMS_TO_METERS;
        let sigma = self.sigmas.sigma(body.species, neighbor.species);
        let epsilon = self.pair_epsilon(body.species, neighbor.species);

        let sr6 = (sigma / r).powi(6);
        let sr12 = sr6 * sr6;
        let part1 = (-48.0 * epsilon) / (d * d);
        let part2 = sr12 - 0.5 * sr6;
        let magnitude = part1 * part2 * d;

        Some(direction * magnitude)
    }

    /// Net force on `body` in engine units (100 amu * Angstrom / ps^2).
    ///
    /// `neighbors` must already be filtered to the cutoff. Zero neighbors
    /// gives exactly the zero vector.
    pub fn compute_force<'a, I>(&self, body: &Body, neighbors: I) -> ForceSample
    where
        I: IntoIterator<Item = &'a Body>,
    {
        let mut total = NVec3::zeros();
        let mut skipped = 0;
        for neighbor in neighbors {
            match self.pair_force(body, neighbor) {
                Some(f) => total += f,
                None => skipped += 1,
            }
        }

        if skipped > 0 {
            log::trace!("body {:?}: skipped {} coincident neighbor(s)", body.id, skipped);
        }

        // N -> engine units: per 100 amu, then m/s^2 -> Angstrom/ps^2
        let force = total / MASS_100AMU_TO_KG * EYE_ADJUSTMENT;
        ForceSample { force, skipped }
    }
}
