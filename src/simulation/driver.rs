//! Per-tick orchestration of the atom sandbox
//!
//! [`Simulation::tick`] is the single entry point a host calls once per
//! physics step. The order inside a tick is fixed:
//!
//! 1. gather neighbors for every body from a snapshot of positions
//! 2. evaluate the Lennard-Jones force on every dynamic body
//! 3. submit the forces to the momentum integrator
//! 4. measure the temperature once and rescale dynamic velocities
//! 5. run the containment check on every body
//!
//! then the integrator advances positions by `dt * time_scale`. Containment
//! runs after the thermostat so it sees the rescaled velocity.
//!
//! Grabbing, dragging and releasing atoms are explicit transitions on
//! [`Motion`]; at most one body is held at a time.

use std::collections::HashSet;

use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::error::{Result, SimError};
use crate::simulation::containment::{self, ContainmentEvent, Sphere};
use crate::simulation::engine::{Engine, NeighborSearch};
use crate::simulation::environment::SimulationBox;
use crate::simulation::forces::ForceField;
use crate::simulation::integrator::{MomentumIntegrator, SemiImplicitEuler};
use crate::simulation::neighbors::{neighbors_direct, CellGrid};
use crate::simulation::params::{SimulationConfig, BOLTZMANN, FLING_GAIN, VELOCITY_TO_SI};
use crate::simulation::species::{SpeciesId, SpeciesTable};
use crate::simulation::states::{Body, BodyId, Containment, Motion, NVec3, System};
use crate::simulation::thermostat;

/// What one tick did
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TickReport {
    pub stepped: bool,              // false when paused or time_scale is 0
    pub dt: f64,                    // effective step after time scaling
    pub temperature: f64,           // ensemble temperature before rescaling (K)
    pub rescale: Option<f64>,       // factor applied, None when skipped
    pub reflections: usize,         // bodies that started reflecting this tick
    pub degenerate_pairs: usize,    // coincident pairs left out of the force sum, each counted once
}

pub struct Simulation {
    pub system: System,
    pub engine: Engine,
    field: ForceField,
    integrator: Box<dyn MomentumIntegrator + Send + Sync>,
}

impl Simulation {
    /// Build the force field (and its sigma table) from `species`.
    /// The species set is fixed from here on.
    pub fn new(species: SpeciesTable, engine: Engine) -> Self {
        Self {
            system: System::new(),
            engine,
            field: ForceField::new(species),
            integrator: Box::new(SemiImplicitEuler),
        }
    }

    /// Swap in another host integrator
    pub fn with_integrator<T>(mut self, integrator: T) -> Self
    where
        T: MomentumIntegrator + Send + Sync + 'static,
    {
        self.integrator = Box::new(integrator);
        self
    }

    pub fn field(&self) -> &ForceField {
        &self.field
    }

    pub fn species(&self) -> &SpeciesTable {
        self.field.species()
    }

    // =====================================================================
    // Lifecycle
    // =====================================================================

    pub fn spawn(&mut self, species: &str, x: NVec3, v: NVec3) -> Result<BodyId> {
        let id = self.field.species_id(species)?;
        Ok(self.system.push(id, x, v))
    }

    pub fn spawn_species(&mut self, species: SpeciesId, x: NVec3, v: NVec3) -> Result<BodyId> {
        self.field.ensure_covered(species)?;
        Ok(self.system.push(species, x, v))
    }

    /// Drop an atom where the user released it, pulled back inside the box
    pub fn place(&mut self, species: &str, x: NVec3, env: &SimulationBox) -> Result<BodyId> {
        self.spawn(species, env.clamp(x), NVec3::zeros())
    }

    /// `count` atoms at random positions in the box, at rest
    pub fn populate<R: Rng + ?Sized>(
        &mut self,
        species: &str,
        count: usize,
        env: &SimulationBox,
        rng: &mut R,
    ) -> Result<Vec<BodyId>> {
        let id = self.field.species_id(species)?;
        Ok((0..count)
            .map(|_| self.system.push(id, env.random_position(rng), NVec3::zeros()))
            .collect())
    }

    pub fn remove(&mut self, id: BodyId) -> Result<Body> {
        self.system.remove(id).ok_or(SimError::UnknownBody(id))
    }

    pub fn clear(&mut self) {
        self.system.bodies.clear();
    }

    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.system.get(id)
    }

    fn body_mut(&mut self, id: BodyId) -> Result<&mut Body> {
        self.system.get_mut(id).ok_or(SimError::UnknownBody(id))
    }

    /// Give every dynamic body a Maxwell-Boltzmann velocity at `temperature`,
    /// then remove the centre-of-mass drift.
    pub fn kick<R: Rng + ?Sized>(&mut self, temperature: f64, rng: &mut R) -> Result<()> {
        let ids: Vec<BodyId> = self.system.bodies.iter().map(|b| b.id).collect();
        self.kick_bodies(&ids, temperature, rng)
    }

    /// Same as [`Simulation::kick`] restricted to `ids`; the drift is removed
    /// over those bodies only and every other body keeps its velocity.
    /// Kinematic bodies in `ids` are skipped.
    pub fn kick_bodies<R: Rng + ?Sized>(
        &mut self,
        ids: &[BodyId],
        temperature: f64,
        rng: &mut R,
    ) -> Result<()> {
        if !(temperature.is_finite() && temperature >= 0.0) {
            return Err(SimError::InvalidConfig(format!(
                "kick temperature must be >= 0, got {temperature}"
            )));
        }
        for &id in ids {
            self.system.get(id).ok_or(SimError::UnknownBody(id))?;
        }
        let ids: HashSet<BodyId> = ids.iter().copied().collect();
        let species = self.field.species();
        let kicked = |b: &Body| !b.is_kinematic() && ids.contains(&b.id);

        let mut momentum = NVec3::zeros();
        let mut mass = 0.0;
        for b in self.system.bodies.iter_mut().filter(|b| kicked(b)) {
            let s = species.get(b.species);
            // per-component std dev in m/s, then back to Angstrom/ps
            let std = (BOLTZMANN * temperature / s.mass_kg()).sqrt() / VELOCITY_TO_SI;
            let normal = Normal::new(0.0, std)
                .map_err(|e| SimError::InvalidConfig(format!("kick distribution: {e}")))?;
            b.v = NVec3::new(normal.sample(rng), normal.sample(rng), normal.sample(rng));
            momentum += b.v * s.mass;
            mass += s.mass;
        }
        if mass > 0.0 {
            let drift = momentum / mass;
            for b in self.system.bodies.iter_mut().filter(|b| kicked(b)) {
                b.v -= drift;
            }
        }
        Ok(())
    }

    // =====================================================================
    // Hold / drag
    // =====================================================================

    /// Take hold of a body; it becomes kinematic.
    /// If another body is already held it is let go first (last grab wins).
    pub fn grab(&mut self, id: BodyId) -> Result<()> {
        self.system.get(id).ok_or(SimError::UnknownBody(id))?;
        for b in self.system.bodies.iter_mut() {
            if b.is_held() && b.id != id {
                log::warn!("body {:?} still held while grabbing {:?}, releasing it", b.id, id);
                b.motion = Motion::Dynamic;
                b.containment = Containment::Free;
            }
        }
        self.body_mut(id)?.motion = Motion::Held;
        Ok(())
    }

    pub fn drag_to(&mut self, id: BodyId, x: NVec3) -> Result<()> {
        let b = self.body_mut(id)?;
        if !b.is_held() {
            return Err(SimError::NotHeld(id));
        }
        b.x = x;
        Ok(())
    }

    /// Let go of a held body and flick it with the pointer motion `fling`.
    /// Any reflection recorded before it was grabbed is dropped; the next
    /// containment check starts over from where it was let go.
    pub fn release(&mut self, id: BodyId, fling: NVec3) -> Result<()> {
        let b = self.body_mut(id)?;
        if !b.is_held() {
            return Err(SimError::NotHeld(id));
        }
        b.motion = Motion::Dynamic;
        b.containment = Containment::Free;
        b.force += fling * FLING_GAIN;
        Ok(())
    }

    pub fn pin(&mut self, id: BodyId) -> Result<()> {
        self.body_mut(id)?.motion = Motion::Pinned;
        Ok(())
    }

    pub fn unpin(&mut self, id: BodyId) -> Result<()> {
        let b = self.body_mut(id)?;
        if b.motion == Motion::Pinned {
            b.motion = Motion::Dynamic;
            b.containment = Containment::Free;
        }
        Ok(())
    }

    // =====================================================================
    // Tick
    // =====================================================================

    /// Indices of the bodies inside body `i`'s cutoff sphere
    pub fn neighbors_of(&self, i: usize, cutoff_multiplier: f64) -> Vec<usize> {
        let cutoff = self.field.cutoff(self.system.bodies[i].species, cutoff_multiplier);
        neighbors_direct(&self.system, i, cutoff)
    }

    pub fn temperature(&self) -> f64 {
        thermostat::instantaneous_temperature(&self.system, self.field.species())
    }

    /// Advance the simulation by one host step of length `dt` (ps)
    pub fn tick(&mut self, dt: f64, config: &SimulationConfig) -> Result<TickReport> {
        config.validate()?;
        if !(dt.is_finite() && dt >= 0.0) {
            return Err(SimError::InvalidConfig(format!("dt must be >= 0, got {dt}")));
        }
        let dt = dt * config.time_scale;
        // a zero-length step freezes the tick the same way pause does
        if config.paused || dt == 0.0 {
            return Ok(TickReport::default());
        }
        let mut report = TickReport {
            stepped: true,
            dt,
            ..Default::default()
        };

        // 1 + 2: every force sees the same snapshot of positions
        let forces = self.compute_forces(config.cutoff_multiplier, &mut report);

        // 3
        for (b, f) in self.system.bodies.iter_mut().zip(forces) {
            if !b.is_kinematic() {
                b.force += f;
            }
        }

        // 4
        report.temperature = self.temperature();
        let factor = thermostat::rescale_factor(
            report.temperature,
            config.desired_temperature,
            config.coupling(dt),
        );
        if thermostat::apply(&mut self.system, factor) {
            report.rescale = Some(factor);
        } else if self.system.len() > 1 {
            log::debug!("thermostat skipped, factor {factor} at T = {:.3} K", report.temperature);
        }

        // 5
        let sphere = Sphere {
            center: config.containment_center,
            radius: config.containment_radius,
        };
        for b in self.system.bodies.iter_mut() {
            if containment::check(b, &sphere) == ContainmentEvent::Reflected {
                report.reflections += 1;
            }
        }

        self.integrator
            .integrate(&mut self.system, self.field.species(), dt);
        Ok(report)
    }

    fn compute_forces(&self, cutoff_multiplier: f64, report: &mut TickReport) -> Vec<NVec3> {
        let sys = &self.system;
        let grid = match self.engine.neighbor_search {
            NeighborSearch::CellList => {
                Some(CellGrid::build(sys, self.field.max_cutoff(cutoff_multiplier)))
            }
            NeighborSearch::Direct => None,
        };

        sys.bodies
            .iter()
            .enumerate()
            .map(|(i, b)| {
                if b.is_kinematic() {
                    return NVec3::zeros();
                }
                let cutoff = self.field.cutoff(b.species, cutoff_multiplier);
                let neighbors = match &grid {
                    Some(grid) => grid.neighbors(sys, i, cutoff),
                    None => neighbors_direct(sys, i, cutoff),
                };
                let sample = self
                    .field
                    .compute_force(b, neighbors.iter().map(|&j| &sys.bodies[j]));
                if sample.skipped > 0 {
                    // a pair of dynamic bodies shows up from both sides, count it at the lower index
                    report.degenerate_pairs += neighbors
                        .iter()
                        .map(|&j| (j, &sys.bodies[j]))
                        .filter(|&(j, other)| {
                            (j > i || other.is_kinematic())
                                && self.field.pair_force(b, other).is_none()
                        })
                        .count();
                }
                sample.force
            })
            .collect()
    }
}
